use crate::server::{
    data::group::ActivityGroupRepository,
    model::group::{CreateGroupParams, UpdateGroupParams},
};
use test_utils::{
    builder::TestBuilder,
    factory::{group::ActivityGroupFactory, user::create_user},
};

mod create_with_creator;
mod membership;
mod search;
mod update_partial;
