use crate::server::{
    data::friendship::FriendshipRepository, model::friendship::FriendshipStatus,
};
use test_utils::{
    builder::TestBuilder,
    factory::{friendship::FriendshipFactory, user::create_user},
};

mod create_pending;
mod find_between;
mod set_status;
mod status_queries;
