use crate::server::{
    data::user::UserRepository,
    model::user::{NewUserParams, UpdateProfileParams},
};
use test_utils::{builder::TestBuilder, factory::user::UserFactory};

mod create;
mod search;
mod update_profile;
