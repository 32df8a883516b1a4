use crate::server::data::notification::NotificationRepository;
use test_utils::{
    builder::TestBuilder,
    factory::{notification::NotificationFactory, user::create_user},
};

mod queries;
