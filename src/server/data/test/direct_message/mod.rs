use crate::server::data::direct_message::DirectMessageRepository;
use test_utils::{
    builder::TestBuilder,
    factory::{direct_message::DirectMessageFactory, user::create_user},
};

mod conversation_between;
mod partners;
mod unread_counts;
