use crate::server::data::password_reset_token::PasswordResetTokenRepository;
use test_utils::{
    builder::TestBuilder,
    factory::{password_reset_token::PasswordResetTokenFactory, user::create_user},
};

mod lifecycle;
