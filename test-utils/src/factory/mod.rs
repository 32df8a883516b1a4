//! Builder-style factories for creating test entities with sensible defaults.

pub mod direct_message;
pub mod friendship;
pub mod group;
pub mod group_blog_post;
pub mod group_chat_message;
pub mod helpers;
pub mod notification;
pub mod password_reset_token;
pub mod route;
pub mod site_blog;
pub mod user;
