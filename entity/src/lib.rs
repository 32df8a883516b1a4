//! SeaORM entity models for the wayshare database schema.

pub mod prelude;

pub mod activity_group;
pub mod direct_message;
pub mod friendship;
pub mod group_blog_post;
pub mod group_chat_message;
pub mod group_member;
pub mod notification;
pub mod password_reset_token;
pub mod route;
pub mod route_share;
pub mod site_blog;
pub mod user;
