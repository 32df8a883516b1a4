//! HTTP request handlers.
//!
//! Controllers stay thin: resolve the acting user through the auth guard,
//! convert DTOs to parameter types, call one service, and wrap the result in
//! the `ApiResponse` envelope.

pub mod auth;
pub mod friendship;
pub mod group;
pub mod group_blog;
pub mod group_chat;
pub mod maps;
pub mod message;
pub mod notification;
pub mod route;
pub mod site_blog;
pub mod user;
pub mod weather;
