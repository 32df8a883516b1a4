//! Wire DTOs shared by all controllers.
//!
//! These types define the JSON API contract: request bodies, response bodies
//! and the `ApiResponse` envelope every endpoint wraps its payload in.

pub mod api;
pub mod auth;
pub mod friendship;
pub mod group;
pub mod group_blog;
pub mod group_chat;
pub mod message;
pub mod notification;
pub mod route;
pub mod site_blog;
pub mod user;
