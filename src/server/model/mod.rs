//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer,
//! representing business entities and operation parameters. Domain models are
//! converted from entity models at the repository boundary and transformed to
//! DTOs at the controller boundary.

pub mod direct_message;
pub mod friendship;
pub mod group;
pub mod group_blog;
pub mod group_chat;
pub mod notification;
pub mod reset_token;
pub mod route;
pub mod site_blog;
pub mod user;
