//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits
//! between the controller (API) layer and the data (repository) layer.
//! Services are responsible for:
//!
//! - **Business Rules**: Friendship transitions, membership gates, ownership checks
//! - **Orchestration**: Coordinating repository calls and external collaborators
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod auth;
pub mod direct_message;
pub mod email;
pub mod friendship;
pub mod group;
pub mod group_blog;
pub mod group_chat;
pub mod maps;
pub mod notification;
pub mod route;
pub mod site_blog;
pub mod token;
pub mod user;
pub mod weather;
