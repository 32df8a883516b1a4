//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations
//! (CRUD) for each aggregate in the application. Repositories use SeaORM
//! entity models internally and return domain models to maintain separation
//! between the data layer and business logic layer. All database queries,
//! inserts, updates, and deletes are performed through these repositories.

pub mod direct_message;
pub mod friendship;
pub mod group;
pub mod group_blog;
pub mod group_chat;
pub mod notification;
pub mod password_reset_token;
pub mod route;
pub mod site_blog;
pub mod user;

#[cfg(test)]
mod test;
