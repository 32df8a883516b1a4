//! Wayshare Test Utils
//!
//! Shared testing utilities for the wayshare backend. This crate offers a
//! builder pattern for creating test contexts with in-memory SQLite databases
//! and per-entity factories that cut down on setup boilerplate.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builder-style factories with sensible per-entity defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::{Friendship, User};
//!
//! #[tokio::test]
//! async fn test_friendship_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(User)
//!         .with_table(Friendship)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
