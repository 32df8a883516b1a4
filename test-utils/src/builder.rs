use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with
/// in-memory SQLite databases. Use the builder pattern to add entity tables,
/// then call `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Friendship, User};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Friendship)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements to execute during database setup, in order.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity
    /// using SQLite backend syntax. Chain multiple calls to add multiple
    /// tables; tables with foreign keys should be added after the tables
    /// they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables required for social-graph operations:
    /// User and Friendship.
    pub fn with_social_tables(self) -> Self {
        self.with_table(User).with_table(Friendship)
    }

    /// Adds the tables required for direct-messaging operations:
    /// User, Friendship, DirectMessage and Notification.
    pub fn with_messaging_tables(self) -> Self {
        self.with_social_tables()
            .with_table(DirectMessage)
            .with_table(Notification)
    }

    /// Adds the tables required for group operations:
    /// User, ActivityGroup, GroupMember, GroupChatMessage and GroupBlogPost.
    pub fn with_group_tables(self) -> Self {
        self.with_table(User)
            .with_table(ActivityGroup)
            .with_table(GroupMember)
            .with_table(GroupChatMessage)
            .with_table(GroupBlogPost)
    }

    /// Adds the tables required for route operations:
    /// User, Route and RouteShare.
    pub fn with_route_tables(self) -> Self {
        self.with_table(User)
            .with_table(Route)
            .with_table(RouteShare)
    }

    /// Builds and initializes the test context with the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized context with database and tables
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
