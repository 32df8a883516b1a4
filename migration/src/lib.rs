pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_user_table;
mod m20250901_000002_create_friendship_table;
mod m20250901_000003_create_activity_group_table;
mod m20250901_000004_create_group_member_table;
mod m20250901_000005_create_group_chat_message_table;
mod m20250901_000006_create_group_blog_post_table;
mod m20250901_000007_create_direct_message_table;
mod m20250901_000008_create_route_table;
mod m20250901_000009_create_route_share_table;
mod m20250901_000010_create_notification_table;
mod m20250901_000011_create_site_blog_table;
mod m20250901_000012_create_password_reset_token_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_user_table::Migration),
            Box::new(m20250901_000002_create_friendship_table::Migration),
            Box::new(m20250901_000003_create_activity_group_table::Migration),
            Box::new(m20250901_000004_create_group_member_table::Migration),
            Box::new(m20250901_000005_create_group_chat_message_table::Migration),
            Box::new(m20250901_000006_create_group_blog_post_table::Migration),
            Box::new(m20250901_000007_create_direct_message_table::Migration),
            Box::new(m20250901_000008_create_route_table::Migration),
            Box::new(m20250901_000009_create_route_share_table::Migration),
            Box::new(m20250901_000010_create_notification_table::Migration),
            Box::new(m20250901_000011_create_site_blog_table::Migration),
            Box::new(m20250901_000012_create_password_reset_token_table::Migration),
        ]
    }
}
