use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250901_000001_create_user_table::User,
    m20250901_000003_create_activity_group_table::ActivityGroup,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupBlogPost::Table)
                    .if_not_exists()
                    .col(pk_auto(GroupBlogPost::Id))
                    .col(integer(GroupBlogPost::GroupId))
                    .col(integer(GroupBlogPost::AuthorId))
                    .col(string(GroupBlogPost::Title))
                    .col(text(GroupBlogPost::Content))
                    .col(string_null(GroupBlogPost::ImageUrl))
                    .col(
                        timestamp(GroupBlogPost::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(GroupBlogPost::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_blog_post_group_id")
                            .from(GroupBlogPost::Table, GroupBlogPost::GroupId)
                            .to(ActivityGroup::Table, ActivityGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_blog_post_author_id")
                            .from(GroupBlogPost::Table, GroupBlogPost::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupBlogPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GroupBlogPost {
    Table,
    Id,
    GroupId,
    AuthorId,
    Title,
    Content,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
