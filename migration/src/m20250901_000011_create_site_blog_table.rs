use sea_orm_migration::{prelude::*, schema::*};

use super::m20250901_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteBlog::Table)
                    .if_not_exists()
                    .col(pk_auto(SiteBlog::Id))
                    .col(integer(SiteBlog::AuthorId))
                    .col(string(SiteBlog::Title))
                    .col(text(SiteBlog::Content))
                    .col(string_null(SiteBlog::ImageUrl))
                    .col(string(SiteBlog::Category))
                    .col(
                        timestamp(SiteBlog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(SiteBlog::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_site_blog_author_id")
                            .from(SiteBlog::Table, SiteBlog::AuthorId)
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
            .drop_table(Table::drop().table(SiteBlog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SiteBlog {
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    ImageUrl,
    Category,
    CreatedAt,
    UpdatedAt,
}
