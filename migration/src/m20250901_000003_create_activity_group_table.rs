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
                    .table(ActivityGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityGroup::Id))
                    .col(string_uniq(ActivityGroup::Name))
                    .col(string(ActivityGroup::Icon))
                    .col(string(ActivityGroup::Color))
                    .col(text_null(ActivityGroup::Description))
                    .col(string(ActivityGroup::Category))
                    .col(integer_null(ActivityGroup::MaxMembers))
                    .col(boolean(ActivityGroup::IsPrivate))
                    .col(integer(ActivityGroup::CreatorId))
                    .col(
                        timestamp(ActivityGroup::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_group_creator_id")
                            .from(ActivityGroup::Table, ActivityGroup::CreatorId)
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
            .drop_table(Table::drop().table(ActivityGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActivityGroup {
    Table,
    Id,
    Name,
    Icon,
    Color,
    Description,
    Category,
    MaxMembers,
    IsPrivate,
    CreatorId,
    CreatedAt,
}
