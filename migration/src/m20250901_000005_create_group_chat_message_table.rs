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
                    .table(GroupChatMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(GroupChatMessage::Id))
                    .col(integer(GroupChatMessage::GroupId))
                    .col(integer(GroupChatMessage::AuthorId))
                    .col(text(GroupChatMessage::Content))
                    .col(
                        timestamp(GroupChatMessage::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_chat_message_group_id")
                            .from(GroupChatMessage::Table, GroupChatMessage::GroupId)
                            .to(ActivityGroup::Table, ActivityGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_chat_message_author_id")
                            .from(GroupChatMessage::Table, GroupChatMessage::AuthorId)
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
            .drop_table(Table::drop().table(GroupChatMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GroupChatMessage {
    Table,
    Id,
    GroupId,
    AuthorId,
    Content,
    CreatedAt,
}
