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
                    .table(DirectMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(DirectMessage::Id))
                    .col(integer(DirectMessage::SenderId))
                    .col(integer(DirectMessage::ReceiverId))
                    .col(text(DirectMessage::Content))
                    .col(boolean(DirectMessage::IsRead))
                    .col(
                        timestamp(DirectMessage::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(DirectMessage::ReadAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_direct_message_sender_id")
                            .from(DirectMessage::Table, DirectMessage::SenderId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_direct_message_receiver_id")
                            .from(DirectMessage::Table, DirectMessage::ReceiverId)
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
            .drop_table(Table::drop().table(DirectMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DirectMessage {
    Table,
    Id,
    SenderId,
    ReceiverId,
    Content,
    IsRead,
    CreatedAt,
    ReadAt,
}
