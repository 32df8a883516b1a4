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
                    .table(Route::Table)
                    .if_not_exists()
                    .col(pk_auto(Route::Id))
                    .col(integer(Route::OwnerId))
                    .col(string(Route::Name))
                    .col(text_null(Route::Description))
                    .col(text(Route::Waypoints))
                    .col(double(Route::DistanceKm))
                    .col(integer(Route::DurationMinutes))
                    .col(boolean(Route::IsPublic))
                    .col(string_null(Route::ShareToken).unique_key())
                    .col(
                        timestamp(Route::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Route::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_route_owner_id")
                            .from(Route::Table, Route::OwnerId)
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
            .drop_table(Table::drop().table(Route::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Route {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    Waypoints,
    DistanceKm,
    DurationMinutes,
    IsPublic,
    ShareToken,
    CreatedAt,
    UpdatedAt,
}
