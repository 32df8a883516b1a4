use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250901_000001_create_user_table::User, m20250901_000008_create_route_table::Route,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RouteShare::Table)
                    .if_not_exists()
                    .col(integer(RouteShare::RouteId))
                    .col(integer(RouteShare::UserId))
                    .col(
                        timestamp(RouteShare::SharedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RouteShare::RouteId)
                            .col(RouteShare::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_route_share_route_id")
                            .from(RouteShare::Table, RouteShare::RouteId)
                            .to(Route::Table, Route::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_route_share_user_id")
                            .from(RouteShare::Table, RouteShare::UserId)
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
            .drop_table(Table::drop().table(RouteShare::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RouteShare {
    Table,
    RouteId,
    UserId,
    SharedAt,
}
