use sea_orm_migration::prelude::*;

use crate::m20260701_000002_food_requests::FoodRequests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum FoodRequestPledges {
    Table,
    Id,
    RequestId,
    UserId,
    PledgedQuantity,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FoodRequestPledges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoodRequestPledges::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FoodRequestPledges::RequestId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoodRequestPledges::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoodRequestPledges::PledgedQuantity)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoodRequestPledges::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-food_request_pledges-request_id")
                            .from(FoodRequestPledges::Table, FoodRequestPledges::RequestId)
                            .to(FoodRequests::Table, FoodRequests::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-food_request_pledges-request_id")
                    .table(FoodRequestPledges::Table)
                    .col(FoodRequestPledges::RequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoodRequestPledges::Table).to_owned())
            .await
    }
}
