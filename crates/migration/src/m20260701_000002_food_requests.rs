use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum FoodRequests {
    Table,
    Id,
    RequesterName,
    Phone,
    Email,
    Organization,
    RequestedItem,
    Quantity,
    Location,
    Description,
    NeededBy,
    Status,
    CreatedBy,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FoodRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoodRequests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FoodRequests::RequesterName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FoodRequests::Phone).string().not_null())
                    .col(ColumnDef::new(FoodRequests::Email).string())
                    .col(ColumnDef::new(FoodRequests::Organization).string())
                    .col(
                        ColumnDef::new(FoodRequests::RequestedItem)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FoodRequests::Quantity).string().not_null())
                    .col(ColumnDef::new(FoodRequests::Location).string().not_null())
                    .col(ColumnDef::new(FoodRequests::Description).string())
                    .col(
                        ColumnDef::new(FoodRequests::NeededBy)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FoodRequests::Status).string().not_null())
                    .col(ColumnDef::new(FoodRequests::CreatedBy).string())
                    .col(
                        ColumnDef::new(FoodRequests::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The fulfillment view filters on the deadline and orders by recency.
        manager
            .create_index(
                Index::create()
                    .name("idx-food_requests-needed_by")
                    .table(FoodRequests::Table)
                    .col(FoodRequests::NeededBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-food_requests-created_at")
                    .table(FoodRequests::Table)
                    .col(FoodRequests::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoodRequests::Table).to_owned())
            .await
    }
}
