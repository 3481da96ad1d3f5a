pub use sea_orm_migration::prelude::*;

mod m20260701_000001_users;
mod m20260701_000002_food_requests;
mod m20260715_000001_food_request_pledges;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260701_000001_users::Migration),
            Box::new(m20260701_000002_food_requests::Migration),
            Box::new(m20260715_000001_food_request_pledges::Migration),
        ]
    }
}
