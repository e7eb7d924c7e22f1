pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_and_tokens;
mod m20250301_000002_create_catalog;
mod m20250301_000003_create_purchases_and_payments;
mod m20250301_000004_create_progress;
mod m20250301_000005_create_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_and_tokens::Migration),
            Box::new(m20250301_000002_create_catalog::Migration),
            Box::new(m20250301_000003_create_purchases_and_payments::Migration),
            Box::new(m20250301_000004_create_progress::Migration),
            Box::new(m20250301_000005_create_reviews::Migration),
        ]
    }
}
