pub mod purchase_repository_postgres;
pub mod sea_orm_entity;

pub use purchase_repository_postgres::PurchaseRepositoryPostgres;
