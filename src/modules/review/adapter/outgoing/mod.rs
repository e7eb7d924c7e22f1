pub mod review_repository_postgres;

pub use review_repository_postgres::ReviewRepositoryPostgres;
