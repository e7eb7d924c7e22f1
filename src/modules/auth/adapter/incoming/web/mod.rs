pub mod cookie;
pub mod errors;
pub mod extractors;
pub mod routes;
