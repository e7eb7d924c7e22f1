pub mod errors;
pub mod routes;
