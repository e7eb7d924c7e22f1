pub mod domain;
pub mod ports;
pub mod services;
pub mod user_use_cases;

pub use user_use_cases::UserUseCases;
