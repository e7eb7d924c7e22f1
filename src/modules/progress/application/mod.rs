pub mod domain;
pub mod ports;
pub mod progress_use_cases;
pub mod services;

pub use progress_use_cases::ProgressUseCases;
