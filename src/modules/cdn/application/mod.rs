pub mod cdn_use_cases;
pub mod domain;
pub mod ports;
pub mod services;

pub use cdn_use_cases::CdnUseCases;
