pub mod domain;
pub mod ports;
pub mod purchase_use_cases;
pub mod services;

pub use purchase_use_cases::PurchaseUseCases;
