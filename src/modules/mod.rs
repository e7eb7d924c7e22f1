pub mod auth;
pub mod cdn;
pub mod course;
pub mod email;
pub mod payment;
pub mod progress;
pub mod purchase;
pub mod review;
pub mod user;
