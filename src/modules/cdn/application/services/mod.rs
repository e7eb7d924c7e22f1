pub mod cdn_service;

pub use cdn_service::CdnService;
