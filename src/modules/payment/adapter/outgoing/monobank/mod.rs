pub mod key_cache;
pub mod monobank_gateway;

pub use monobank_gateway::MonobankGateway;
