pub mod app_state_builder;
pub mod auth_fakes;
pub mod multipart;
pub mod storage_fakes;
pub mod stubs;
