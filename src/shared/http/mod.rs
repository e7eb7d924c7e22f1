pub mod multipart;
pub mod nullable;
