mod app_error;
mod extractor_config;
mod response;

pub use app_error::AppError;
pub use extractor_config::{
    custom_json_config, custom_path_config, custom_query_config, route_not_found,
};
pub use response::{ApiError, ApiResponse, FieldErrors};
