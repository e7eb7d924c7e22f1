use actix_web::web;

pub mod serve;
pub mod upload;

pub use serve::*;
pub use upload::*;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_media_handler)
        .service(serve_course_video_handler)
        .service(serve_public_file_handler);
}
