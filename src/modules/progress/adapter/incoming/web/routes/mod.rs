pub mod complete;
pub mod update_position;

pub use complete::*;
pub use update_position::*;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(update_lesson_position_handler)
        .service(complete_lesson_handler)
        .service(complete_module_handler);
}
