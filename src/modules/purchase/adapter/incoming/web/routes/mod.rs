pub mod purchase_courses;

pub use purchase_courses::*;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(purchase_courses_handler);
}
