pub mod catalog;
pub mod learner;

pub use catalog::*;
pub use learner::*;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // `user/purchased` must win over `user/{id}`.
    cfg.service(list_purchased_courses_handler)
        .service(get_user_module_handler)
        .service(get_user_lesson_handler)
        .service(get_user_course_handler)
        .service(list_courses_handler)
        .service(get_course_handler);
}
