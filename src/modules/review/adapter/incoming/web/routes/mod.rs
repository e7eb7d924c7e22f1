pub mod course_reviews;
mod form;
pub mod general_reviews;

pub use course_reviews::*;
pub use general_reviews::*;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_general_reviews_handler)
        .service(get_general_review_handler)
        .service(create_general_review_handler)
        .service(update_general_review_handler)
        .service(delete_general_review_handler)
        .service(list_course_reviews_handler)
        .service(list_reviews_of_course_handler)
        .service(get_course_review_handler)
        .service(create_course_review_handler)
        .service(update_course_review_handler)
        .service(delete_course_review_handler);
}
