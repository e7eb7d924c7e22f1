pub mod list_users;
pub mod profile;
pub mod profile_image;

pub use list_users::*;
pub use profile::*;
pub use profile_image::*;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users_handler)
        .service(get_profile_handler)
        .service(update_profile_handler)
        .service(upload_profile_image_handler);
}
