use actix_web::web;

pub mod login_user;
pub mod logout_user;
pub mod password_reset;
pub mod refresh_token;
pub mod register_user;

pub use login_user::*;
pub use logout_user::*;
pub use password_reset::*;
pub use refresh_token::*;
pub use register_user::*;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register_user_handler)
        .service(login_user_handler)
        .service(refresh_token_handler)
        .service(logout_user_handler)
        .service(request_password_reset_handler)
        .service(verify_reset_token_handler)
        .service(reset_password_handler);
}
