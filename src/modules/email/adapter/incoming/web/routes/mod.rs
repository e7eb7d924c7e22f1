pub mod send_mail;

pub use send_mail::*;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(send_mail_handler);
}
