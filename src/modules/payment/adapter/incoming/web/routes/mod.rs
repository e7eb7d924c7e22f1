pub mod create_payment;
pub mod payment_status;
pub mod webhook;

pub use create_payment::*;
pub use payment_status::*;
pub use webhook::*;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_payment_handler)
        .service(payment_status_handler)
        .service(payment_webhook_handler);
}
