use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse};

use crate::shared::api::AppError;

pub const REFRESH_COOKIE: &str = "refreshToken";
/// Scoped to the auth routes so refresh and logout both receive it.
pub const REFRESH_COOKIE_PATH: &str = "/api/auth";

fn secure_cookies() -> bool {
    std::env::var("RUST_ENV").as_deref() == Ok("production")
}

fn base_cookie(value: String) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, value)
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .secure(secure_cookies())
        .same_site(SameSite::Strict)
        .finish()
}

pub fn attach_refresh_cookie(
    resp: &mut HttpResponse,
    token: &str,
    max_age_secs: i64,
) -> Result<(), AppError> {
    let mut cookie = base_cookie(token.to_string());
    cookie.set_max_age(Duration::seconds(max_age_secs));
    resp.add_cookie(&cookie)
        .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn clear_refresh_cookie(resp: &mut HttpResponse) -> Result<(), AppError> {
    let mut cookie = base_cookie(String::new());
    cookie.make_removal();
    resp.add_cookie(&cookie)
        .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn read_refresh_cookie(req: &HttpRequest) -> Option<String> {
    req.cookie(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
