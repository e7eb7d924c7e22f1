use crate::modules::auth::application::domain::entities::PublicUser;

/// Result of every operation that signs a user in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the refresh token expires.
    pub refresh_expires_in: i64,
}
