pub mod password_hasher;
pub mod password_reset_notifier;
pub mod token_provider;
pub mod token_repository;
pub mod user_repository;

pub use password_hasher::{HashError, PasswordHasher};
pub use password_reset_notifier::{PasswordResetNotifier, ResetNotificationError};
pub use token_provider::{IssuedToken, TokenClaims, TokenError, TokenProvider, TokenType};
pub use token_repository::{
    PasswordResetTokenRepository, RefreshTokenRepository, TokenRepositoryError,
};
pub use user_repository::{ProfileChanges, UserRepository, UserRepositoryError};
