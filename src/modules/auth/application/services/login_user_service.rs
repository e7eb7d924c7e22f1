use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::modules::auth::application::ports::incoming::use_cases::{
    AuthSession, LoginCommand, LoginError, LoginUserUseCase,
};
use crate::modules::auth::application::ports::outgoing::{PasswordHasher, UserRepository};

use super::session_issuer::{SessionError, SessionIssuer};

impl From<SessionError> for LoginError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Token(e) => LoginError::TokenGenerationFailed(e.to_string()),
            SessionError::Repository(e) => LoginError::RepositoryError(e.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct LoginUserService {
    users: Arc<dyn UserRepository + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    sessions: SessionIssuer,
}

impl LoginUserService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        hasher: Arc<dyn PasswordHasher + Send + Sync>,
        sessions: SessionIssuer,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }
}

#[async_trait]
impl LoginUserUseCase for LoginUserService {
    async fn execute(&self, command: LoginCommand) -> Result<AuthSession, LoginError> {
        let user = self
            .users
            .find_by_email(command.email())
            .await
            .map_err(|e| LoginError::RepositoryError(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        let matches = self
            .hasher
            .verify_password(command.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !matches {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        Ok(self.sessions.issue(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::{sample_user, Role};
    use crate::tests::support::auth_fakes::{
        session_issuer, FakePasswordHasher, InMemoryRefreshTokens, InMemoryUsers,
    };

    fn service_with(users: Arc<InMemoryUsers>) -> LoginUserService {
        LoginUserService::new(
            users,
            Arc::new(FakePasswordHasher),
            session_issuer(Arc::new(InMemoryRefreshTokens::default())),
        )
    }

    fn known_user() -> Arc<InMemoryUsers> {
        let mut user = sample_user(Role::User);
        user.password_hash = "hashed:Secret123".to_string();
        Arc::new(InMemoryUsers::with(vec![user]))
    }

    #[tokio::test]
    async fn test_login_success_returns_public_user() {
        let service = service_with(known_user());

        let session = service
            .execute(LoginCommand::new("OLENA@example.com".into(), "Secret123".into()).unwrap())
            .await
            .unwrap();

        assert_eq!(session.user.email, "olena@example.com");
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_the_same() {
        let service = service_with(known_user());

        let unknown = service
            .execute(LoginCommand::new("ghost@example.com".into(), "Secret123".into()).unwrap())
            .await
            .unwrap_err();
        let wrong = service
            .execute(LoginCommand::new("olena@example.com".into(), "nope".into()).unwrap())
            .await
            .unwrap_err();

        assert_eq!(unknown, LoginError::InvalidCredentials);
        assert_eq!(wrong, LoginError::InvalidCredentials);
    }
}
