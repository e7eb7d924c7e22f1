use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::modules::auth::application::domain::entities::NewUser;
use crate::modules::auth::application::ports::incoming::use_cases::{
    AuthSession, RegisterUserCommand, RegisterUserError, RegisterUserUseCase,
};
use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, UserRepository, UserRepositoryError,
};

use super::session_issuer::{SessionError, SessionIssuer};

impl From<SessionError> for RegisterUserError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Token(e) => RegisterUserError::TokenGenerationFailed(e.to_string()),
            SessionError::Repository(e) => RegisterUserError::RepositoryError(e.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct RegisterUserService {
    users: Arc<dyn UserRepository + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    sessions: SessionIssuer,
}

impl RegisterUserService {
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
impl RegisterUserUseCase for RegisterUserService {
    async fn execute(
        &self,
        command: RegisterUserCommand,
    ) -> Result<AuthSession, RegisterUserError> {
        let existing = self
            .users
            .find_by_email(command.email())
            .await
            .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(RegisterUserError::EmailAlreadyExists);
        }

        let password_hash = self
            .hasher
            .hash_password(command.password())
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                email: command.email().to_string(),
                password_hash,
                name: command.name().to_string(),
                surname: command.surname().to_string(),
                phone_number: command.phone_number().map(str::to_string),
                sex: Some(command.sex()),
                birth_date: Some(command.birth_date()),
                experience: Some(command.experience().to_string()),
            })
            .await
            .map_err(|e| match e {
                // lost a race with a concurrent registration
                UserRepositoryError::EmailAlreadyExists => RegisterUserError::EmailAlreadyExists,
                other => RegisterUserError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = %user.id, "User registered");

        Ok(self.sessions.issue(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::ports::incoming::use_cases::RegisterUserInput;
    use crate::tests::support::auth_fakes::{
        session_issuer, FakePasswordHasher, InMemoryRefreshTokens, InMemoryUsers,
    };

    fn command() -> RegisterUserCommand {
        RegisterUserCommand::new(RegisterUserInput {
            email: "olena@example.com".to_string(),
            password: "Secret123".to_string(),
            name: "Olena".to_string(),
            surname: "Kovalenko".to_string(),
            phone_number: None,
            sex: "FEMALE".to_string(),
            birth_date: "1994-05-17".to_string(),
            experience: "beginner".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_issues_session_and_stores_refresh_hash() {
        let users = Arc::new(InMemoryUsers::default());
        let refresh = Arc::new(InMemoryRefreshTokens::default());
        let service = RegisterUserService::new(
            users.clone(),
            Arc::new(FakePasswordHasher),
            session_issuer(refresh.clone()),
        );

        let session = service.execute(command()).await.unwrap();

        assert_eq!(session.user.email, "olena@example.com");
        assert!(!session.access_token.is_empty());
        assert_eq!(refresh.len(), 1);
        let stored = users.find_by_email("olena@example.com").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "hashed:Secret123");
    }

    #[tokio::test]
    async fn test_register_existing_email() {
        let users = Arc::new(InMemoryUsers::default());
        let service = RegisterUserService::new(
            users.clone(),
            Arc::new(FakePasswordHasher),
            session_issuer(Arc::new(InMemoryRefreshTokens::default())),
        );
        service.execute(command()).await.unwrap();

        let result = service.execute(command()).await;

        assert_eq!(result.unwrap_err(), RegisterUserError::EmailAlreadyExists);
    }
}
