//! In-memory adapters for the auth ports, shared by service and route tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::application::domain::entities::{NewUser, Role, StoredToken, User};
use crate::modules::auth::application::ports::outgoing::{
    HashError, PasswordHasher, PasswordResetTokenRepository, ProfileChanges,
    RefreshTokenRepository, TokenProvider, TokenRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::modules::auth::application::services::session_issuer::SessionIssuer;

pub fn test_token_provider() -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(JwtTokenService::new(JwtConfig::for_tests()))
}

pub fn session_issuer(refresh: Arc<InMemoryRefreshTokens>) -> SessionIssuer {
    SessionIssuer::new(test_token_provider(), refresh)
}

/// `Authorization` header carrying a valid access token for the test provider.
pub fn bearer(user_id: Uuid, role: Role) -> (&'static str, String) {
    let issued = test_token_provider()
        .generate_access_token(user_id, role)
        .expect("test access token");
    ("Authorization", format!("Bearer {}", issued.token))
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn modify(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut User),
    ) -> Result<User, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserRepositoryError::NotFound)?;
        f(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, new: NewUser) -> Result<User, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        let email = new.email.to_lowercase();
        if users.iter().any(|u| u.email == email) {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash: new.password_hash,
            name: new.name,
            surname: new.surname,
            phone_number: new.phone_number,
            sex: new.sex,
            birth_date: new.birth_date,
            experience: new.experience,
            weight: None,
            image_url: None,
            role: Role::User,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError> {
        self.modify(id, |u| {
            if let Some(name) = changes.name {
                u.name = name;
            }
            if let Some(surname) = changes.surname {
                u.surname = surname;
            }
            if let Some(phone_number) = changes.phone_number {
                u.phone_number = phone_number;
            }
            if let Some(sex) = changes.sex {
                u.sex = sex;
            }
            if let Some(birth_date) = changes.birth_date {
                u.birth_date = birth_date;
            }
            if let Some(experience) = changes.experience {
                u.experience = experience;
            }
            if let Some(weight) = changes.weight {
                u.weight = weight;
            }
        })
    }

    async fn update_image_url(
        &self,
        id: Uuid,
        image_url: Option<String>,
    ) -> Result<User, UserRepositoryError> {
        self.modify(id, |u| u.image_url = image_url)
    }
}

#[derive(Default)]
struct TokenRows {
    rows: Mutex<Vec<StoredToken>>,
}

impl TokenRows {
    fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn insert(&self, user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(StoredToken {
            id,
            token_hash,
            user_id,
            expires_at,
            used: false,
        });
    }

    fn find(&self, token_hash: &str) -> Option<StoredToken> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.token_hash == token_hash)
            .cloned()
    }

    fn remove_where(&self, pred: impl Fn(&StoredToken) -> bool) -> u64 {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !pred(r));
        (before - rows.len()) as u64
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokens(TokenRows);

impl InMemoryRefreshTokens {
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokens {
    async fn store(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        self.0.insert(user_id, token_hash, expires_at);
        Ok(())
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<StoredToken>, TokenRepositoryError> {
        Ok(self.0.find(token_hash))
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, TokenRepositoryError> {
        Ok(self.0.remove_where(|r| r.token_hash == token_hash) > 0)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, TokenRepositoryError> {
        Ok(self.0.remove_where(|r| r.user_id == user_id))
    }

    async fn delete_expired(&self) -> Result<u64, TokenRepositoryError> {
        Ok(self.0.remove_where(StoredToken::is_expired))
    }
}

/// Reset tokens that redeem against the given users and refresh tokens.
#[derive(Default)]
pub struct InMemoryResetTokens {
    rows: TokenRows,
    users: Arc<InMemoryUsers>,
    refresh: Arc<InMemoryRefreshTokens>,
}

impl InMemoryResetTokens {
    pub fn linked(users: Arc<InMemoryUsers>, refresh: Arc<InMemoryRefreshTokens>) -> Self {
        Self {
            rows: TokenRows::default(),
            users,
            refresh,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[async_trait]
impl PasswordResetTokenRepository for InMemoryResetTokens {
    async fn store(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        self.rows.insert(user_id, token_hash, expires_at);
        Ok(())
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<StoredToken>, TokenRepositoryError> {
        Ok(self.rows.find(token_hash))
    }

    async fn redeem(
        &self,
        id: i32,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<Option<u64>, TokenRepositoryError> {
        let mut rows = self.rows.rows.lock().unwrap();
        let Some(row) = rows
            .iter_mut()
            .find(|r| r.id == id && r.user_id == user_id && !r.used)
        else {
            return Ok(None);
        };
        if self
            .users
            .modify(user_id, |u| u.password_hash = new_password_hash)
            .is_err()
        {
            return Ok(None);
        }
        row.used = true;
        Ok(Some(self.refresh.0.remove_where(|r| r.user_id == user_id)))
    }

    async fn delete_expired(&self) -> Result<u64, TokenRepositoryError> {
        Ok(self.rows.remove_where(StoredToken::is_expired))
    }
}

/// Deterministic stand-in for Argon2: the hash is `hashed:<password>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakePasswordHasher;

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed:{password}"))
    }
}
