use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{NewUser, Sex, User};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UserRepositoryError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Partial profile update. `None` leaves a column untouched, `Some(None)` clears a
/// nullable column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub sex: Option<Option<Sex>>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub experience: Option<Option<String>>,
    pub weight: Option<Option<f64>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError>;

    async fn update_image_url(
        &self,
        id: Uuid,
        image_url: Option<String>,
    ) -> Result<User, UserRepositoryError>;
}
