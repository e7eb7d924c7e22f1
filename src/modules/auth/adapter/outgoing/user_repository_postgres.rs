use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{NewUser, Role, Sex, User};
use crate::modules::auth::application::ports::outgoing::user_repository::{
    ProfileChanges, UserRepository, UserRepositoryError,
};
use crate::shared::db::errors::is_unique_violation;

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
    Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn model_to_user(model: UserModel) -> Result<User, UserRepositoryError> {
        let role = Role::from_str(&model.role).map_err(UserRepositoryError::DatabaseError)?;
        let sex = model
            .sex
            .as_deref()
            .map(Sex::from_str)
            .transpose()
            .map_err(UserRepositoryError::DatabaseError)?;

        Ok(User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            surname: model.surname,
            phone_number: model.phone_number,
            sex,
            birth_date: model.birth_date,
            experience: model.experience,
            weight: model.weight,
            image_url: model.image_url,
            role,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        })
    }

    fn map_db_err(e: DbErr) -> UserRepositoryError {
        UserRepositoryError::DatabaseError(e.to_string())
    }

    async fn find_model(&self, id: Uuid) -> Result<UserModel, UserRepositoryError> {
        UserEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or(UserRepositoryError::NotFound)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            name: Set(user.name),
            surname: Set(user.surname),
            phone_number: Set(user.phone_number),
            sex: Set(user.sex.map(|s| s.as_str().to_string())),
            birth_date: Set(user.birth_date),
            experience: Set(user.experience),
            weight: Set(None),
            image_url: Set(None),
            role: Set(Role::User.as_str().to_string()),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return UserRepositoryError::EmailAlreadyExists;
            }
            Self::map_db_err(e)
        })?;

        Self::model_to_user(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        UserEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .map(Self::model_to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        UserEntity::find()
            .filter(UserColumn::Email.eq(email.trim().to_lowercase()))
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .map(Self::model_to_user)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        UserEntity::find()
            .order_by_asc(UserColumn::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .into_iter()
            .map(Self::model_to_user)
            .collect()
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError> {
        let model = self.find_model(id).await?;
        if changes.is_empty() {
            return Self::model_to_user(model);
        }

        let mut active_user: UserActiveModel = model.into();

        if let Some(name) = changes.name {
            active_user.name = Set(name);
        }
        if let Some(surname) = changes.surname {
            active_user.surname = Set(surname);
        }
        if let Some(phone_number) = changes.phone_number {
            active_user.phone_number = Set(phone_number);
        }
        if let Some(sex) = changes.sex {
            active_user.sex = Set(sex.map(|s| s.as_str().to_string()));
        }
        if let Some(birth_date) = changes.birth_date {
            active_user.birth_date = Set(birth_date);
        }
        if let Some(experience) = changes.experience {
            active_user.experience = Set(experience);
        }
        if let Some(weight) = changes.weight {
            active_user.weight = Set(weight);
        }

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Self::model_to_user(updated)
    }

    async fn update_image_url(
        &self,
        id: Uuid,
        image_url: Option<String>,
    ) -> Result<User, UserRepositoryError> {
        let mut active_user: UserActiveModel = self.find_model(id).await?.into();
        active_user.image_url = Set(image_url);

        let updated = active_user
            .update(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        Self::model_to_user(updated)
    }
}
