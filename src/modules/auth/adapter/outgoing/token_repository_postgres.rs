use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::StoredToken;
use crate::modules::auth::application::ports::outgoing::token_repository::{
    PasswordResetTokenRepository, RefreshTokenRepository, TokenRepositoryError,
};

use super::sea_orm_entity::{password_reset_tokens, refresh_tokens, users};

fn map_db_err(e: DbErr) -> TokenRepositoryError {
    TokenRepositoryError::DatabaseError(e.to_string())
}

// ──────────────────────────────────────────────────────────
// Refresh tokens
// ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct RefreshTokenRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl RefreshTokenRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn model_to_token(model: refresh_tokens::Model) -> StoredToken {
        StoredToken {
            id: model.id,
            token_hash: model.token_hash,
            user_id: model.user_id,
            expires_at: model.expires_at.with_timezone(&Utc),
            used: false,
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for RefreshTokenRepositoryPostgres {
    async fn store(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        refresh_tokens::ActiveModel {
            id: NotSet,
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            expires_at: Set(expires_at.fixed_offset()),
            created_at: NotSet,
        }
        .insert(&*self.db)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<StoredToken>, TokenRepositoryError> {
        Ok(refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::TokenHash.eq(token_hash))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(Self::model_to_token))
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool, TokenRepositoryError> {
        let result = refresh_tokens::Entity::delete_many()
            .filter(refresh_tokens::Column::TokenHash.eq(token_hash))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, TokenRepositoryError> {
        let result = refresh_tokens::Entity::delete_many()
            .filter(refresh_tokens::Column::UserId.eq(user_id))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }

    async fn delete_expired(&self) -> Result<u64, TokenRepositoryError> {
        let result = refresh_tokens::Entity::delete_many()
            .filter(refresh_tokens::Column::ExpiresAt.lt(Utc::now().fixed_offset()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

// ──────────────────────────────────────────────────────────
// Password reset tokens
// ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PasswordResetTokenRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PasswordResetTokenRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn model_to_token(model: password_reset_tokens::Model) -> StoredToken {
        StoredToken {
            id: model.id,
            token_hash: model.token_hash,
            user_id: model.user_id,
            expires_at: model.expires_at.with_timezone(&Utc),
            used: model.used,
        }
    }
}

#[async_trait]
impl PasswordResetTokenRepository for PasswordResetTokenRepositoryPostgres {
    async fn store(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        password_reset_tokens::ActiveModel {
            id: NotSet,
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            expires_at: Set(expires_at.fixed_offset()),
            used: Set(false),
            created_at: NotSet,
        }
        .insert(&*self.db)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<StoredToken>, TokenRepositoryError> {
        Ok(password_reset_tokens::Entity::find()
            .filter(password_reset_tokens::Column::TokenHash.eq(token_hash))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(Self::model_to_token))
    }

    async fn redeem(
        &self,
        id: i32,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<Option<u64>, TokenRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        match redeem_in(&txn, id, user_id, new_password_hash).await {
            Ok(Some(revoked)) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(Some(revoked))
            }
            Ok(None) => {
                let _ = txn.rollback().await;
                Ok(None)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                Err(map_db_err(e))
            }
        }
    }

    async fn delete_expired(&self) -> Result<u64, TokenRepositoryError> {
        let result = password_reset_tokens::Entity::delete_many()
            .filter(password_reset_tokens::Column::ExpiresAt.lt(Utc::now().fixed_offset()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

/// The conditional `used = false` update runs first so a concurrent redeem
/// of the same token blocks on the row lock and then sees zero rows.
async fn redeem_in<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    user_id: Uuid,
    new_password_hash: String,
) -> Result<Option<u64>, DbErr> {
    let claimed = password_reset_tokens::Entity::update_many()
        .col_expr(password_reset_tokens::Column::Used, Expr::value(true))
        .filter(password_reset_tokens::Column::Id.eq(id))
        .filter(password_reset_tokens::Column::UserId.eq(user_id))
        .filter(password_reset_tokens::Column::Used.eq(false))
        .exec(conn)
        .await?;
    if claimed.rows_affected == 0 {
        return Ok(None);
    }

    let updated = users::Entity::update_many()
        .col_expr(users::Column::PasswordHash, Expr::value(new_password_hash))
        .col_expr(
            users::Column::UpdatedAt,
            Expr::value(Utc::now().fixed_offset()),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;
    if updated.rows_affected == 0 {
        return Ok(None);
    }

    let revoked = refresh_tokens::Entity::delete_many()
        .filter(refresh_tokens::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;

    Ok(Some(revoked.rows_affected))
}
