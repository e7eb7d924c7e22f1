use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, QueryFilter, Set, Statement,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::warn;

use crate::modules::payment::application::domain::{
    InvoiceStatusUpdate, NewPayment, Payment, PaymentStatus, UpdateOutcome,
};
use crate::modules::payment::application::ports::outgoing::{
    PaymentRepository, PaymentRepositoryError,
};
use crate::modules::purchase::adapter::outgoing::purchase_repository_postgres::{
    insert_purchases, owned_ids_in, priced_courses_in,
};
use crate::modules::purchase::application::domain::PaymentReference;

use super::sea_orm_entity::payments;

pub const PAYMENT_METHOD: &str = "monobank";

fn map_db_err(e: DbErr) -> PaymentRepositoryError {
    PaymentRepositoryError::DatabaseError(e.to_string())
}

impl TryFrom<payments::Model> for Payment {
    type Error = DbErr;

    fn try_from(model: payments::Model) -> Result<Self, Self::Error> {
        let course_ids: Vec<i32> =
            serde_json::from_value(model.course_ids).map_err(|e| DbErr::Json(e.to_string()))?;
        let status = model.status.parse::<PaymentStatus>().map_err(DbErr::Custom)?;

        Ok(Payment {
            id: model.id,
            user_id: model.user_id,
            course_ids,
            amount: model.amount,
            invoice_id: model.invoice_id,
            page_url: model.page_url,
            status,
            payment_id: model.payment_id,
            modified_date: model.modified_date.map(|d| d.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct UpdatedRow {
    id: i32,
    previous_status: String,
}

/// Writes the update under a row lock, only if it is strictly newer than what is stored.
const CONDITIONAL_UPDATE: &str = r#"
    UPDATE payments p
    SET status = $2, modified_date = $3, payment_id = COALESCE($4, p.payment_id)
    FROM (SELECT id, status FROM payments WHERE invoice_id = $1 FOR UPDATE) old
    WHERE p.id = old.id
      AND (p.modified_date IS NULL OR p.modified_date < $3)
    RETURNING p.id, old.status AS previous_status
"#;

async fn find_model<C: ConnectionTrait>(
    conn: &C,
    invoice_id: &str,
) -> Result<Option<payments::Model>, DbErr> {
    payments::Entity::find()
        .filter(payments::Column::InvoiceId.eq(invoice_id))
        .one(conn)
        .await
}

#[derive(Clone, Debug)]
pub struct PaymentRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PaymentRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Grants the paid courses the user does not own yet. Courses that lost all their
    /// modules since checkout are skipped.
    async fn fulfil(
        txn: &DatabaseTransaction,
        payment: &Payment,
    ) -> Result<Vec<i32>, PaymentRepositoryError> {
        let owned = owned_ids_in(txn, payment.user_id, &payment.course_ids)
            .await
            .map_err(map_db_err)?;
        let pending: Vec<i32> = payment
            .course_ids
            .iter()
            .copied()
            .filter(|id| !owned.contains(id))
            .collect();
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let (grantable, empty): (Vec<_>, Vec<_>) = priced_courses_in(txn, &pending)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .partition(|c| c.module_count > 0);
        for course in &empty {
            warn!(
                invoice_id = %payment.invoice_id,
                course_id = course.id,
                "paid course has no modules, not granted"
            );
        }

        let reference = PaymentReference {
            method: Some(PAYMENT_METHOD.to_string()),
            payment_id: payment.payment_id.clone(),
        };
        let created = insert_purchases(txn, payment.user_id, &grantable, &reference)
            .await
            .map_err(|e| PaymentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(created.into_iter().map(|p| p.course_id).collect())
    }

    async fn apply_in(
        txn: &DatabaseTransaction,
        update: &InvoiceStatusUpdate,
    ) -> Result<UpdateOutcome, PaymentRepositoryError> {
        let updated = UpdatedRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            CONDITIONAL_UPDATE,
            vec![
                update.invoice_id.clone().into(),
                update.status.as_str().into(),
                update.modified_date.fixed_offset().into(),
                update.payment_id.clone().into(),
            ],
        ))
        .one(txn)
        .await
        .map_err(map_db_err)?;

        let Some(updated) = updated else {
            return match find_model(txn, &update.invoice_id).await.map_err(map_db_err)? {
                Some(model) => Ok(UpdateOutcome::Ignored(
                    Payment::try_from(model).map_err(map_db_err)?,
                )),
                None => Ok(UpdateOutcome::NotFound),
            };
        };

        let previous = updated
            .previous_status
            .parse::<PaymentStatus>()
            .map_err(PaymentRepositoryError::DatabaseError)?;
        let model = payments::Entity::find_by_id(updated.id)
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| {
                PaymentRepositoryError::DatabaseError("updated payment vanished".to_string())
            })?;
        let payment = Payment::try_from(model).map_err(map_db_err)?;

        let fulfilled =
            if payment.status == PaymentStatus::Success && previous != PaymentStatus::Success {
                Self::fulfil(txn, &payment).await?
            } else {
                Vec::new()
            };

        Ok(UpdateOutcome::Applied {
            payment,
            previous,
            fulfilled,
        })
    }
}

#[async_trait]
impl PaymentRepository for PaymentRepositoryPostgres {
    async fn create(&self, payment: NewPayment) -> Result<Payment, PaymentRepositoryError> {
        let now = Utc::now().fixed_offset();
        let model = payments::ActiveModel {
            id: NotSet,
            user_id: Set(payment.user_id),
            course_ids: Set(serde_json::json!(payment.course_ids)),
            amount: Set(payment.amount),
            invoice_id: Set(payment.invoice_id),
            page_url: Set(payment.page_url),
            status: Set(PaymentStatus::Created.as_str().to_string()),
            payment_id: Set(None),
            modified_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await
        .map_err(map_db_err)?;

        Payment::try_from(model).map_err(map_db_err)
    }

    async fn find_by_invoice(
        &self,
        invoice_id: &str,
    ) -> Result<Option<Payment>, PaymentRepositoryError> {
        find_model(&*self.db, invoice_id)
            .await
            .map_err(map_db_err)?
            .map(Payment::try_from)
            .transpose()
            .map_err(map_db_err)
    }

    async fn apply_update(
        &self,
        update: &InvoiceStatusUpdate,
    ) -> Result<UpdateOutcome, PaymentRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        match Self::apply_in(&txn, update).await {
            Ok(outcome) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(outcome)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                Err(e)
            }
        }
    }
}
