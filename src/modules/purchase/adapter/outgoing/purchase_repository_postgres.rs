use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::course::adapter::outgoing::sea_orm_entity::{courses, modules};
use crate::modules::progress::adapter::outgoing::progress_repository_postgres::enroll;
use crate::modules::purchase::application::domain::{PaymentReference, PricedCourse, Purchase};
use crate::modules::purchase::application::ports::outgoing::{
    AccessCheckError, CourseAccess, PurchaseRepository, PurchaseRepositoryError,
};
use crate::shared::db::errors::is_unique_violation;

use super::sea_orm_entity::purchases;

fn map_db_err(e: DbErr) -> PurchaseRepositoryError {
    PurchaseRepositoryError::DatabaseError(e.to_string())
}

fn purchase_from(model: purchases::Model) -> Purchase {
    Purchase {
        id: model.id,
        user_id: model.user_id,
        course_id: model.course_id,
        amount: model.amount,
        payment_method: model.payment_method,
        payment_id: model.payment_id,
        purchase_date: model.purchase_date.with_timezone(&Utc),
    }
}

#[derive(Debug, FromQueryResult)]
struct ModuleCount {
    course_id: i32,
    module_count: i64,
}

/// Existing courses among `course_ids` with their price and module count.
pub(crate) async fn priced_courses_in<C: ConnectionTrait>(
    conn: &C,
    course_ids: &[i32],
) -> Result<Vec<PricedCourse>, DbErr> {
    let found = courses::Entity::find()
        .filter(courses::Column::Id.is_in(course_ids.to_vec()))
        .all(conn)
        .await?;
    if found.is_empty() {
        return Ok(Vec::new());
    }

    let counts: HashMap<i32, i64> = modules::Entity::find()
        .select_only()
        .column(modules::Column::CourseId)
        .column_as(modules::Column::Id.count(), "module_count")
        .filter(modules::Column::CourseId.is_in(found.iter().map(|c| c.id)))
        .group_by(modules::Column::CourseId)
        .into_model::<ModuleCount>()
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.course_id, c.module_count))
        .collect();

    Ok(found
        .into_iter()
        .map(|c| PricedCourse {
            module_count: counts.get(&c.id).copied().unwrap_or(0),
            id: c.id,
            title: c.title,
            price: c.price,
        })
        .collect())
}

pub(crate) async fn owned_ids_in<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    course_ids: &[i32],
) -> Result<Vec<i32>, DbErr> {
    if course_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(purchases::Entity::find()
        .filter(purchases::Column::UserId.eq(user_id))
        .filter(purchases::Column::CourseId.is_in(course_ids.to_vec()))
        .all(conn)
        .await?
        .into_iter()
        .map(|p| p.course_id)
        .collect())
}

/// Inserts one purchase per course and enrolls the user in each.
/// Runs on the caller's connection so it can join an open transaction.
pub(crate) async fn insert_purchases<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    courses: &[PricedCourse],
    reference: &PaymentReference,
) -> Result<Vec<Purchase>, PurchaseRepositoryError> {
    let mut created = Vec::with_capacity(courses.len());

    for course in courses {
        let model = purchases::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            course_id: Set(course.id),
            amount: Set(course.price),
            payment_method: Set(reference.method.clone()),
            payment_id: Set(reference.payment_id.clone()),
            purchase_date: Set(Utc::now().fixed_offset()),
        }
        .insert(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                PurchaseRepositoryError::AlreadyOwned(course.id)
            } else {
                map_db_err(e)
            }
        })?;

        if !enroll(conn, user_id, course.id).await.map_err(map_db_err)? {
            return Err(PurchaseRepositoryError::NoModules(course.id));
        }
        created.push(purchase_from(model));
    }

    Ok(created)
}

#[derive(Clone, Debug)]
pub struct PurchaseRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PurchaseRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PurchaseRepository for PurchaseRepositoryPostgres {
    async fn priced_courses(
        &self,
        course_ids: &[i32],
    ) -> Result<Vec<PricedCourse>, PurchaseRepositoryError> {
        priced_courses_in(&*self.db, course_ids)
            .await
            .map_err(map_db_err)
    }

    async fn owned_course_ids(
        &self,
        user_id: Uuid,
        course_ids: &[i32],
    ) -> Result<Vec<i32>, PurchaseRepositoryError> {
        owned_ids_in(&*self.db, user_id, course_ids)
            .await
            .map_err(map_db_err)
    }

    async fn purchase(
        &self,
        user_id: Uuid,
        courses: &[PricedCourse],
        reference: PaymentReference,
    ) -> Result<Vec<Purchase>, PurchaseRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        match insert_purchases(&txn, user_id, courses, &reference).await {
            Ok(created) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(created)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl CourseAccess for PurchaseRepositoryPostgres {
    async fn has_purchased(&self, user_id: Uuid, course_id: i32) -> Result<bool, AccessCheckError> {
        purchases::Entity::find()
            .filter(purchases::Column::UserId.eq(user_id))
            .filter(purchases::Column::CourseId.eq(course_id))
            .one(&*self.db)
            .await
            .map(|row| row.is_some())
            .map_err(|e| AccessCheckError(e.to_string()))
    }
}
