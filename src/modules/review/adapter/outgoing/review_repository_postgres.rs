use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, Statement,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::Sex;
use crate::modules::review::application::domain::{
    NewReview, Review, ReviewAuthor, ReviewChanges, ReviewTarget,
};
use crate::modules::review::application::ports::outgoing::{
    ReviewRepository, ReviewRepositoryError,
};

#[derive(Debug, FromQueryResult)]
struct ReviewRow {
    id: i32,
    course_id: Option<i32>,
    user_id: Option<Uuid>,
    rating: i16,
    comment: String,
    before_photo_url: Option<String>,
    after_photo_url: Option<String>,
    author_name: Option<String>,
    author_surname: Option<String>,
    author_experience: Option<String>,
    author_sex: Option<String>,
    created_at: DateTime<FixedOffset>,
    updated_at: DateTime<FixedOffset>,
    user_name: Option<String>,
    user_surname: Option<String>,
    user_image_url: Option<String>,
    user_experience: Option<String>,
    user_sex: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: i32,
}

#[derive(Debug, FromQueryResult)]
struct ExistsRow {
    exists: bool,
}

fn parse_sex(raw: Option<String>) -> Result<Option<Sex>, DbErr> {
    raw.as_deref()
        .map(str::parse::<Sex>)
        .transpose()
        .map_err(DbErr::Type)
}

impl TryFrom<ReviewRow> for Review {
    type Error = DbErr;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let user = match (row.user_id, row.user_name, row.user_surname) {
            (Some(id), Some(name), Some(surname)) => Some(ReviewAuthor {
                id,
                name,
                surname,
                image_url: row.user_image_url,
                experience: row.user_experience,
                sex: parse_sex(row.user_sex)?,
            }),
            _ => None,
        };

        Ok(Review {
            id: row.id,
            course_id: row.course_id,
            user_id: row.user_id,
            rating: row.rating,
            comment: row.comment,
            before_photo_url: row.before_photo_url,
            after_photo_url: row.after_photo_url,
            author_name: row.author_name,
            author_surname: row.author_surname,
            author_experience: row.author_experience,
            author_sex: parse_sex(row.author_sex)?,
            created_at: row.created_at.with_timezone(&Utc),
            updated_at: row.updated_at.with_timezone(&Utc),
            user,
        })
    }
}

fn select_sql(target: ReviewTarget) -> String {
    let course_col = match target {
        ReviewTarget::General => "NULL::integer AS course_id",
        ReviewTarget::Course => "r.course_id",
    };
    format!(
        r#"
        SELECT
          r.id, {course_col}, r.user_id, r.rating, r.comment,
          r.before_photo_url, r.after_photo_url,
          r.author_name, r.author_surname, r.author_experience, r.author_sex,
          r.created_at, r.updated_at,
          u.name AS user_name, u.surname AS user_surname, u.image_url AS user_image_url,
          u.experience AS user_experience, u.sex AS user_sex
        FROM {table} r
        LEFT JOIN users u ON u.id = r.user_id
        "#,
        table = target.table()
    )
}

const NEWEST_FIRST: &str = "ORDER BY r.created_at DESC, r.id DESC";

async fn fetch<C: ConnectionTrait>(
    conn: &C,
    sql: String,
    values: Vec<sea_orm::Value>,
) -> Result<Vec<Review>, DbErr> {
    ReviewRow::find_by_statement(Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        sql,
        values,
    ))
    .all(conn)
    .await?
    .into_iter()
    .map(Review::try_from)
    .collect()
}

/// Reviews of one course, newest first, with author profiles.
pub(crate) async fn course_reviews<C: ConnectionTrait>(
    conn: &C,
    course_id: i32,
) -> Result<Vec<Review>, DbErr> {
    fetch(
        conn,
        format!(
            "{} WHERE r.course_id = $1 {NEWEST_FIRST}",
            select_sql(ReviewTarget::Course)
        ),
        vec![course_id.into()],
    )
    .await
}

#[derive(Clone)]
pub struct ReviewRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> ReviewRepositoryError {
        ReviewRepositoryError::DatabaseError(e.to_string())
    }

    fn insert_stmt(review: &NewReview) -> Statement {
        let mut values: Vec<sea_orm::Value> = vec![
            review.user_id.into(),
            review.rating.into(),
            review.comment.clone().into(),
            review.before_photo_url.clone().into(),
            review.after_photo_url.clone().into(),
            review.author_name.clone().into(),
            review.author_surname.clone().into(),
            review.author_experience.clone().into(),
            review.author_sex.map(|s| s.as_str().to_string()).into(),
        ];

        let sql = match review.course_id {
            Some(course_id) => {
                values.push(course_id.into());
                r#"
                INSERT INTO course_reviews (
                  user_id, rating, comment, before_photo_url, after_photo_url,
                  author_name, author_surname, author_experience, author_sex, course_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id
                "#
            }
            None => {
                r#"
                INSERT INTO general_reviews (
                  user_id, rating, comment, before_photo_url, after_photo_url,
                  author_name, author_surname, author_experience, author_sex
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING id
                "#
            }
        };

        Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values)
    }

    async fn find_required(
        &self,
        target: ReviewTarget,
        id: i32,
    ) -> Result<Review, ReviewRepositoryError> {
        self.find(target, id)
            .await?
            .ok_or(ReviewRepositoryError::NotFound)
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryPostgres {
    async fn list(&self, target: ReviewTarget) -> Result<Vec<Review>, ReviewRepositoryError> {
        fetch(
            &*self.db,
            format!("{} {NEWEST_FIRST}", select_sql(target)),
            vec![],
        )
        .await
        .map_err(Self::map_db_err)
    }

    async fn list_for_course(&self, course_id: i32) -> Result<Vec<Review>, ReviewRepositoryError> {
        course_reviews(&*self.db, course_id)
            .await
            .map_err(Self::map_db_err)
    }

    async fn find(
        &self,
        target: ReviewTarget,
        id: i32,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut rows = fetch(
            &*self.db,
            format!("{} WHERE r.id = $1", select_sql(target)),
            vec![id.into()],
        )
        .await
        .map_err(Self::map_db_err)?;

        Ok(rows.pop())
    }

    async fn course_exists(&self, course_id: i32) -> Result<bool, ReviewRepositoryError> {
        let row = ExistsRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT EXISTS (SELECT 1 FROM courses WHERE id = $1) AS exists",
            vec![course_id.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(Self::map_db_err)?;

        Ok(row.is_some_and(|r| r.exists))
    }

    async fn create(&self, review: NewReview) -> Result<Review, ReviewRepositoryError> {
        let target = review.target();
        let inserted = IdRow::find_by_statement(Self::insert_stmt(&review))
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or_else(|| {
                ReviewRepositoryError::DatabaseError("insert returned no id".to_string())
            })?;

        self.find_required(target, inserted.id).await
    }

    async fn update(
        &self,
        target: ReviewTarget,
        id: i32,
        changes: ReviewChanges,
    ) -> Result<Review, ReviewRepositoryError> {
        if changes.is_empty() {
            return self.find_required(target, id).await;
        }

        let mut stmt = Query::update();
        stmt.table(Alias::new(target.table()))
            .value(Alias::new("updated_at"), Expr::current_timestamp())
            .and_where(Expr::col(Alias::new("id")).eq(id));

        if let (ReviewTarget::Course, Some(course_id)) = (target, changes.course_id) {
            stmt.value(Alias::new("course_id"), course_id);
        }
        if let Some(rating) = changes.rating {
            stmt.value(Alias::new("rating"), rating);
        }
        if let Some(comment) = changes.comment {
            stmt.value(Alias::new("comment"), comment);
        }
        if let Some(name) = changes.author_name {
            stmt.value(Alias::new("author_name"), name);
        }
        if let Some(surname) = changes.author_surname {
            stmt.value(Alias::new("author_surname"), surname);
        }
        if let Some(experience) = changes.author_experience {
            stmt.value(Alias::new("author_experience"), experience);
        }
        if let Some(sex) = changes.author_sex {
            stmt.value(Alias::new("author_sex"), sex.as_str());
        }
        if let Some(url) = changes.before_photo_url {
            stmt.value(Alias::new("before_photo_url"), url);
        }
        if let Some(url) = changes.after_photo_url {
            stmt.value(Alias::new("after_photo_url"), url);
        }

        let backend = self.db.get_database_backend();
        let result = self
            .db
            .execute(backend.build(&stmt))
            .await
            .map_err(Self::map_db_err)?;
        if result.rows_affected() == 0 {
            return Err(ReviewRepositoryError::NotFound);
        }

        self.find_required(target, id).await
    }

    async fn delete(&self, target: ReviewTarget, id: i32) -> Result<bool, ReviewRepositoryError> {
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                format!("DELETE FROM {} WHERE id = $1", target.table()),
                vec![id.into()],
            ))
            .await
            .map_err(Self::map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
