use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::course::adapter::outgoing::sea_orm_entity::{lessons, modules};
use crate::modules::progress::application::domain::{
    plan_enrollment, CourseProgress, CourseTree, LessonNode, LessonProgress, ModuleNode,
    ModuleProgress, ProgressPlan, ProgressSnapshot,
};
use crate::modules::progress::application::ports::outgoing::{
    LockedCourse, ProgressRepository, ProgressRepositoryError,
};

use super::sea_orm_entity::{course_progress, lesson_progress, module_progress};

fn map_db_err(e: DbErr) -> ProgressRepositoryError {
    ProgressRepositoryError::DatabaseError(e.to_string())
}

pub(crate) fn lesson_row(model: lesson_progress::Model) -> LessonProgress {
    LessonProgress {
        lesson_id: model.lesson_id,
        is_locked: model.is_locked,
        is_completed: model.is_completed,
        position: model.position,
        completed_at: model.completed_at.map(|t| t.with_timezone(&Utc)),
    }
}

pub(crate) fn module_row(model: module_progress::Model) -> ModuleProgress {
    ModuleProgress {
        module_id: model.module_id,
        is_locked: model.is_locked,
        is_completed: model.is_completed,
        progress_percent: model.progress_percent,
        completed_at: model.completed_at.map(|t| t.with_timezone(&Utc)),
    }
}

pub(crate) fn course_row(model: course_progress::Model) -> CourseProgress {
    CourseProgress {
        course_id: model.course_id,
        progress_percent: model.progress_percent,
        is_completed: model.is_completed,
        current_module_id: model.current_module_id,
        completed_at: model.completed_at.map(|t| t.with_timezone(&Utc)),
    }
}

/// Stored course rows of one user, keyed by course id.
pub(crate) async fn course_rows_for<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    course_ids: Vec<i32>,
) -> Result<HashMap<i32, CourseProgress>, DbErr> {
    if course_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(course_progress::Entity::find()
        .filter(course_progress::Column::UserId.eq(user_id))
        .filter(course_progress::Column::CourseId.is_in(course_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.course_id, course_row(c)))
        .collect())
}

pub(crate) async fn module_rows_for<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    module_ids: Vec<i32>,
) -> Result<HashMap<i32, ModuleProgress>, DbErr> {
    if module_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(module_progress::Entity::find()
        .filter(module_progress::Column::UserId.eq(user_id))
        .filter(module_progress::Column::ModuleId.is_in(module_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.module_id, module_row(m)))
        .collect())
}

pub(crate) async fn lesson_rows_for<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    lesson_ids: Vec<i32>,
) -> Result<HashMap<i32, LessonProgress>, DbErr> {
    if lesson_ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(lesson_progress::Entity::find()
        .filter(lesson_progress::Column::UserId.eq(user_id))
        .filter(lesson_progress::Column::LessonId.is_in(lesson_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|l| (l.lesson_id, lesson_row(l)))
        .collect())
}

/// Modules and lessons of a course, ordered.
pub(crate) async fn load_tree<C: ConnectionTrait>(
    conn: &C,
    course_id: i32,
) -> Result<CourseTree, DbErr> {
    let module_rows = modules::Entity::find()
        .filter(modules::Column::CourseId.eq(course_id))
        .order_by_asc(modules::Column::OrderIndex)
        .all(conn)
        .await?;

    let module_ids: Vec<i32> = module_rows.iter().map(|m| m.id).collect();
    let lesson_rows = if module_ids.is_empty() {
        Vec::new()
    } else {
        lessons::Entity::find()
            .filter(lessons::Column::ModuleId.is_in(module_ids))
            .order_by_asc(lessons::Column::OrderIndex)
            .all(conn)
            .await?
    };

    let mut by_module: HashMap<i32, Vec<LessonNode>> = HashMap::new();
    for lesson in lesson_rows {
        by_module.entry(lesson.module_id).or_default().push(LessonNode {
            id: lesson.id,
            order_index: lesson.order_index,
        });
    }

    let nodes = module_rows
        .into_iter()
        .map(|m| ModuleNode {
            id: m.id,
            order_index: m.order_index,
            lessons: by_module.remove(&m.id).unwrap_or_default(),
        })
        .collect();

    Ok(CourseTree::new(course_id, nodes))
}

/// Upserts every row of the plan on its (user, node) key.
pub(crate) async fn apply_plan<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    plan: &ProgressPlan,
) -> Result<(), DbErr> {
    for row in &plan.lessons {
        lesson_progress::Entity::insert(lesson_progress::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            lesson_id: Set(row.lesson_id),
            is_locked: Set(row.is_locked),
            is_completed: Set(row.is_completed),
            position: Set(row.position),
            completed_at: Set(row.completed_at.map(|t| t.fixed_offset())),
            updated_at: NotSet,
        })
        .on_conflict(
            OnConflict::columns([
                lesson_progress::Column::UserId,
                lesson_progress::Column::LessonId,
            ])
            .update_columns([
                lesson_progress::Column::IsLocked,
                lesson_progress::Column::IsCompleted,
                lesson_progress::Column::Position,
                lesson_progress::Column::CompletedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    for row in &plan.modules {
        module_progress::Entity::insert(module_progress::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            module_id: Set(row.module_id),
            is_locked: Set(row.is_locked),
            is_completed: Set(row.is_completed),
            progress_percent: Set(row.progress_percent),
            completed_at: Set(row.completed_at.map(|t| t.fixed_offset())),
            updated_at: NotSet,
        })
        .on_conflict(
            OnConflict::columns([
                module_progress::Column::UserId,
                module_progress::Column::ModuleId,
            ])
            .update_columns([
                module_progress::Column::IsLocked,
                module_progress::Column::IsCompleted,
                module_progress::Column::ProgressPercent,
                module_progress::Column::CompletedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    if let Some(row) = &plan.course {
        course_progress::Entity::insert(course_progress::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            course_id: Set(row.course_id),
            progress_percent: Set(row.progress_percent),
            is_completed: Set(row.is_completed),
            current_module_id: Set(row.current_module_id),
            completed_at: Set(row.completed_at.map(|t| t.fixed_offset())),
            updated_at: NotSet,
        })
        .on_conflict(
            OnConflict::columns([
                course_progress::Column::UserId,
                course_progress::Column::CourseId,
            ])
            .update_columns([
                course_progress::Column::ProgressPercent,
                course_progress::Column::IsCompleted,
                course_progress::Column::CurrentModuleId,
                course_progress::Column::CompletedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }

    Ok(())
}

/// Creates the starting progress rows for a newly purchased course.
/// Returns `false` when the course has no modules.
pub(crate) async fn enroll<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    course_id: i32,
) -> Result<bool, DbErr> {
    let tree = load_tree(conn, course_id).await?;
    match plan_enrollment(&tree) {
        Some(plan) => {
            apply_plan(conn, user_id, &plan).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[derive(Clone, Debug)]
pub struct ProgressRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProgressRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProgressRepository for ProgressRepositoryPostgres {
    async fn course_of_lesson(&self, lesson_id: i32) -> Result<Option<i32>, ProgressRepositoryError> {
        lessons::Entity::find_by_id(lesson_id)
            .join(JoinType::InnerJoin, lessons::Relation::Modules.def())
            .select_only()
            .column(modules::Column::CourseId)
            .into_tuple::<i32>()
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn course_of_module(&self, module_id: i32) -> Result<Option<i32>, ProgressRepositoryError> {
        Ok(modules::Entity::find_by_id(module_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(|m| m.course_id))
    }

    async fn save_position(
        &self,
        user_id: Uuid,
        lesson_id: i32,
        position: i32,
    ) -> Result<Option<LessonProgress>, ProgressRepositoryError> {
        let updated = lesson_progress::Entity::update_many()
            .col_expr(lesson_progress::Column::Position, Expr::value(position))
            .filter(lesson_progress::Column::UserId.eq(user_id))
            .filter(lesson_progress::Column::LessonId.eq(lesson_id))
            .filter(lesson_progress::Column::IsLocked.eq(false))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next().map(lesson_row))
    }

    async fn lock_course(
        &self,
        user_id: Uuid,
        course_id: i32,
    ) -> Result<Box<dyn LockedCourse>, ProgressRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        match load_locked(&txn, user_id, course_id).await {
            Ok((tree, snapshot)) => Ok(Box::new(PostgresLockedCourse {
                txn,
                user_id,
                tree,
                snapshot,
            })),
            Err(e) => {
                let _ = txn.rollback().await;
                Err(map_db_err(e))
            }
        }
    }
}

/// Locks the user's course row first, so completions of the same course
/// run one after another and each plans from the other's committed rows.
async fn load_locked(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    course_id: i32,
) -> Result<(CourseTree, ProgressSnapshot), DbErr> {
    let course = course_progress::Entity::find()
        .filter(course_progress::Column::UserId.eq(user_id))
        .filter(course_progress::Column::CourseId.eq(course_id))
        .lock_exclusive()
        .one(txn)
        .await?
        .map(course_row);

    let tree = load_tree(txn, course_id).await?;
    let module_ids: Vec<i32> = tree.modules.iter().map(|m| m.id).collect();
    let lesson_ids: Vec<i32> = tree
        .modules
        .iter()
        .flat_map(|m| m.lessons.iter().map(|l| l.id))
        .collect();

    let snapshot = ProgressSnapshot {
        course,
        modules: module_rows_for(txn, user_id, module_ids).await?,
        lessons: lesson_rows_for(txn, user_id, lesson_ids).await?,
    };

    Ok((tree, snapshot))
}

pub struct PostgresLockedCourse {
    txn: DatabaseTransaction,
    user_id: Uuid,
    tree: CourseTree,
    snapshot: ProgressSnapshot,
}

#[async_trait]
impl LockedCourse for PostgresLockedCourse {
    fn tree(&self) -> &CourseTree {
        &self.tree
    }

    fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    async fn commit(self: Box<Self>, plan: &ProgressPlan) -> Result<(), ProgressRepositoryError> {
        let PostgresLockedCourse { txn, user_id, .. } = *self;
        if let Err(e) = apply_plan(&txn, user_id, plan).await {
            let _ = txn.rollback().await;
            return Err(map_db_err(e));
        }
        txn.commit().await.map_err(map_db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::Value;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    fn exec(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    fn module(id: i32, order_index: i32) -> modules::Model {
        let now = Utc::now().fixed_offset();
        modules::Model {
            id,
            course_id: 3,
            title: format!("Module {id}"),
            description: None,
            image_url: None,
            order_index,
            created_at: now,
            updated_at: now,
        }
    }

    fn lesson(id: i32, module_id: i32, order_index: i32) -> lessons::Model {
        let now = Utc::now().fixed_offset();
        lessons::Model {
            id,
            module_id,
            title: format!("Lesson {id}"),
            description: None,
            video_url: None,
            image_url: None,
            duration: 300,
            order_index,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_load_tree_groups_lessons_by_module() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![module(1, 0), module(2, 1)]])
            .append_query_results([vec![lesson(10, 1, 0), lesson(20, 2, 0), lesson(11, 1, 1)]])
            .into_connection();

        let tree = load_tree(&db, 3).await.unwrap();

        assert_eq!(tree.modules.len(), 2);
        let first: Vec<i32> = tree.modules[0].lessons.iter().map(|l| l.id).collect();
        assert_eq!(first, vec![10, 11]);
        assert_eq!(tree.modules[1].lessons[0].id, 20);
    }

    #[tokio::test]
    async fn test_enroll_without_modules_writes_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<modules::Model>::new()])
            .into_connection();

        assert!(!enroll(&db, Uuid::new_v4(), 3).await.unwrap());
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_enroll_upserts_three_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![module(1, 0)]])
            .append_query_results([vec![lesson(10, 1, 0), lesson(11, 1, 1)]])
            .append_exec_results([exec(1), exec(1), exec(1)])
            .into_connection();

        assert!(enroll(&db, Uuid::new_v4(), 3).await.unwrap());

        let log = db.into_transaction_log();
        // two selects and one upsert per lesson, module and course row
        assert_eq!(log.len(), 5);
        let sql = format!("{:?}", log[2]);
        assert!(sql.contains("ON CONFLICT"));
    }

    #[tokio::test]
    async fn test_course_of_lesson_reads_joined_column() {
        let row: BTreeMap<&str, Value> = BTreeMap::from([("course_id", Value::Int(Some(3)))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();
        let repo = ProgressRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.course_of_lesson(10).await.unwrap(), Some(3));
    }

    fn lesson_progress_model(
        lesson_id: i32,
        is_completed: bool,
        position: i32,
    ) -> lesson_progress::Model {
        let now = Utc::now().fixed_offset();
        lesson_progress::Model {
            id: lesson_id,
            user_id: Uuid::new_v4(),
            lesson_id,
            is_locked: false,
            is_completed,
            position,
            completed_at: is_completed.then_some(now),
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_save_position_touches_only_position_of_unlocked_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lesson_progress_model(10, true, 95)]])
            .into_connection();

        let db = Arc::new(db);

        let repo = ProgressRepositoryPostgres::new(db.clone());
        let row = repo
            .save_position(Uuid::new_v4(), 10, 95)
            .await
            .unwrap()
            .unwrap();
        drop(repo);

        assert_eq!(row.position, 95);
        assert!(row.is_completed);
        let sql = format!("{:?}", Arc::try_unwrap(db).unwrap().into_transaction_log());
        assert!(sql.contains("RETURNING"));
        assert!(sql.contains("is_locked"));
        assert!(!sql.contains("ON CONFLICT"));
        assert!(!sql.contains(r#"SET \"is_completed\""#));
    }

    #[tokio::test]
    async fn test_save_position_on_locked_lesson_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<lesson_progress::Model>::new()])
            .into_connection();
        let repo = ProgressRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.save_position(Uuid::new_v4(), 12, 5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_locked_course_reads_and_writes_in_one_transaction() {
        let now = Utc::now().fixed_offset();
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_progress::Model {
                id: 1,
                user_id,
                course_id: 3,
                progress_percent: 0,
                is_completed: false,
                current_module_id: Some(1),
                completed_at: None,
                updated_at: now,
            }]])
            .append_query_results([vec![module(1, 0)]])
            .append_query_results([vec![lesson(10, 1, 0), lesson(11, 1, 1)]])
            .append_query_results([vec![module_progress::Model {
                id: 1,
                user_id,
                module_id: 1,
                is_locked: false,
                is_completed: false,
                progress_percent: 50,
                completed_at: None,
                updated_at: now,
            }]])
            .append_query_results([vec![
                lesson_progress_model(10, true, 0),
                lesson_progress_model(11, false, 40),
            ]])
            .append_exec_results([exec(1)])
            .into_connection();
        let db = Arc::new(db);
        let repo = ProgressRepositoryPostgres::new(db.clone());

        let locked = repo.lock_course(user_id, 3).await.unwrap();
        assert!(locked.snapshot().lesson(10).is_completed);
        assert_eq!(locked.snapshot().module(1).progress_percent, 50);
        assert_eq!(locked.tree().modules[0].lessons.len(), 2);

        let plan = ProgressPlan {
            lessons: vec![LessonProgress {
                is_completed: true,
                completed_at: Some(Utc::now()),
                ..LessonProgress::unlocked(11)
            }],
            ..Default::default()
        };
        locked.commit(&plan).await.unwrap();
        drop(repo);

        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        assert_eq!(log.len(), 1, "snapshot and upserts share one transaction");
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("FOR UPDATE"));
        assert!(sql.contains("ON CONFLICT"));
    }
}
