use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::course::application::domain::{
    neighbours, Benefit, Course, CourseDetail, Equipment, Lesson, LessonModuleRef,
    LessonWithProgress, Module, ModuleSummary, ModuleWithLessons, PurchasedCourse, TitleRef,
    UserCourseView, UserLessonView, UserModuleView,
};
use crate::modules::course::application::ports::outgoing::{CourseQuery, CourseQueryError};
use crate::modules::progress::adapter::outgoing::progress_repository_postgres::{
    course_rows_for, lesson_rows_for, module_rows_for,
};
use crate::modules::progress::application::domain::{LessonProgress, ModuleProgress};
use crate::modules::purchase::adapter::outgoing::sea_orm_entity::purchases;
use crate::modules::review::adapter::outgoing::review_repository_postgres::course_reviews;

use super::sea_orm_entity::{
    benefits, course_benefits, course_equipment, courses, equipment, lesson_equipment, lessons,
    module_equipment, modules,
};

fn map_db_err(e: DbErr) -> CourseQueryError {
    CourseQueryError::DatabaseError(e.to_string())
}

fn course_from(model: courses::Model) -> Result<Course, DbErr> {
    let target_audience: Vec<String> = serde_json::from_value(model.target_audience)
        .map_err(|e| DbErr::Json(format!("courses.target_audience: {e}")))?;

    Ok(Course {
        id: model.id,
        title: model.title,
        description: model.description,
        additional_description: model.additional_description,
        target_audience,
        level: model.level,
        duration: model.duration,
        price: model.price,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn module_from(model: modules::Model) -> Module {
    Module {
        id: model.id,
        course_id: model.course_id,
        title: model.title,
        description: model.description,
        image_url: model.image_url,
        order_index: model.order_index,
    }
}

fn lesson_from(model: lessons::Model) -> Lesson {
    Lesson {
        id: model.id,
        module_id: model.module_id,
        title: model.title,
        description: model.description,
        video_url: model.video_url,
        image_url: model.image_url,
        duration: model.duration,
        order_index: model.order_index,
    }
}

#[derive(Debug, FromQueryResult)]
struct LessonCount {
    module_id: i32,
    lesson_count: i64,
}

#[derive(Debug, Clone, Copy)]
enum EquipmentOwner {
    Course,
    Module,
    Lesson,
}

struct EquipmentLink {
    equipment_id: i32,
    quantity: i32,
    notes: Option<String>,
}

async fn equipment_links<C: ConnectionTrait>(
    conn: &C,
    owner: EquipmentOwner,
    id: i32,
) -> Result<Vec<EquipmentLink>, DbErr> {
    Ok(match owner {
        EquipmentOwner::Course => course_equipment::Entity::find()
            .filter(course_equipment::Column::CourseId.eq(id))
            .order_by_asc(course_equipment::Column::EquipmentId)
            .all(conn)
            .await?
            .into_iter()
            .map(|l| EquipmentLink {
                equipment_id: l.equipment_id,
                quantity: l.quantity,
                notes: l.notes,
            })
            .collect(),
        EquipmentOwner::Module => module_equipment::Entity::find()
            .filter(module_equipment::Column::ModuleId.eq(id))
            .order_by_asc(module_equipment::Column::EquipmentId)
            .all(conn)
            .await?
            .into_iter()
            .map(|l| EquipmentLink {
                equipment_id: l.equipment_id,
                quantity: l.quantity,
                notes: l.notes,
            })
            .collect(),
        EquipmentOwner::Lesson => lesson_equipment::Entity::find()
            .filter(lesson_equipment::Column::LessonId.eq(id))
            .order_by_asc(lesson_equipment::Column::EquipmentId)
            .all(conn)
            .await?
            .into_iter()
            .map(|l| EquipmentLink {
                equipment_id: l.equipment_id,
                quantity: l.quantity,
                notes: l.notes,
            })
            .collect(),
    })
}

async fn equipment_of<C: ConnectionTrait>(
    conn: &C,
    owner: EquipmentOwner,
    id: i32,
) -> Result<Vec<Equipment>, DbErr> {
    let links = equipment_links(conn, owner, id).await?;
    if links.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = links.iter().map(|l| l.equipment_id).collect();
    let items: HashMap<i32, equipment::Model> = equipment::Entity::find()
        .filter(equipment::Column::Id.is_in(ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    Ok(links
        .into_iter()
        .filter_map(|link| {
            let item = items.get(&link.equipment_id)?;
            Some(Equipment {
                id: item.id,
                name: item.name.clone(),
                description: item.description.clone(),
                image_url: item.image_url.clone(),
                quantity: link.quantity,
                notes: link.notes,
            })
        })
        .collect())
}

async fn benefits_of<C: ConnectionTrait>(conn: &C, course_id: i32) -> Result<Vec<Benefit>, DbErr> {
    let ids: Vec<i32> = course_benefits::Entity::find()
        .filter(course_benefits::Column::CourseId.eq(course_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|l| l.benefit_id)
        .collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(benefits::Entity::find()
        .filter(benefits::Column::Id.is_in(ids))
        .order_by_asc(benefits::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(|b| Benefit {
            id: b.id,
            name: b.name,
            description: b.description,
            image_url: b.image_url,
        })
        .collect())
}

async fn modules_of<C: ConnectionTrait>(conn: &C, course_id: i32) -> Result<Vec<Module>, DbErr> {
    Ok(modules::Entity::find()
        .filter(modules::Column::CourseId.eq(course_id))
        .order_by_asc(modules::Column::OrderIndex)
        .all(conn)
        .await?
        .into_iter()
        .map(module_from)
        .collect())
}

async fn lessons_of<C: ConnectionTrait>(
    conn: &C,
    module_ids: Vec<i32>,
) -> Result<Vec<Lesson>, DbErr> {
    if module_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(lessons::Entity::find()
        .filter(lessons::Column::ModuleId.is_in(module_ids))
        .order_by_asc(lessons::Column::OrderIndex)
        .all(conn)
        .await?
        .into_iter()
        .map(lesson_from)
        .collect())
}

async fn has_purchased<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    course_id: i32,
) -> Result<bool, DbErr> {
    Ok(purchases::Entity::find()
        .filter(purchases::Column::UserId.eq(user_id))
        .filter(purchases::Column::CourseId.eq(course_id))
        .one(conn)
        .await?
        .is_some())
}

/// Pairs each lesson with the user's row, or a locked placeholder.
fn with_progress(
    lessons: Vec<Lesson>,
    rows: &mut HashMap<i32, LessonProgress>,
) -> Vec<LessonWithProgress> {
    lessons
        .into_iter()
        .map(|lesson| {
            let progress = rows
                .remove(&lesson.id)
                .unwrap_or_else(|| LessonProgress::locked(lesson.id));
            LessonWithProgress { lesson, progress }
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct CourseQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CourseQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load_detail(&self, course_id: i32) -> Result<Option<CourseDetail>, DbErr> {
        let db = &*self.db;
        let Some(course) = courses::Entity::find_by_id(course_id).one(db).await? else {
            return Ok(None);
        };
        let course = course_from(course)?;

        let modules = modules_of(db, course_id).await?;
        let module_ids: Vec<i32> = modules.iter().map(|m| m.id).collect();
        let counts: HashMap<i32, i64> = if module_ids.is_empty() {
            HashMap::new()
        } else {
            lessons::Entity::find()
                .select_only()
                .column(lessons::Column::ModuleId)
                .column_as(lessons::Column::Id.count(), "lesson_count")
                .filter(lessons::Column::ModuleId.is_in(module_ids))
                .group_by(lessons::Column::ModuleId)
                .into_model::<LessonCount>()
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.module_id, c.lesson_count))
                .collect()
        };

        let modules = modules
            .into_iter()
            .map(|module| ModuleSummary {
                lesson_count: counts.get(&module.id).copied().unwrap_or(0),
                module,
            })
            .collect();

        Ok(Some(CourseDetail {
            course,
            modules,
            equipment: equipment_of(db, EquipmentOwner::Course, course_id).await?,
            benefits: benefits_of(db, course_id).await?,
            reviews: course_reviews(db, course_id).await?,
        }))
    }

    async fn load_purchased(&self, user_id: Uuid) -> Result<Vec<PurchasedCourse>, DbErr> {
        let db = &*self.db;
        let mut course_ids: Vec<i32> = purchases::Entity::find()
            .filter(purchases::Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|p| p.course_id)
            .collect();
        course_ids.sort_unstable();
        course_ids.dedup();
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let courses = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids.clone()))
            .order_by_asc(courses::Column::Id)
            .all(db)
            .await?;

        let mut modules_by_course: HashMap<i32, Vec<TitleRef>> = HashMap::new();
        for module in modules::Entity::find()
            .filter(modules::Column::CourseId.is_in(course_ids.clone()))
            .order_by_asc(modules::Column::OrderIndex)
            .all(db)
            .await?
        {
            modules_by_course
                .entry(module.course_id)
                .or_default()
                .push(TitleRef {
                    id: module.id,
                    title: module.title,
                });
        }

        let mut progress = course_rows_for(db, user_id, course_ids).await?;

        courses
            .into_iter()
            .map(|model| {
                let id = model.id;
                Ok(PurchasedCourse {
                    course: course_from(model)?,
                    modules: modules_by_course.remove(&id).unwrap_or_default(),
                    progress: progress.remove(&id),
                })
            })
            .collect()
    }

    async fn load_user_course(
        &self,
        user_id: Uuid,
        course_id: i32,
    ) -> Result<Option<UserCourseView>, DbErr> {
        let db = &*self.db;
        let Some(course) = courses::Entity::find_by_id(course_id).one(db).await? else {
            return Ok(None);
        };
        let course = course_from(course)?;
        let purchased = has_purchased(db, user_id, course_id).await?;

        let modules = modules_of(db, course_id).await?;
        let module_ids: Vec<i32> = modules.iter().map(|m| m.id).collect();
        let lessons = lessons_of(db, module_ids.clone()).await?;
        let lesson_ids: Vec<i32> = lessons.iter().map(|l| l.id).collect();

        let progress = course_rows_for(db, user_id, vec![course_id])
            .await?
            .remove(&course_id);
        let mut module_rows = module_rows_for(db, user_id, module_ids).await?;
        let mut lesson_rows = lesson_rows_for(db, user_id, lesson_ids).await?;

        let mut lessons_by_module: HashMap<i32, Vec<Lesson>> = HashMap::new();
        for lesson in lessons {
            lessons_by_module
                .entry(lesson.module_id)
                .or_default()
                .push(lesson);
        }

        let current_module = progress
            .as_ref()
            .and_then(|p| p.current_module_id)
            .and_then(|id| modules.iter().find(|m| m.id == id))
            .map(|m| TitleRef {
                id: m.id,
                title: m.title.clone(),
            });

        let modules = modules
            .into_iter()
            .map(|module| {
                let lessons = lessons_by_module.remove(&module.id).unwrap_or_default();
                ModuleWithLessons {
                    progress: module_rows
                        .remove(&module.id)
                        .unwrap_or_else(|| ModuleProgress::locked(module.id)),
                    lessons: with_progress(lessons, &mut lesson_rows),
                    module,
                }
            })
            .collect();

        Ok(Some(UserCourseView {
            course,
            has_purchased: purchased,
            progress,
            current_module,
            modules,
            equipment: equipment_of(db, EquipmentOwner::Course, course_id).await?,
            benefits: benefits_of(db, course_id).await?,
            reviews: course_reviews(db, course_id).await?,
        }))
    }

    async fn load_user_module(
        &self,
        user_id: Uuid,
        module_id: i32,
    ) -> Result<Option<UserModuleView>, DbErr> {
        let db = &*self.db;
        let Some(module) = modules::Entity::find_by_id(module_id).one(db).await? else {
            return Ok(None);
        };
        let Some(course) = courses::Entity::find_by_id(module.course_id).one(db).await? else {
            return Ok(None);
        };
        let purchased = has_purchased(db, user_id, course.id).await?;

        let lessons = lessons_of(db, vec![module_id]).await?;
        let lesson_ids: Vec<i32> = lessons.iter().map(|l| l.id).collect();
        let progress = module_rows_for(db, user_id, vec![module_id])
            .await?
            .remove(&module_id)
            .unwrap_or_else(|| ModuleProgress::locked(module_id));
        let mut lesson_rows = lesson_rows_for(db, user_id, lesson_ids).await?;

        Ok(Some(UserModuleView {
            module: module_from(module),
            has_purchased: purchased,
            course: TitleRef {
                id: course.id,
                title: course.title,
            },
            progress,
            lessons: with_progress(lessons, &mut lesson_rows),
            equipment: equipment_of(db, EquipmentOwner::Module, module_id).await?,
        }))
    }

    async fn load_user_lesson(
        &self,
        user_id: Uuid,
        lesson_id: i32,
    ) -> Result<Option<UserLessonView>, DbErr> {
        let db = &*self.db;
        let Some(lesson) = lessons::Entity::find_by_id(lesson_id).one(db).await? else {
            return Ok(None);
        };
        let Some(module) = modules::Entity::find_by_id(lesson.module_id).one(db).await? else {
            return Ok(None);
        };
        let purchased = has_purchased(db, user_id, module.course_id).await?;

        let sibling_ids: Vec<i32> = lessons::Entity::find()
            .select_only()
            .column(lessons::Column::Id)
            .filter(lessons::Column::ModuleId.eq(module.id))
            .order_by_asc(lessons::Column::OrderIndex)
            .into_tuple::<i32>()
            .all(db)
            .await?;
        let (previous_lesson_id, next_lesson_id) = neighbours(&sibling_ids, lesson_id);

        let progress = lesson_rows_for(db, user_id, vec![lesson_id])
            .await?
            .remove(&lesson_id)
            .unwrap_or_else(|| LessonProgress::locked(lesson_id));

        Ok(Some(UserLessonView {
            lesson: lesson_from(lesson),
            has_purchased: purchased,
            progress,
            equipment: equipment_of(db, EquipmentOwner::Lesson, lesson_id).await?,
            next_lesson_id,
            previous_lesson_id,
            module: LessonModuleRef {
                id: module.id,
                title: module.title,
                order_index: module.order_index,
                course_id: module.course_id,
            },
        }))
    }
}

#[async_trait]
impl CourseQuery for CourseQueryPostgres {
    async fn list_courses(&self) -> Result<Vec<Course>, CourseQueryError> {
        courses::Entity::find()
            .order_by_asc(courses::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| course_from(m).map_err(map_db_err))
            .collect()
    }

    async fn course_detail(&self, course_id: i32) -> Result<Option<CourseDetail>, CourseQueryError> {
        self.load_detail(course_id).await.map_err(map_db_err)
    }

    async fn purchased_courses(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PurchasedCourse>, CourseQueryError> {
        self.load_purchased(user_id).await.map_err(map_db_err)
    }

    async fn user_course(
        &self,
        user_id: Uuid,
        course_id: i32,
    ) -> Result<Option<UserCourseView>, CourseQueryError> {
        self.load_user_course(user_id, course_id)
            .await
            .map_err(map_db_err)
    }

    async fn user_module(
        &self,
        user_id: Uuid,
        module_id: i32,
    ) -> Result<Option<UserModuleView>, CourseQueryError> {
        self.load_user_module(user_id, module_id)
            .await
            .map_err(map_db_err)
    }

    async fn user_lesson(
        &self,
        user_id: Uuid,
        lesson_id: i32,
    ) -> Result<Option<UserLessonView>, CourseQueryError> {
        self.load_user_lesson(user_id, lesson_id)
            .await
            .map_err(map_db_err)
    }
}
