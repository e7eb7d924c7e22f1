use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::progress::application::domain::{
    CourseProgress, LessonProgress, ModuleProgress,
};
use crate::modules::review::application::domain::Review;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub additional_description: Option<String>,
    pub target_audience: Vec<String>,
    pub level: String,
    pub duration: String,
    /// Whole hryvnias.
    pub price: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i32,
    pub module_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    /// Seconds.
    pub duration: i32,
    pub order_index: i32,
}

/// Equipment attached to a course, module or lesson, with the link's quantity and notes.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitleRef {
    pub id: i32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    #[serde(flatten)]
    pub module: Module,
    pub lesson_count: i64,
}

/// Public course page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<ModuleSummary>,
    pub equipment: Vec<Equipment>,
    pub benefits: Vec<Benefit>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCourse {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<TitleRef>,
    pub progress: Option<CourseProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonWithProgress {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub progress: LessonProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleWithLessons {
    #[serde(flatten)]
    pub module: Module,
    pub progress: ModuleProgress,
    pub lessons: Vec<LessonWithProgress>,
}

/// A course as seen by one learner. Nodes without a stored row show as locked.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCourseView {
    #[serde(flatten)]
    pub course: Course,
    pub has_purchased: bool,
    pub progress: Option<CourseProgress>,
    pub current_module: Option<TitleRef>,
    pub modules: Vec<ModuleWithLessons>,
    pub equipment: Vec<Equipment>,
    pub benefits: Vec<Benefit>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserModuleView {
    #[serde(flatten)]
    pub module: Module,
    pub has_purchased: bool,
    pub course: TitleRef,
    pub progress: ModuleProgress,
    pub lessons: Vec<LessonWithProgress>,
    pub equipment: Vec<Equipment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonModuleRef {
    pub id: i32,
    pub title: String,
    pub order_index: i32,
    pub course_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserLessonView {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub has_purchased: bool,
    pub progress: LessonProgress,
    pub equipment: Vec<Equipment>,
    pub next_lesson_id: Option<i32>,
    pub previous_lesson_id: Option<i32>,
    pub module: LessonModuleRef,
}

/// Neighbours of `lesson_id` among lessons already sorted by `order_index`.
pub fn neighbours(ordered_ids: &[i32], lesson_id: i32) -> (Option<i32>, Option<i32>) {
    match ordered_ids.iter().position(|id| *id == lesson_id) {
        Some(i) => (
            i.checked_sub(1).map(|p| ordered_ids[p]),
            ordered_ids.get(i + 1).copied(),
        ),
        None => (None, None),
    }
}

#[cfg(test)]
pub(crate) fn sample_course(id: i32) -> Course {
    let now = Utc::now();
    Course {
        id,
        title: "Strength basics".to_string(),
        description: "Twelve weeks of progressive training".to_string(),
        additional_description: None,
        target_audience: vec!["beginners".to_string()],
        level: "beginner".to_string(),
        duration: "12 weeks".to_string(),
        price: 1500,
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}
