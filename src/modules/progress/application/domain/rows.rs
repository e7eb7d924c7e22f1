use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One user's state on a lesson. A lesson without a stored row is locked.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub lesson_id: i32,
    pub is_locked: bool,
    pub is_completed: bool,
    /// Playback position in seconds.
    pub position: i32,
    pub completed_at: Option<DateTime<Utc>>,
}

impl LessonProgress {
    pub fn locked(lesson_id: i32) -> Self {
        Self {
            lesson_id,
            is_locked: true,
            is_completed: false,
            position: 0,
            completed_at: None,
        }
    }

    pub fn unlocked(lesson_id: i32) -> Self {
        Self {
            is_locked: false,
            ..Self::locked(lesson_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    pub module_id: i32,
    pub is_locked: bool,
    pub is_completed: bool,
    pub progress_percent: i32,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ModuleProgress {
    pub fn locked(module_id: i32) -> Self {
        Self {
            module_id,
            is_locked: true,
            is_completed: false,
            progress_percent: 0,
            completed_at: None,
        }
    }

    pub fn unlocked(module_id: i32) -> Self {
        Self {
            is_locked: false,
            ..Self::locked(module_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: i32,
    pub progress_percent: i32,
    pub is_completed: bool,
    pub current_module_id: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CourseProgress {
    pub fn started(course_id: i32, current_module_id: Option<i32>) -> Self {
        Self {
            course_id,
            progress_percent: 0,
            is_completed: false,
            current_module_id,
            completed_at: None,
        }
    }
}
