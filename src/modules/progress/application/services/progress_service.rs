use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::modules::progress::application::domain::{
    plan_lesson_completion, plan_module_completion, CascadeError, CompleteLessonResult,
    CompleteModuleResult, LessonProgress,
};
use crate::modules::progress::application::ports::incoming::use_cases::{
    CompleteLessonUseCase, CompleteModuleUseCase, ProgressError, UpdateLessonPositionUseCase,
};
use crate::modules::progress::application::ports::outgoing::{
    ProgressRepository, ProgressRepositoryError,
};
use crate::modules::purchase::application::ports::outgoing::CourseAccess;

impl From<ProgressRepositoryError> for ProgressError {
    fn from(err: ProgressRepositoryError) -> Self {
        ProgressError::RepositoryError(err.to_string())
    }
}

impl From<CascadeError> for ProgressError {
    fn from(err: CascadeError) -> Self {
        match err {
            CascadeError::UnknownLesson => ProgressError::LessonNotFound,
            CascadeError::UnknownModule => ProgressError::ModuleNotFound,
            CascadeError::EmptyModule => ProgressError::ModuleHasNoLessons,
        }
    }
}

pub struct ProgressService {
    repository: Arc<dyn ProgressRepository + Send + Sync>,
    access: Arc<dyn CourseAccess + Send + Sync>,
}

impl ProgressService {
    pub fn new(
        repository: Arc<dyn ProgressRepository + Send + Sync>,
        access: Arc<dyn CourseAccess + Send + Sync>,
    ) -> Self {
        Self { repository, access }
    }

    async fn ensure_purchased(&self, user_id: Uuid, course_id: i32) -> Result<(), ProgressError> {
        let owned = self
            .access
            .has_purchased(user_id, course_id)
            .await
            .map_err(|e| ProgressError::RepositoryError(e.to_string()))?;
        if owned {
            Ok(())
        } else {
            Err(ProgressError::NotPurchased)
        }
    }

    /// Resolves the lesson's course and checks ownership.
    async fn lesson_course(&self, user_id: Uuid, lesson_id: i32) -> Result<i32, ProgressError> {
        let course_id = self
            .repository
            .course_of_lesson(lesson_id)
            .await?
            .ok_or(ProgressError::LessonNotFound)?;
        self.ensure_purchased(user_id, course_id).await?;
        Ok(course_id)
    }
}

#[async_trait]
impl UpdateLessonPositionUseCase for ProgressService {
    async fn execute(
        &self,
        user_id: Uuid,
        lesson_id: i32,
        position: i64,
    ) -> Result<LessonProgress, ProgressError> {
        let position = i32::try_from(position).map_err(|_| ProgressError::InvalidPosition)?;
        if position < 0 {
            return Err(ProgressError::InvalidPosition);
        }

        self.lesson_course(user_id, lesson_id).await?;

        self.repository
            .save_position(user_id, lesson_id, position)
            .await?
            .ok_or(ProgressError::LessonLocked)
    }
}

#[async_trait]
impl CompleteLessonUseCase for ProgressService {
    async fn execute(
        &self,
        user_id: Uuid,
        lesson_id: i32,
    ) -> Result<CompleteLessonResult, ProgressError> {
        let course_id = self.lesson_course(user_id, lesson_id).await?;

        let locked = self.repository.lock_course(user_id, course_id).await?;
        if locked.snapshot().lesson(lesson_id).is_locked {
            return Err(ProgressError::LessonLocked);
        }

        let (plan, result) =
            plan_lesson_completion(locked.tree(), locked.snapshot(), lesson_id, Utc::now())?;
        locked.commit(&plan).await?;

        info!(
            user_id = %user_id,
            lesson_id,
            module_completed = result.module_completed,
            course_completed = result.course_completed,
            "Lesson completed"
        );
        Ok(result)
    }
}

#[async_trait]
impl CompleteModuleUseCase for ProgressService {
    async fn execute(
        &self,
        user_id: Uuid,
        module_id: i32,
    ) -> Result<CompleteModuleResult, ProgressError> {
        let course_id = self
            .repository
            .course_of_module(module_id)
            .await?
            .ok_or(ProgressError::ModuleNotFound)?;
        self.ensure_purchased(user_id, course_id).await?;

        let locked = self.repository.lock_course(user_id, course_id).await?;
        if locked.snapshot().module(module_id).is_locked {
            return Err(ProgressError::ModuleLocked);
        }

        let (plan, result) =
            plan_module_completion(locked.tree(), locked.snapshot(), module_id, Utc::now())?;
        locked.commit(&plan).await?;

        info!(
            user_id = %user_id,
            module_id,
            lessons = result.lessons_completed,
            "Module completed"
        );
        Ok(result)
    }
}
