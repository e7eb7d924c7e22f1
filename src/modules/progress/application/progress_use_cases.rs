use std::sync::Arc;

use crate::modules::progress::application::ports::incoming::use_cases::{
    CompleteLessonUseCase, CompleteModuleUseCase, UpdateLessonPositionUseCase,
};

#[derive(Clone)]
pub struct ProgressUseCases {
    pub update_position: Arc<dyn UpdateLessonPositionUseCase + Send + Sync>,
    pub complete_lesson: Arc<dyn CompleteLessonUseCase + Send + Sync>,
    pub complete_module: Arc<dyn CompleteModuleUseCase + Send + Sync>,
}
