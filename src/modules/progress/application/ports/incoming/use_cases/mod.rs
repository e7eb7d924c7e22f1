pub mod progress;

pub use progress::{
    CompleteLessonUseCase, CompleteModuleUseCase, ProgressError, UpdateLessonPositionUseCase,
};
