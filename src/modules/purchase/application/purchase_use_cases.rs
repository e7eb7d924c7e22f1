use std::sync::Arc;

use crate::modules::purchase::application::ports::incoming::use_cases::PurchaseCoursesUseCase;

#[derive(Clone)]
pub struct PurchaseUseCases {
    pub purchase: Arc<dyn PurchaseCoursesUseCase + Send + Sync>,
}
