pub mod reviews;

pub use reviews::{
    CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase, ListCourseReviewsUseCase,
    ListReviewsUseCase, ReviewError, ReviewPhotos, UpdateReviewUseCase,
};
