//! Placeholder use cases for handler tests. Anything a test does not swap in
//! panics when called, so an unexpected call fails loudly.

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::PublicUser;
use crate::modules::auth::application::ports::incoming::use_cases::{
    AuthSession, LoginCommand, LoginError, LoginUserUseCase, LogoutError, LogoutUserUseCase,
    PasswordResetError, RefreshTokenError, RefreshTokenUseCase, RegisterUserCommand,
    RegisterUserError, RegisterUserUseCase, RequestPasswordResetCommand,
    RequestPasswordResetUseCase, ResetPasswordCommand, ResetPasswordUseCase, ResetTokenStatus,
    VerifyResetTokenUseCase,
};
use crate::modules::cdn::application::domain::PublicFolder;
use crate::modules::cdn::application::ports::incoming::use_cases::{
    ServeCourseVideoUseCase, ServeFileError, ServePublicFileUseCase, ServedFile,
    UploadMediaCommand, UploadMediaError, UploadMediaUseCase, UploadedMedia,
};
use crate::modules::course::application::domain::{
    Course, CourseDetail, PurchasedCourse, UserCourseView, UserLessonView, UserModuleView,
};
use crate::modules::course::application::ports::incoming::use_cases::{
    CatalogError, GetCourseUseCase, GetUserCourseUseCase, GetUserLessonUseCase,
    GetUserModuleUseCase, LearnerError, ListCoursesUseCase, ListPurchasedCoursesUseCase,
};
use crate::modules::email::application::domain::MailDraft;
use crate::modules::email::application::ports::incoming::use_cases::{MailError, SendMailUseCase};
use crate::modules::payment::application::domain::{InvoiceStatusUpdate, Payment, UpdateOutcome};
use crate::modules::payment::application::ports::incoming::use_cases::{
    ApplyPaymentUpdateUseCase, CheckoutSession, CreatePaymentUseCase, GetPaymentStatusUseCase,
    PaymentError, VerifyWebhookUseCase,
};
use crate::modules::progress::application::domain::{
    CompleteLessonResult, CompleteModuleResult, LessonProgress,
};
use crate::modules::progress::application::ports::incoming::use_cases::{
    CompleteLessonUseCase, CompleteModuleUseCase, ProgressError, UpdateLessonPositionUseCase,
};
use crate::modules::purchase::application::domain::Purchase;
use crate::modules::purchase::application::ports::incoming::use_cases::{
    PurchaseCoursesUseCase, PurchaseError, PurchaseRequest,
};
use crate::modules::review::application::domain::{Requester, Review, ReviewForm, ReviewTarget};
use crate::modules::review::application::ports::incoming::use_cases::{
    CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase, ListCourseReviewsUseCase,
    ListReviewsUseCase, ReviewError, ReviewPhotos, UpdateReviewUseCase,
};
use crate::modules::user::application::domain::ProfileEdit;
use crate::modules::user::application::ports::incoming::use_cases::{
    GetProfileUseCase, ListUsersError, ListUsersUseCase, ProfileError, UpdateProfileUseCase,
    UploadProfileImageError, UploadProfileImageUseCase,
};
use crate::shared::http::multipart::UploadedFile;

pub struct NotUsed;

// auth

#[async_trait]
impl RegisterUserUseCase for NotUsed {
    async fn execute(&self, _: RegisterUserCommand) -> Result<AuthSession, RegisterUserError> {
        unimplemented!("register not used in this test")
    }
}

#[async_trait]
impl LoginUserUseCase for NotUsed {
    async fn execute(&self, _: LoginCommand) -> Result<AuthSession, LoginError> {
        unimplemented!("login not used in this test")
    }
}

#[async_trait]
impl RefreshTokenUseCase for NotUsed {
    async fn execute(&self, _: &str) -> Result<AuthSession, RefreshTokenError> {
        unimplemented!("refresh not used in this test")
    }
}

#[async_trait]
impl LogoutUserUseCase for NotUsed {
    async fn execute(&self, _: Option<&str>) -> Result<(), LogoutError> {
        unimplemented!("logout not used in this test")
    }
}

#[async_trait]
impl RequestPasswordResetUseCase for NotUsed {
    async fn execute(&self, _: RequestPasswordResetCommand) -> Result<(), PasswordResetError> {
        unimplemented!("password reset request not used in this test")
    }
}

#[async_trait]
impl VerifyResetTokenUseCase for NotUsed {
    async fn execute(&self, _: &str) -> Result<ResetTokenStatus, PasswordResetError> {
        unimplemented!("reset token check not used in this test")
    }
}

#[async_trait]
impl ResetPasswordUseCase for NotUsed {
    async fn execute(&self, _: ResetPasswordCommand) -> Result<(), PasswordResetError> {
        unimplemented!("password reset not used in this test")
    }
}

// user

#[async_trait]
impl ListUsersUseCase for NotUsed {
    async fn execute(&self) -> Result<Vec<PublicUser>, ListUsersError> {
        unimplemented!("user list not used in this test")
    }
}

#[async_trait]
impl GetProfileUseCase for NotUsed {
    async fn execute(&self, _: Uuid) -> Result<PublicUser, ProfileError> {
        unimplemented!("profile not used in this test")
    }
}

#[async_trait]
impl UpdateProfileUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: ProfileEdit) -> Result<PublicUser, ProfileError> {
        unimplemented!("profile update not used in this test")
    }
}

#[async_trait]
impl UploadProfileImageUseCase for NotUsed {
    async fn execute(
        &self,
        _: Uuid,
        _: UploadedFile,
    ) -> Result<PublicUser, UploadProfileImageError> {
        unimplemented!("profile image not used in this test")
    }
}

// course

#[async_trait]
impl ListCoursesUseCase for NotUsed {
    async fn execute(&self) -> Result<Vec<Course>, CatalogError> {
        unimplemented!("course list not used in this test")
    }
}

#[async_trait]
impl GetCourseUseCase for NotUsed {
    async fn execute(&self, _: i32) -> Result<CourseDetail, CatalogError> {
        unimplemented!("course detail not used in this test")
    }
}

#[async_trait]
impl ListPurchasedCoursesUseCase for NotUsed {
    async fn execute(&self, _: Uuid) -> Result<Vec<PurchasedCourse>, LearnerError> {
        unimplemented!("purchased courses not used in this test")
    }
}

#[async_trait]
impl GetUserCourseUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: i32) -> Result<UserCourseView, LearnerError> {
        unimplemented!("user course not used in this test")
    }
}

#[async_trait]
impl GetUserModuleUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: i32) -> Result<UserModuleView, LearnerError> {
        unimplemented!("user module not used in this test")
    }
}

#[async_trait]
impl GetUserLessonUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: i32) -> Result<UserLessonView, LearnerError> {
        unimplemented!("user lesson not used in this test")
    }
}

// purchase / payment

#[async_trait]
impl PurchaseCoursesUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: PurchaseRequest) -> Result<Vec<Purchase>, PurchaseError> {
        unimplemented!("purchase not used in this test")
    }
}

#[async_trait]
impl CreatePaymentUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: Vec<i32>) -> Result<CheckoutSession, PaymentError> {
        unimplemented!("payment creation not used in this test")
    }
}

#[async_trait]
impl GetPaymentStatusUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: String) -> Result<Payment, PaymentError> {
        unimplemented!("payment status not used in this test")
    }
}

#[async_trait]
impl VerifyWebhookUseCase for NotUsed {
    async fn execute(
        &self,
        _: &[u8],
        _: Option<&str>,
    ) -> Result<InvoiceStatusUpdate, PaymentError> {
        unimplemented!("webhook verification not used in this test")
    }
}

#[async_trait]
impl ApplyPaymentUpdateUseCase for NotUsed {
    async fn execute(&self, _: InvoiceStatusUpdate) -> Result<UpdateOutcome, PaymentError> {
        unimplemented!("payment update not used in this test")
    }
}

// progress

#[async_trait]
impl UpdateLessonPositionUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: i32, _: i64) -> Result<LessonProgress, ProgressError> {
        unimplemented!("lesson position not used in this test")
    }
}

#[async_trait]
impl CompleteLessonUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: i32) -> Result<CompleteLessonResult, ProgressError> {
        unimplemented!("lesson completion not used in this test")
    }
}

#[async_trait]
impl CompleteModuleUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: i32) -> Result<CompleteModuleResult, ProgressError> {
        unimplemented!("module completion not used in this test")
    }
}

// review

#[async_trait]
impl ListReviewsUseCase for NotUsed {
    async fn execute(&self, _: ReviewTarget) -> Result<Vec<Review>, ReviewError> {
        unimplemented!("review list not used in this test")
    }
}

#[async_trait]
impl ListCourseReviewsUseCase for NotUsed {
    async fn execute(&self, _: i32) -> Result<Vec<Review>, ReviewError> {
        unimplemented!("course reviews not used in this test")
    }
}

#[async_trait]
impl GetReviewUseCase for NotUsed {
    async fn execute(&self, _: ReviewTarget, _: i32) -> Result<Review, ReviewError> {
        unimplemented!("review lookup not used in this test")
    }
}

#[async_trait]
impl CreateReviewUseCase for NotUsed {
    async fn execute(
        &self,
        _: ReviewTarget,
        _: Option<Uuid>,
        _: ReviewForm,
        _: ReviewPhotos,
    ) -> Result<Review, ReviewError> {
        unimplemented!("review creation not used in this test")
    }
}

#[async_trait]
impl UpdateReviewUseCase for NotUsed {
    async fn execute(
        &self,
        _: ReviewTarget,
        _: i32,
        _: Requester,
        _: ReviewForm,
        _: ReviewPhotos,
    ) -> Result<Review, ReviewError> {
        unimplemented!("review update not used in this test")
    }
}

#[async_trait]
impl DeleteReviewUseCase for NotUsed {
    async fn execute(&self, _: ReviewTarget, _: i32, _: Requester) -> Result<(), ReviewError> {
        unimplemented!("review deletion not used in this test")
    }
}

// cdn

#[async_trait]
impl UploadMediaUseCase for NotUsed {
    async fn execute(&self, _: UploadMediaCommand) -> Result<UploadedMedia, UploadMediaError> {
        unimplemented!("media upload not used in this test")
    }
}

#[async_trait]
impl ServePublicFileUseCase for NotUsed {
    async fn execute(&self, _: PublicFolder, _: &str) -> Result<ServedFile, ServeFileError> {
        unimplemented!("public file not used in this test")
    }
}

#[async_trait]
impl ServeCourseVideoUseCase for NotUsed {
    async fn execute(&self, _: Uuid, _: i32, _: &str) -> Result<ServedFile, ServeFileError> {
        unimplemented!("course video not used in this test")
    }
}

// mail

#[async_trait]
impl SendMailUseCase for NotUsed {
    async fn execute(&self, _: MailDraft) -> Result<(), MailError> {
        unimplemented!("mail not used in this test")
    }
}
