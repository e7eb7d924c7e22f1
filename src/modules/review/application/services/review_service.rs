use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::modules::cdn::application::domain::{
    extension_for, is_allowed_image, StorageKey, MAX_IMAGE_BYTES,
};
use crate::modules::cdn::application::ports::outgoing::FileStorage;
use crate::modules::review::application::domain::{
    Requester, Review, ReviewForm, ReviewTarget,
};
use crate::modules::review::application::ports::incoming::use_cases::{
    CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase, ListCourseReviewsUseCase,
    ListReviewsUseCase, ReviewError, ReviewPhotos, UpdateReviewUseCase,
};
use crate::modules::review::application::ports::outgoing::{
    ReviewRepository, ReviewRepositoryError,
};
use crate::shared::http::multipart::UploadedFile;

const REVIEW_PHOTO_FOLDER: &str = "reviews";

impl From<ReviewRepositoryError> for ReviewError {
    fn from(err: ReviewRepositoryError) -> Self {
        match err {
            ReviewRepositoryError::NotFound => ReviewError::NotFound,
            ReviewRepositoryError::DatabaseError(msg) => ReviewError::RepositoryError(msg),
        }
    }
}

/// Photos written during one request, removed again if the request fails.
#[derive(Default)]
struct StoredPhotos {
    before: Option<StorageKey>,
    after: Option<StorageKey>,
}

impl StoredPhotos {
    fn keys(&self) -> impl Iterator<Item = &StorageKey> {
        self.before.iter().chain(self.after.iter())
    }
}

fn check_photo(file: &UploadedFile) -> Result<&'static str, ReviewError> {
    if !is_allowed_image(&file.content_type) {
        return Err(ReviewError::NotAnImage);
    }
    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ReviewError::TooLarge);
    }
    extension_for(&file.content_type).ok_or(ReviewError::NotAnImage)
}

pub struct ReviewService {
    repository: Arc<dyn ReviewRepository + Send + Sync>,
    storage: Arc<dyn FileStorage + Send + Sync>,
}

impl ReviewService {
    pub fn new(
        repository: Arc<dyn ReviewRepository + Send + Sync>,
        storage: Arc<dyn FileStorage + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            storage,
        }
    }

    async fn remove_quietly(&self, key: &StorageKey) {
        if let Err(e) = self.storage.delete(key).await {
            warn!(key = %key, error = %e, "Failed to remove review photo");
        }
    }

    async fn discard(&self, stored: &StoredPhotos) {
        for key in stored.keys() {
            self.remove_quietly(key).await;
        }
    }

    async fn remove_url(&self, url: Option<&str>) {
        if let Some(key) = url.and_then(StorageKey::from_public_url) {
            self.remove_quietly(&key).await;
        }
    }

    /// Validates both photos before writing either, so a bad second file leaves nothing behind.
    async fn store_photos(&self, photos: &ReviewPhotos) -> Result<StoredPhotos, ReviewError> {
        let before_ext = photos.before.as_ref().map(check_photo).transpose()?;
        let after_ext = photos.after.as_ref().map(check_photo).transpose()?;

        let mut stored = StoredPhotos::default();
        let pending = [
            (photos.before.as_ref(), before_ext, true),
            (photos.after.as_ref(), after_ext, false),
        ];
        for (file, ext, is_before) in pending {
            let (Some(file), Some(ext)) = (file, ext) else {
                continue;
            };
            let key = match StorageKey::generate(&[REVIEW_PHOTO_FOLDER], ext) {
                Some(key) => key,
                None => {
                    self.discard(&stored).await;
                    return Err(ReviewError::Storage("invalid storage key".into()));
                }
            };
            if let Err(e) = self.storage.save(&key, &file.bytes).await {
                self.discard(&stored).await;
                return Err(ReviewError::Storage(e.to_string()));
            }
            if is_before {
                stored.before = Some(key);
            } else {
                stored.after = Some(key);
            }
        }

        Ok(stored)
    }

    async fn require_course(&self, course_id: i32) -> Result<(), ReviewError> {
        if self.repository.course_exists(course_id).await? {
            Ok(())
        } else {
            Err(ReviewError::CourseNotFound)
        }
    }

    async fn find_modifiable(
        &self,
        target: ReviewTarget,
        id: i32,
        requester: &Requester,
    ) -> Result<Review, ReviewError> {
        let review = self
            .repository
            .find(target, id)
            .await?
            .ok_or(ReviewError::NotFound)?;
        if !requester.can_modify(&review) {
            return Err(ReviewError::Forbidden);
        }
        Ok(review)
    }
}

#[async_trait]
impl ListReviewsUseCase for ReviewService {
    async fn execute(&self, target: ReviewTarget) -> Result<Vec<Review>, ReviewError> {
        Ok(self.repository.list(target).await?)
    }
}

#[async_trait]
impl ListCourseReviewsUseCase for ReviewService {
    async fn execute(&self, course_id: i32) -> Result<Vec<Review>, ReviewError> {
        Ok(self.repository.list_for_course(course_id).await?)
    }
}

#[async_trait]
impl GetReviewUseCase for ReviewService {
    async fn execute(&self, target: ReviewTarget, id: i32) -> Result<Review, ReviewError> {
        self.repository
            .find(target, id)
            .await?
            .ok_or(ReviewError::NotFound)
    }
}

#[async_trait]
impl CreateReviewUseCase for ReviewService {
    async fn execute(
        &self,
        target: ReviewTarget,
        author: Option<Uuid>,
        form: ReviewForm,
        photos: ReviewPhotos,
    ) -> Result<Review, ReviewError> {
        let mut review = form
            .into_new_review(target, author)
            .map_err(ReviewError::Validation)?;

        if author.is_none() && (review.author_name.is_none() || review.author_surname.is_none()) {
            return Err(ReviewError::AuthorRequired);
        }
        if let Some(course_id) = review.course_id {
            self.require_course(course_id).await?;
        }

        let stored = self.store_photos(&photos).await?;
        review.before_photo_url = stored.before.as_ref().map(StorageKey::public_url);
        review.after_photo_url = stored.after.as_ref().map(StorageKey::public_url);

        match self.repository.create(review).await {
            Ok(created) => {
                info!(review_id = created.id, target = ?target, "Review created");
                Ok(created)
            }
            Err(e) => {
                self.discard(&stored).await;
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl UpdateReviewUseCase for ReviewService {
    async fn execute(
        &self,
        target: ReviewTarget,
        id: i32,
        requester: Requester,
        form: ReviewForm,
        photos: ReviewPhotos,
    ) -> Result<Review, ReviewError> {
        let existing = self.find_modifiable(target, id, &requester).await?;
        let mut changes = form.into_changes(target).map_err(ReviewError::Validation)?;

        if let Some(course_id) = changes.course_id {
            self.require_course(course_id).await?;
        }

        let stored = self.store_photos(&photos).await?;
        if let Some(key) = &stored.before {
            changes.before_photo_url = Some(Some(key.public_url()));
        }
        if let Some(key) = &stored.after {
            changes.after_photo_url = Some(Some(key.public_url()));
        }
        let replace_before = changes.before_photo_url.is_some();
        let replace_after = changes.after_photo_url.is_some();

        let updated = match self.repository.update(target, id, changes).await {
            Ok(review) => review,
            Err(e) => {
                self.discard(&stored).await;
                return Err(e.into());
            }
        };

        if replace_before {
            self.remove_url(existing.before_photo_url.as_deref()).await;
        }
        if replace_after {
            self.remove_url(existing.after_photo_url.as_deref()).await;
        }

        info!(review_id = id, user_id = %requester.user_id, "Review updated");
        Ok(updated)
    }
}

#[async_trait]
impl DeleteReviewUseCase for ReviewService {
    async fn execute(
        &self,
        target: ReviewTarget,
        id: i32,
        requester: Requester,
    ) -> Result<(), ReviewError> {
        let existing = self.find_modifiable(target, id, &requester).await?;

        if !self.repository.delete(target, id).await? {
            return Err(ReviewError::NotFound);
        }
        for url in existing.photo_urls() {
            self.remove_url(Some(url)).await;
        }

        info!(review_id = id, user_id = %requester.user_id, "Review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::modules::review::application::domain::{
        sample_review, NewReview, ReviewChanges,
    };
    use crate::tests::support::storage_fakes::InMemoryStorage;
    use mockall::mock;
    use mockall::predicate::*;

    mock! {
        pub Repo {}

        #[async_trait]
        impl ReviewRepository for Repo {
            async fn list(&self, target: ReviewTarget) -> Result<Vec<Review>, ReviewRepositoryError>;
            async fn list_for_course(&self, course_id: i32) -> Result<Vec<Review>, ReviewRepositoryError>;
            async fn find(&self, target: ReviewTarget, id: i32) -> Result<Option<Review>, ReviewRepositoryError>;
            async fn course_exists(&self, course_id: i32) -> Result<bool, ReviewRepositoryError>;
            async fn create(&self, review: NewReview) -> Result<Review, ReviewRepositoryError>;
            async fn update(&self, target: ReviewTarget, id: i32, changes: ReviewChanges) -> Result<Review, ReviewRepositoryError>;
            async fn delete(&self, target: ReviewTarget, id: i32) -> Result<bool, ReviewRepositoryError>;
        }
    }

    fn photo(field: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            field: field.into(),
            original_name: "photo.jpg".into(),
            content_type: content_type.into(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    fn form(rating: &str, comment: &str) -> ReviewForm {
        ReviewForm {
            rating: Some(rating.into()),
            comment: Some(comment.into()),
            ..Default::default()
        }
    }

    fn user(id: Uuid) -> Requester {
        Requester {
            user_id: id,
            role: Role::User,
        }
    }

    fn created_from(review: NewReview) -> Review {
        Review {
            course_id: review.course_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            before_photo_url: review.before_photo_url,
            after_photo_url: review.after_photo_url,
            ..sample_review(1, None)
        }
    }

    #[tokio::test]
    async fn test_anonymous_review_requires_author_name() {
        let service = ReviewService::new(
            Arc::new(MockRepo::new()),
            Arc::new(InMemoryStorage::default()),
        );

        let result = CreateReviewUseCase::execute(
            &service,
            ReviewTarget::General,
            None,
            form("5", "Great coach"),
            ReviewPhotos::default(),
        )
        .await;

        assert_eq!(result.unwrap_err(), ReviewError::AuthorRequired);
    }

    #[tokio::test]
    async fn test_create_stores_photos_under_reviews() {
        let mut repo = MockRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|review| Ok(created_from(review)));
        let storage = Arc::new(InMemoryStorage::default());
        let service = ReviewService::new(Arc::new(repo), storage.clone());

        let photos = ReviewPhotos {
            before: Some(photo("beforePhoto", "image/jpeg")),
            after: Some(photo("afterPhoto", "image/png")),
        };
        let review = CreateReviewUseCase::execute(
            &service,
            ReviewTarget::General,
            Some(Uuid::new_v4()),
            form("4", "Solid program"),
            photos,
        )
        .await
        .unwrap();

        let before = review.before_photo_url.unwrap();
        assert!(before.starts_with("/api/cdn/reviews/") && before.ends_with(".jpg"));
        assert!(review.after_photo_url.unwrap().ends_with(".png"));
        assert_eq!(storage.keys().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_non_image_before_writing() {
        let storage = Arc::new(InMemoryStorage::default());
        let service = ReviewService::new(Arc::new(MockRepo::new()), storage.clone());

        let photos = ReviewPhotos {
            before: Some(photo("beforePhoto", "image/png")),
            after: Some(photo("afterPhoto", "application/pdf")),
        };
        let result = CreateReviewUseCase::execute(
            &service,
            ReviewTarget::General,
            Some(Uuid::new_v4()),
            form("4", "Solid program"),
            photos,
        )
        .await;

        assert_eq!(result.unwrap_err(), ReviewError::NotAnImage);
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_failed_insert_removes_written_photos() {
        let mut repo = MockRepo::new();
        repo.expect_create()
            .returning(|_| Err(ReviewRepositoryError::DatabaseError("boom".into())));
        let storage = Arc::new(InMemoryStorage::default());
        let service = ReviewService::new(Arc::new(repo), storage.clone());

        let photos = ReviewPhotos {
            before: Some(photo("beforePhoto", "image/webp")),
            after: None,
        };
        let result = CreateReviewUseCase::execute(
            &service,
            ReviewTarget::General,
            Some(Uuid::new_v4()),
            form("4", "Solid program"),
            photos,
        )
        .await;

        assert!(matches!(result, Err(ReviewError::RepositoryError(_))));
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_course_review_for_missing_course() {
        let mut repo = MockRepo::new();
        repo.expect_course_exists()
            .with(eq(77))
            .returning(|_| Ok(false));
        let service = ReviewService::new(Arc::new(repo), Arc::new(InMemoryStorage::default()));

        let result = CreateReviewUseCase::execute(
            &service,
            ReviewTarget::Course,
            Some(Uuid::new_v4()),
            ReviewForm {
                course_id: Some("77".into()),
                ..form("5", "Worth every hryvnia")
            },
            ReviewPhotos::default(),
        )
        .await;

        assert_eq!(result.unwrap_err(), ReviewError::CourseNotFound);
    }

    #[tokio::test]
    async fn test_update_by_stranger_is_forbidden() {
        let owner = Uuid::new_v4();
        let mut repo = MockRepo::new();
        repo.expect_find()
            .returning(move |_, id| Ok(Some(sample_review(id, Some(owner)))));
        repo.expect_update().never();
        let service = ReviewService::new(Arc::new(repo), Arc::new(InMemoryStorage::default()));

        let result = UpdateReviewUseCase::execute(
            &service,
            ReviewTarget::General,
            4,
            user(Uuid::new_v4()),
            form("1", "Changed my mind"),
            ReviewPhotos::default(),
        )
        .await;

        assert_eq!(result.unwrap_err(), ReviewError::Forbidden);
    }

    #[tokio::test]
    async fn test_update_replaces_and_removes_old_photo() {
        let owner = Uuid::new_v4();
        let storage = Arc::new(InMemoryStorage::default());
        let old_key = StorageKey::generate(&["reviews"], "jpg").unwrap();
        storage.save(&old_key, b"old").await.unwrap();
        let old_url = old_key.public_url();

        let mut repo = MockRepo::new();
        let existing_url = old_url.clone();
        repo.expect_find().returning(move |_, id| {
            let mut review = sample_review(id, Some(owner));
            review.before_photo_url = Some(existing_url.clone());
            Ok(Some(review))
        });
        repo.expect_update()
            .withf(|_, _, changes| {
                matches!(&changes.before_photo_url, Some(Some(url)) if url.starts_with("/api/cdn/reviews/"))
            })
            .returning(move |_, id, changes| {
                let mut review = sample_review(id, Some(owner));
                review.before_photo_url = changes.before_photo_url.flatten();
                Ok(review)
            });
        let service = ReviewService::new(Arc::new(repo), storage.clone());

        let photos = ReviewPhotos {
            before: Some(photo("beforePhoto", "image/jpeg")),
            after: None,
        };
        let review = UpdateReviewUseCase::execute(
            &service,
            ReviewTarget::General,
            2,
            user(owner),
            ReviewForm::default(),
            photos,
        )
        .await
        .unwrap();

        assert_ne!(review.before_photo_url.as_deref(), Some(old_url.as_str()));
        assert!(!storage.contains(old_key.as_str()));
        assert_eq!(storage.keys().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_flag_clears_photo_file() {
        let owner = Uuid::new_v4();
        let storage = Arc::new(InMemoryStorage::default());
        let old_key = StorageKey::generate(&["reviews"], "png").unwrap();
        storage.save(&old_key, b"old").await.unwrap();
        let old_url = old_key.public_url();

        let mut repo = MockRepo::new();
        repo.expect_find().returning(move |_, id| {
            let mut review = sample_review(id, Some(owner));
            review.after_photo_url = Some(old_url.clone());
            Ok(Some(review))
        });
        repo.expect_update()
            .withf(|_, _, changes| changes.after_photo_url == Some(None))
            .returning(move |_, id, _| Ok(sample_review(id, Some(owner))));
        let service = ReviewService::new(Arc::new(repo), storage.clone());

        UpdateReviewUseCase::execute(
            &service,
            ReviewTarget::General,
            2,
            user(owner),
            ReviewForm {
                remove_after_photo: true,
                ..Default::default()
            },
            ReviewPhotos::default(),
        )
        .await
        .unwrap();

        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_admin_delete_removes_photos() {
        let storage = Arc::new(InMemoryStorage::default());
        let key = StorageKey::generate(&["reviews"], "gif").unwrap();
        storage.save(&key, b"gif").await.unwrap();
        let url = key.public_url();

        let mut repo = MockRepo::new();
        repo.expect_find().returning(move |_, id| {
            let mut review = sample_review(id, None);
            review.before_photo_url = Some(url.clone());
            Ok(Some(review))
        });
        repo.expect_delete()
            .with(eq(ReviewTarget::Course), eq(9))
            .returning(|_, _| Ok(true));
        let service = ReviewService::new(Arc::new(repo), storage.clone());

        let admin = Requester {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        DeleteReviewUseCase::execute(&service, ReviewTarget::Course, 9, admin)
            .await
            .unwrap();

        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_review() {
        let mut repo = MockRepo::new();
        repo.expect_find().returning(|_, _| Ok(None));
        let service = ReviewService::new(Arc::new(repo), Arc::new(InMemoryStorage::default()));

        let result = GetReviewUseCase::execute(&service, ReviewTarget::General, 404).await;

        assert_eq!(result.unwrap_err(), ReviewError::NotFound);
    }
}
