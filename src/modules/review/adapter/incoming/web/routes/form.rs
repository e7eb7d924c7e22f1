use actix_multipart::Multipart;

use crate::modules::cdn::application::domain::MAX_IMAGE_BYTES;
use crate::modules::review::application::domain::ReviewForm;
use crate::modules::review::application::ports::incoming::use_cases::ReviewPhotos;
use crate::shared::api::AppError;
use crate::shared::http::multipart::read_multipart;

/// Splits a review multipart body into its text fields and the two optional photos.
pub(super) async fn read_review_form(
    payload: Multipart,
) -> Result<(ReviewForm, ReviewPhotos), AppError> {
    let mut multipart = read_multipart(payload, MAX_IMAGE_BYTES).await?;
    let text = |name: &str| multipart.text(name).map(str::to_string);

    let form = ReviewForm {
        rating: text("rating"),
        comment: text("comment"),
        author_name: text("authorName"),
        author_surname: text("authorSurname"),
        author_experience: text("authorExperience"),
        author_sex: text("authorSex"),
        course_id: text("courseId"),
        remove_before_photo: text("removeBeforePhoto").as_deref() == Some("true"),
        remove_after_photo: text("removeAfterPhoto").as_deref() == Some("true"),
    };
    let photos = ReviewPhotos {
        before: multipart.take_file("beforePhoto"),
        after: multipart.take_file("afterPhoto"),
    };

    Ok((form, photos))
}
