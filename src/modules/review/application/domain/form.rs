use uuid::Uuid;

use crate::modules::auth::application::domain::entities::Sex;
use crate::shared::api::FieldErrors;

use super::review::{NewReview, ReviewChanges, ReviewTarget};

pub const MIN_COMMENT_CHARS: usize = 3;
pub const MIN_AUTHOR_NAME_CHARS: usize = 2;

/// Text parts of a review form, as submitted. Blank parts are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewForm {
    pub rating: Option<String>,
    pub comment: Option<String>,
    pub author_name: Option<String>,
    pub author_surname: Option<String>,
    pub author_experience: Option<String>,
    pub author_sex: Option<String>,
    pub course_id: Option<String>,
    pub remove_before_photo: bool,
    pub remove_after_photo: bool,
}

/// Fields shared by create and update, each already validated when present.
struct Checked {
    course_id: Option<i32>,
    rating: Option<i16>,
    comment: Option<String>,
    author_name: Option<String>,
    author_surname: Option<String>,
    author_experience: Option<String>,
    author_sex: Option<Sex>,
}

fn fail(errors: &mut FieldErrors, field: &str, msg: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(msg.to_string());
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ReviewForm {
    fn check(self, errors: &mut FieldErrors) -> Checked {
        let rating = self.rating.and_then(|raw| match raw.trim().parse::<i16>() {
            Ok(r) if (1..=5).contains(&r) => Some(r),
            _ => {
                fail(errors, "rating", "Rating must be an integer from 1 to 5");
                None
            }
        });

        let comment = trimmed(self.comment);
        if let Some(c) = &comment {
            if c.chars().count() < MIN_COMMENT_CHARS {
                fail(errors, "comment", "Comment must be at least 3 characters");
            }
        }

        let author_name = trimmed(self.author_name);
        if let Some(n) = &author_name {
            if n.chars().count() < MIN_AUTHOR_NAME_CHARS {
                fail(errors, "authorName", "Author name must be at least 2 characters");
            }
        }

        let author_surname = trimmed(self.author_surname);
        if let Some(s) = &author_surname {
            if s.chars().count() < MIN_AUTHOR_NAME_CHARS {
                fail(
                    errors,
                    "authorSurname",
                    "Author surname must be at least 2 characters",
                );
            }
        }

        let author_sex = self.author_sex.and_then(|raw| match raw.parse::<Sex>() {
            Ok(sex) => Some(sex),
            Err(msg) => {
                fail(errors, "authorSex", &msg);
                None
            }
        });

        let course_id = self.course_id.and_then(|raw| match raw.trim().parse::<i32>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                fail(errors, "courseId", "Course id must be a positive integer");
                None
            }
        });

        Checked {
            course_id,
            rating,
            comment,
            author_name,
            author_surname,
            author_experience: trimmed(self.author_experience),
            author_sex,
        }
    }

    /// Validate a new review. Photo URLs are filled in once files are stored.
    pub fn into_new_review(
        self,
        target: ReviewTarget,
        user_id: Option<Uuid>,
    ) -> Result<NewReview, FieldErrors> {
        let mut errors = FieldErrors::new();
        let has_rating = self.rating.is_some();
        let has_comment = self.comment.as_deref().is_some_and(|c| !c.trim().is_empty());
        let has_course = self.course_id.is_some();

        let checked = self.check(&mut errors);

        if !has_rating {
            fail(&mut errors, "rating", "Rating is required");
        }
        if !has_comment {
            fail(&mut errors, "comment", "Comment is required");
        }
        if target == ReviewTarget::Course && !has_course {
            fail(&mut errors, "courseId", "Course id is required");
        }

        let (Some(rating), Some(comment), true) = (checked.rating, checked.comment, errors.is_empty())
        else {
            return Err(errors);
        };

        Ok(NewReview {
            course_id: match target {
                ReviewTarget::Course => checked.course_id,
                ReviewTarget::General => None,
            },
            user_id,
            rating,
            comment,
            author_name: checked.author_name,
            author_surname: checked.author_surname,
            author_experience: checked.author_experience,
            author_sex: checked.author_sex,
            before_photo_url: None,
            after_photo_url: None,
        })
    }

    /// Validate an edit. Only present fields change; `courseId` is ignored for general reviews.
    pub fn into_changes(self, target: ReviewTarget) -> Result<ReviewChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let remove_before = self.remove_before_photo;
        let remove_after = self.remove_after_photo;

        let checked = self.check(&mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ReviewChanges {
            course_id: match target {
                ReviewTarget::Course => checked.course_id,
                ReviewTarget::General => None,
            },
            rating: checked.rating,
            comment: checked.comment,
            author_name: checked.author_name,
            author_surname: checked.author_surname,
            author_experience: checked.author_experience,
            author_sex: checked.author_sex,
            before_photo_url: remove_before.then_some(None),
            after_photo_url: remove_after.then_some(None),
        })
    }
}
