use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{Role, Sex};

/// The two review tables share one shape; course reviews also carry a course id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    General,
    Course,
}

impl ReviewTarget {
    pub fn table(&self) -> &'static str {
        match self {
            ReviewTarget::General => "general_reviews",
            ReviewTarget::Course => "course_reviews",
        }
    }
}

/// Public profile of the registered author, when there is one.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAuthor {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub image_url: Option<String>,
    pub experience: Option<String>,
    pub sex: Option<Sex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i32>,
    pub user_id: Option<Uuid>,
    pub rating: i16,
    pub comment: String,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
    pub author_name: Option<String>,
    pub author_surname: Option<String>,
    pub author_experience: Option<String>,
    pub author_sex: Option<Sex>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: Option<ReviewAuthor>,
}

impl Review {
    pub fn target(&self) -> ReviewTarget {
        match self.course_id {
            Some(_) => ReviewTarget::Course,
            None => ReviewTarget::General,
        }
    }

    pub fn photo_urls(&self) -> impl Iterator<Item = &str> {
        self.before_photo_url
            .as_deref()
            .into_iter()
            .chain(self.after_photo_url.as_deref())
    }
}

/// Caller of a write operation on an existing review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Uuid,
    pub role: Role,
}

impl Requester {
    /// Authors may edit their own reviews; admins may edit any, including anonymous ones.
    pub fn can_modify(&self, review: &Review) -> bool {
        self.role == Role::Admin || review.user_id == Some(self.user_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub course_id: Option<i32>,
    pub user_id: Option<Uuid>,
    pub rating: i16,
    pub comment: String,
    pub author_name: Option<String>,
    pub author_surname: Option<String>,
    pub author_experience: Option<String>,
    pub author_sex: Option<Sex>,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
}

impl NewReview {
    pub fn target(&self) -> ReviewTarget {
        match self.course_id {
            Some(_) => ReviewTarget::Course,
            None => ReviewTarget::General,
        }
    }
}

/// Partial update. Photo fields use `Some(None)` to clear the stored URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewChanges {
    pub course_id: Option<i32>,
    pub rating: Option<i16>,
    pub comment: Option<String>,
    pub author_name: Option<String>,
    pub author_surname: Option<String>,
    pub author_experience: Option<String>,
    pub author_sex: Option<Sex>,
    pub before_photo_url: Option<Option<String>>,
    pub after_photo_url: Option<Option<String>>,
}

impl ReviewChanges {
    pub fn is_empty(&self) -> bool {
        *self == ReviewChanges::default()
    }
}

#[cfg(test)]
pub(crate) fn sample_review(id: i32, user_id: Option<Uuid>) -> Review {
    let now = Utc::now();
    Review {
        id,
        course_id: None,
        user_id,
        rating: 5,
        comment: "Great results".to_string(),
        before_photo_url: None,
        after_photo_url: None,
        author_name: None,
        author_surname: None,
        author_experience: None,
        author_sex: None,
        created_at: now,
        updated_at: now,
        user: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_and_admin_can_modify() {
        let owner = Uuid::new_v4();
        let review = sample_review(1, Some(owner));

        let as_owner = Requester {
            user_id: owner,
            role: Role::User,
        };
        let as_stranger = Requester {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };
        let as_admin = Requester {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };

        assert!(as_owner.can_modify(&review));
        assert!(!as_stranger.can_modify(&review));
        assert!(as_admin.can_modify(&review));
    }

    #[test]
    fn test_anonymous_review_only_admin_can_modify() {
        let review = sample_review(1, None);
        let user = Requester {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };

        assert!(!user.can_modify(&review));
    }

    #[test]
    fn test_general_review_omits_course_id() {
        let json = serde_json::to_value(sample_review(3, None)).unwrap();

        assert!(json.get("courseId").is_none());
        assert_eq!(json["rating"], 5);
        assert!(json["user"].is_null());
    }
}
