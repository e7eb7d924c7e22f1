pub mod form;
pub mod review;

pub use form::ReviewForm;
#[cfg(test)]
pub(crate) use review::sample_review;
pub use review::{NewReview, Requester, Review, ReviewAuthor, ReviewChanges, ReviewTarget};
