pub mod course_query;

pub use course_query::{CourseQuery, CourseQueryError};
