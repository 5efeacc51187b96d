mod chapter;
mod course;
mod ids;
mod role;

pub use chapter::Chapter;
pub use course::Course;
pub use ids::{ChapterId, CourseId};
pub use role::{Role, RoleParseError};
