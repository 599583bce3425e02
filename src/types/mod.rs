//! Type definitions

pub mod context;
pub mod galley;
pub mod issue;
pub mod manifest;
pub mod outcome;
pub mod submission;
pub mod submission_file;
pub mod user;

pub use context::*;
pub use galley::*;
pub use issue::*;
pub use manifest::*;
pub use outcome::*;
pub use submission::*;
pub use submission_file::*;
pub use user::*;
