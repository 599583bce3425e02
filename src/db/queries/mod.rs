//! Database queries

pub mod context;
pub mod galley;
pub mod genre;
pub mod issue;
pub mod submission;
pub mod submission_file;
pub mod user;
