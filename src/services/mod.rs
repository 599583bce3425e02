//! Import services

pub mod file_storage;
pub mod issue_index;
pub mod locale;
pub mod manifest;
pub mod matcher;
pub mod materializer;
pub mod mime;
pub mod reporter;
pub mod store;
