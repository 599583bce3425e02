//! Submission file types

use chrono::NaiveDateTime;

/// Workflow stage for files attached to galleys
pub const SUBMISSION_FILE_PROOF: i32 = 10;

/// Association type linking a file to a representation (galley)
pub const ASSOC_TYPE_REPRESENTATION: i32 = 0x0000209;

/// Revision number of a freshly imported file
pub const INITIAL_REVISION: i32 = 1;

/// Fully populated submission file ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmissionFile {
    pub submission_id: i64,
    /// Primary language of the owning submission
    pub submission_locale: Option<String>,
    pub genre_id: i64,
    pub file_stage: i32,
    pub revision: i32,
    pub uploader_user_id: i64,
    pub original_file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub viewable: bool,
    pub assoc_type: i32,
    pub assoc_id: i64,
    pub date_uploaded: NaiveDateTime,
    pub date_modified: NaiveDateTime,
}
