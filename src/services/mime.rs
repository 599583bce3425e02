//! Content type detection for uploaded files

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

const OCTET_STREAM: &str = "application/octet-stream";
const TEXT_PLAIN: &str = "text/plain";

/// Bytes read from the head of a file for detection
const SNIFF_LEN: u64 = 8192;

/// Detect a file's MIME type from its content.
///
/// Known signatures win; otherwise UTF-8 content is `text/plain` and
/// anything else `application/octet-stream`.
pub async fn detect_mime_type(path: &Path) -> Result<String> {
    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN)
        .read_to_end(&mut head)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(mime_from_bytes(&head).to_string())
}

pub fn mime_from_bytes(bytes: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type();
    }
    let head = &bytes[..bytes.len().min(SNIFF_LEN as usize)];
    let is_text = match std::str::from_utf8(head) {
        Ok(_) => true,
        // A multi-byte character cut at the sniff boundary is still text
        Err(e) => e.error_len().is_none(),
    };
    if is_text && !head.contains(&0) {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    }
}
