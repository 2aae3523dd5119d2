//! Plain-text upload helpers

use std::fs;
use std::io;
use std::path::Path;

/// Derive a document name from an uploaded filename by stripping the
/// final extension only: "lease.v2.txt" becomes "lease.v2".
pub fn name_from_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => filename.to_string(),
    }
}

/// Read an uploaded file as UTF-8 text.
pub fn read_text_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}
