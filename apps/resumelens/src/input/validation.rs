use std::path::Path;

use crate::config::ScoringMode;
use crate::errors::ValidationError;
use crate::models::ResumeInput;

/// Uploads above this size are refused before they reach the scoring service.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Only `.txt` uploads are decoded locally. Document formats travel as bytes.
const TEXT_EXTENSIONS: &[&str] = &["txt"];

/// Lower-cased extension of `file_name`, without the dot.
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Checks an uploaded resume file and turns it into a `ResumeInput`.
///
/// - extension must be one of `.pdf`, `.docx`, `.txt`
/// - size must not exceed `MAX_FILE_SIZE`
/// - `.txt` must be valid UTF-8 and is stored as text; other formats are kept
///   as an opaque binary reference
pub fn validate_upload(file_name: &str, bytes: Vec<u8>) -> Result<ResumeInput, ValidationError> {
    let extension = file_extension(file_name).unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        let shown = if extension.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{extension}")
        };
        return Err(ValidationError::UnsupportedFileType(shown));
    }

    if bytes.len() > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge {
            size: bytes.len(),
            limit: MAX_FILE_SIZE,
        });
    }

    if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        let text = String::from_utf8(bytes)
            .map_err(|e| ValidationError::UnreadableText(format!("{file_name}: {e}")))?;
        return Ok(ResumeInput::text(file_name, text));
    }

    Ok(ResumeInput::binary(file_name, bytes))
}

/// The resume as JSON mode sends it. JSON carries the resume as a string, so
/// a document that is not UTF-8 text can only go out as a multipart upload.
pub fn json_resume_text(resume: &ResumeInput) -> Result<&str, ValidationError> {
    resume.as_text().ok_or_else(|| {
        let shown = file_extension(&resume.source_name)
            .map(|ext| format!(".{ext}"))
            .unwrap_or_else(|| "(binary)".to_string());
        ValidationError::UnsupportedFileType(shown)
    })
}

pub fn check_mode_compatible(
    resume: &ResumeInput,
    mode: ScoringMode,
) -> Result<(), ValidationError> {
    match mode {
        ScoringMode::Json => json_resume_text(resume).map(|_| ()),
        ScoringMode::Multipart => Ok(()),
    }
}
