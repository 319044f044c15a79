//! Input limits and checks applied to FASTA uploads before parsing.

use crate::parsing::fasta::is_gzip_content;

/// Most sequence records accepted in one analysis request
pub const MAX_RECORDS: usize = 100_000;

/// Upload names longer than this are refused
pub const MAX_FILENAME_LENGTH: usize = 255;

/// An upload must carry at least this many bytes
pub const MIN_FILE_CONTENT_SIZE: usize = 1;

/// Extensions recognised as FASTA, optionally followed by `.gz` or `.bgz`
const FASTA_EXTENSIONS: [&str; 5] = ["fa", "fasta", "fna", "fas", "txt"];

/// Returns a message when a request already holding `count` records may not
/// take another one.
///
/// ```ignore
/// if let Some(msg) = check_record_limit(records.len()) {
///     return Err(...);
/// }
/// records.push(record);
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    (count >= MAX_RECORDS)
        .then(|| format!("Record limit reached: at most {MAX_RECORDS} sequences per request"))
}

/// Why an uploaded FASTA file was refused
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Upload name is longer than {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Upload name contains a path or control characters")]
    InvalidFilename,
    #[error("Upload name is blank")]
    EmptyFilename,
    #[error("Upload is empty or not readable as text")]
    InvalidFileContent,
    #[error("Upload does not look like FASTA")]
    FormatValidationFailed,
}

/// Reduce an upload name to a safe display name.
///
/// Names that carry a path (`/`, `\`, `..`) or control characters are
/// refused outright. Otherwise every character except ASCII letters, digits,
/// space, `.`, `-` and `_` is dropped. Dot-files are only allowed when they
/// carry a FASTA extension.
///
/// # Errors
///
/// `EmptyFilename` for a blank name, `FilenameTooLong` past
/// [`MAX_FILENAME_LENGTH`], and `InvalidFilename` for anything else refused.
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }
    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    let has_path = filename.contains("..") || filename.contains(['/', '\\']);
    if has_path || filename.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFilename);
    }

    let cleaned: String = filename.chars().filter(|&c| is_name_char(c)).collect();
    if cleaned.trim().is_empty() || (cleaned.starts_with('.') && !has_fasta_extension(&cleaned)) {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(cleaned)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ')
}

/// Whether `name` ends in a FASTA extension, compressed or not
fn has_fasta_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let stem = lower
        .strip_suffix(".gz")
        .or_else(|| lower.strip_suffix(".bgz"))
        .unwrap_or(&lower);

    stem.rsplit_once('.')
        .is_some_and(|(_, ext)| FASTA_EXTENSIONS.contains(&ext))
}

/// Cheap sniff for FASTA content.
///
/// Gzip data passes as-is and is sniffed again by the parser after
/// decompression. Plain text must open with a `>` definition line, ignoring
/// leading whitespace.
#[must_use]
pub fn validate_fasta_format(content: &[u8]) -> bool {
    if is_gzip_content(content) {
        return true;
    }

    content
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'>')
}

/// Check that an upload has content and, for text uploads, that it is UTF-8
/// without a significant share of control bytes.
///
/// Tabs, line feeds and carriage returns are not counted as control bytes.
/// Uploads over 100 bytes may contain at most 5% control bytes.
///
/// # Errors
///
/// `InvalidFileContent` if any of these checks fail.
pub fn validate_file_content(content: &[u8], is_text: bool) -> Result<(), ValidationError> {
    if content.len() < MIN_FILE_CONTENT_SIZE {
        return Err(ValidationError::InvalidFileContent);
    }
    if !is_text {
        return Ok(());
    }

    let control_bytes = content
        .iter()
        .filter(|&&b| (b.is_ascii_control() && !matches!(b, b'\t' | b'\n' | b'\r')) || b == 0x7f)
        .count();
    let too_noisy = content.len() > 100 && control_bytes * 20 > content.len();

    if too_noisy || std::str::from_utf8(content).is_err() {
        return Err(ValidationError::InvalidFileContent);
    }

    Ok(())
}

/// All checks the web handler runs on one uploaded file.
///
/// Returns the cleaned upload name, or `None` when the part had no name.
///
/// # Errors
///
/// The first `ValidationError` raised by the name, content or format checks.
pub fn validate_upload(
    filename: Option<&str>,
    content: &[u8],
) -> Result<Option<String>, ValidationError> {
    let name = filename.map(validate_filename).transpose()?;

    validate_file_content(content, !is_gzip_content(content))?;
    if !validate_fasta_format(content) {
        return Err(ValidationError::FormatValidationFailed);
    }

    Ok(name)
}
