//! Image attachment handling for new postings.
//!
//! The backend takes the image base64-encoded inside the JSON body (no
//! multipart), and the client rejects anything over 10 MiB before it
//! goes on the wire.

use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;

/// Maximum accepted attachment size: 10 MiB.
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Shown when the selected file exceeds [`MAX_IMAGE_BYTES`].
pub const IMAGE_TOO_LARGE_MESSAGE: &str =
    "The selected file is too large, maximum file size is 10MB.";

/// Whether a file of `len` bytes may be attached.
pub fn is_correct_size(len: u64) -> bool {
    len <= MAX_IMAGE_BYTES
}

/// Read an image file and return its base64-encoded body.
///
/// Fails with a user-facing message when the file is missing,
/// unreadable, or over the size cap. The size is checked from metadata
/// before the read so an oversized file is never pulled into memory.
pub fn encode_image(path: &Path) -> Result<String, String> {
    let meta = std::fs::metadata(path)
        .map_err(|e| format!("Cannot read file {}: {}", path.display(), e))?;
    if !meta.is_file() {
        return Err(format!("{} is not a file", path.display()));
    }
    if !is_correct_size(meta.len()) {
        return Err(IMAGE_TOO_LARGE_MESSAGE.to_string());
    }
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Cannot read file {}: {}", path.display(), e))?;
    Ok(STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_size_boundary() {
        assert!(is_correct_size(0));
        assert!(is_correct_size(MAX_IMAGE_BYTES));
        assert!(!is_correct_size(MAX_IMAGE_BYTES + 1));
    }

    #[test]
    fn test_encode_small_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        let encoded = encode_image(file.path()).unwrap();
        assert_eq!(encoded, "aGVsbG8=");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = encode_image(Path::new("/nonexistent/cat.png")).unwrap_err();
        assert!(err.starts_with("Cannot read file"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = encode_image(dir.path()).unwrap_err();
        assert!(err.ends_with("is not a file"));
    }
}
