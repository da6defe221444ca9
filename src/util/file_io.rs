//! Plain-text document I/O
//!
//! Documents are read and written wholesale as UTF-8. Formatting never
//! reaches the disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::text::normalize_line_endings;

/// Errors raised while reading or writing a document
///
/// The enum is `Clone` so it can travel inside messages back into `update`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("is a directory")]
    IsDirectory,
    /// The bytes on disk are not valid UTF-8
    #[error("invalid UTF-8 at byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
    #[error("{message}")]
    Io { kind: ErrorKind, message: String },
}

impl From<std::io::Error> for FileError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::PermissionDenied => Self::PermissionDenied,
            kind => Self::Io {
                kind,
                message: e.to_string(),
            },
        }
    }
}

impl FileError {
    /// Text for the error dialog
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound => format!("File not found: {}", filename),
            Self::PermissionDenied => format!("Permission denied: {}", filename),
            Self::IsDirectory => format!("{} is a directory", filename),
            Self::InvalidUtf8 { .. } => {
                format!("{} is not a valid UTF-8 text file", filename)
            }
            Self::Io { message, .. } => format!("Error accessing {}: {}", filename, message),
        }
    }
}

/// Read a whole file as UTF-8 text
///
/// CRLF and lone CR line endings are normalized to LF so the character
/// count matches what the text area shows.
pub fn read_text_file(path: &Path) -> Result<String, FileError> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(FileError::IsDirectory);
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| FileError::InvalidUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })?;

    if text.contains('\r') {
        Ok(normalize_line_endings(&text).into_owned())
    } else {
        Ok(text)
    }
}

/// Write text to a file as UTF-8, replacing any existing content
pub fn write_text_file(path: &Path, text: &str) -> Result<(), FileError> {
    if path.is_dir() {
        return Err(FileError::IsDirectory);
    }
    fs::write(path, text.as_bytes())?;
    Ok(())
}

/// Get the filename from a path for display in dialogs
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_missing_file() {
        let result = read_text_file(Path::new("/nonexistent/path/file.txt"));
        assert_eq!(result, Err(FileError::NotFound));
    }

    #[test]
    fn test_read_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_text_file(dir.path()), Err(FileError::IsDirectory));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"ok\xff\xfe").unwrap();
        temp.flush().unwrap();

        assert_eq!(
            read_text_file(temp.path()),
            Err(FileError::InvalidUtf8 { valid_up_to: 2 })
        );
    }

    #[test]
    fn test_read_normalizes_crlf() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"one\r\ntwo\r\n").unwrap();
        temp.flush().unwrap();

        assert_eq!(read_text_file(temp.path()).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_write_overwrites_existing() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"old content that is longer").unwrap();
        temp.flush().unwrap();

        write_text_file(temp.path(), "new").unwrap();
        assert_eq!(std::fs::read_to_string(temp.path()).unwrap(), "new");
    }

    #[test]
    fn test_write_into_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            write_text_file(dir.path(), "text"),
            Err(FileError::IsDirectory)
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            FileError::NotFound.user_message("notes.txt"),
            "File not found: notes.txt"
        );
        assert_eq!(
            FileError::InvalidUtf8 { valid_up_to: 0 }.user_message("blob.txt"),
            "blob.txt is not a valid UTF-8 text file"
        );
    }

    #[test]
    fn test_filename_for_display() {
        assert_eq!(filename_for_display(Path::new("/tmp/a/notes.txt")), "notes.txt");
    }
}
