use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Owner read/write, group and others read.
pub const LOG_FILE_MODE: u32 = 0o644;

/// Opens `path` for appending, creating it if absent.
///
/// Existing content is never truncated. The returned handle is meant to be
/// held for the rest of the process.
pub fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }

    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_open_append_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        assert!(!path.exists());

        open_append(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_append_keeps_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");

        open_append(&path).unwrap().write_all(b"first\n").unwrap();
        open_append(&path).unwrap().write_all(b"second\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_open_append_fails_for_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(open_append(temp_dir.path()).is_err());
    }

    #[test]
    fn test_open_append_fails_for_missing_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("app.log");
        assert!(open_append(&path).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_created_file_is_not_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        open_append(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o600, 0o600, "owner must read and write: {mode:o}");
        assert_eq!(mode & 0o111, 0, "no execute bits: {mode:o}");
        assert_eq!(mode & !LOG_FILE_MODE, 0, "never wider than 0644: {mode:o}");
    }
}
