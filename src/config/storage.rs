use crate::core::Storage;
use crate::utils::error::{ConvertError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Filesystem storage; parent directories are created on write.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => ConvertError::unexpected(format!(
                "{} is not valid UTF-8: {}",
                path.display(),
                e
            )),
            _ => ConvertError::FileNotFound {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let write_error =
            |e: std::io::Error| ConvertError::unexpected(format!("cannot write {}: {}", path.display(), e));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        fs::write(path, data).map_err(write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/deeper/out.json");

        LocalStorage::new().write_file(&target, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.json");
        fs::write(&target, "previous content that is longer").unwrap();

        LocalStorage::new().write_file(&target, b"[]").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "[]");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = LocalStorage::new().read_to_string(&dir.path().join("absent.html"));
        assert!(matches!(result, Err(ConvertError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.html");
        fs::write(&path, [0x3c, 0xe9, 0xff, 0x3e]).unwrap();

        let result = LocalStorage::new().read_to_string(&path);
        assert!(matches!(result, Err(ConvertError::UnexpectedError { .. })));
    }
}
