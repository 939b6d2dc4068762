//! Token persistence on the local filesystem.

use checklist_sync::{Result, SessionStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A [`SessionStore`] backed by a single file holding the bearer token.
///
/// A missing file means no session. The file is created with owner-only
/// permissions on Unix, since the token grants full account access.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session token cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> FileSessionStore {
        FileSessionStore::new(temp.path().join("checklist/token"))
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save("tok-123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp.path().join("a/b/c/token"));
        store.save("tok").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_load_trims_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "tok-123\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_blank_file_is_no_session() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save("tok").unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_when_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save("tok").unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
