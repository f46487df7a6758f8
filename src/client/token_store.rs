//! Persistent bearer token for the client.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{XtrackError, XtrackResult};

/// File name the token is kept under.
pub const TOKEN_KEY: &str = "xtrack_token";

/// A token kept in a single file named [`TOKEN_KEY`].
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// A store whose token file lives in `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }

    /// The token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the token. A missing, unreadable or blank file means no token.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read token file");
                None
            }
        }
    }

    /// Writes the token, replacing any previous one.
    pub fn save(&self, token: &str) -> XtrackResult<()> {
        fs::write(&self.path, token.trim()).map_err(|e| self.error(e))?;
        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    /// Removes the token. Clearing an absent token succeeds.
    pub fn clear(&self) -> XtrackResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.error(e)),
        }
    }

    fn error(&self, e: std::io::Error) -> XtrackError {
        XtrackError::TokenStore {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("xtrack-token-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_then_load() {
        let store = TokenStore::in_dir(scratch_dir("save"));
        store.save("dev-admin-token\n").unwrap();
        assert_eq!(store.load().as_deref(), Some("dev-admin-token"));
        store.clear().unwrap();
    }

    #[test]
    fn test_missing_file_is_no_token() {
        let store = TokenStore::in_dir(scratch_dir("missing"));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_clear_removes_token() {
        let store = TokenStore::in_dir(scratch_dir("clear"));
        store.save("abc").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_file_is_named_after_key() {
        let store = TokenStore::in_dir("/tmp");
        assert!(store.path().ends_with(TOKEN_KEY));
    }
}
