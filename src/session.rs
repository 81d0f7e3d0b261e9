//! Session flag storage and the session context object.
//!
//! The backend authenticates with a session cookie; the client
//! additionally mirrors two flags into `~/.toebeans/session.json` so
//! screens can answer "am I logged in?" and "who am I?" without a
//! network call. Both flags live and die together: they are written at
//! login and cleared on logout or on any 401 response.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// The data directory name under `$HOME`.
const SESSION_DIR: &str = ".toebeans";

/// The session flags file name.
const SESSION_FILE: &str = "session.json";

/// The two persisted session flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionFlags {
    /// Presence flag: the viewer holds a live session cookie.
    pub is_logged_in: bool,
    /// The viewer's user name, cached at login.
    pub login_user_name: Option<String>,
}

/// Reads and writes the session flags file.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store under the default path. `None` when the home directory
    /// cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            path: home.join(SESSION_DIR).join(SESSION_FILE),
        })
    }

    /// Store at an explicit path. Used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load flags, falling back to the logged-out default when the file
    /// is missing or unreadable.
    pub fn load(&self) -> SessionFlags {
        if !self.path.exists() {
            return SessionFlags::default();
        }
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return SessionFlags::default(),
        };
        serde_json::from_reader(BufReader::new(file)).unwrap_or_default()
    }

    /// Persist flags, creating the parent directory if needed.
    pub fn save(&self, flags: &SessionFlags) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }
        let file = match File::create(&self.path) {
            Ok(f) => f,
            Err(_) => return false,
        };
        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, flags).is_err() {
            return false;
        }
        writer.flush().is_ok()
    }

    /// Remove the flags file. Succeeds when the file is already gone.
    pub fn clear(&self) -> bool {
        if !self.path.exists() {
            return true;
        }
        fs::remove_file(&self.path).is_ok()
    }
}

/// Session context handed to every screen at construction.
///
/// This replaces the browser client's ad-hoc reads of shared local
/// storage: there is exactly one way to establish a session and exactly
/// one way to invalidate it, and every 401 handler goes through
/// [`Session::invalidate`].
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    flags: SessionFlags,
}

impl Session {
    /// Load the persisted flags through the given store.
    pub fn load(store: SessionStore) -> Self {
        let flags = store.load();
        Self { store, flags }
    }

    pub fn is_logged_in(&self) -> bool {
        self.flags.is_logged_in
    }

    pub fn login_user_name(&self) -> Option<&str> {
        self.flags.login_user_name.as_deref()
    }

    /// Record a successful login. Both flags are set and persisted
    /// together.
    pub fn establish(&mut self, user_name: String) {
        self.flags = SessionFlags {
            is_logged_in: true,
            login_user_name: Some(user_name),
        };
        if !self.store.save(&self.flags) {
            tracing::warn!(path = ?self.store.path(), "failed to persist session flags");
        }
    }

    /// Drop the session: clears both flags and removes the file.
    ///
    /// Called on logout and by every AuthExpired handler.
    pub fn invalidate(&mut self) {
        self.flags = SessionFlags::default();
        if !self.store.clear() {
            tracing::warn!(path = ?self.store.path(), "failed to clear session flags");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> SessionStore {
        SessionStore::with_path(dir.path().join(SESSION_DIR).join(SESSION_FILE))
    }

    #[test]
    fn test_load_missing_file_is_logged_out() {
        let dir = TempDir::new().unwrap();
        let flags = test_store(&dir).load();
        assert!(!flags.is_logged_in);
        assert!(flags.login_user_name.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let flags = SessionFlags {
            is_logged_in: true,
            login_user_name: Some("alice".to_string()),
        };
        assert!(store.save(&flags));
        assert_eq!(store.load(), flags);
    }

    #[test]
    fn test_load_invalid_json_is_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.load(), SessionFlags::default());
    }

    #[test]
    fn test_clear_missing_file_succeeds() {
        let dir = TempDir::new().unwrap();
        assert!(test_store(&dir).clear());
    }

    #[test]
    fn test_establish_persists_both_flags() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load(test_store(&dir));
        assert!(!session.is_logged_in());

        session.establish("alice".to_string());
        assert!(session.is_logged_in());
        assert_eq!(session.login_user_name(), Some("alice"));

        // A fresh load sees the same flags.
        let reloaded = Session::load(test_store(&dir));
        assert!(reloaded.is_logged_in());
        assert_eq!(reloaded.login_user_name(), Some("alice"));
    }

    #[test]
    fn test_invalidate_clears_everything() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load(test_store(&dir));
        session.establish("alice".to_string());

        session.invalidate();
        assert!(!session.is_logged_in());
        assert!(session.login_user_name().is_none());

        let store = test_store(&dir);
        assert!(!store.path().exists());
        assert_eq!(store.load(), SessionFlags::default());
    }
}
