//! Session token storage.
//!
//! Holds the profile token returned by sign-in and the signed-in profile
//! id, persisted as a small JSON file between runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// Authentication state for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_id: Option<i64>,
}

impl Session {
    /// Create a session from a token and profile id.
    pub fn new<S: Into<String>>(token: S, profile_id: i64) -> Self {
        Self {
            token: Some(token.into()),
            profile_id: Some(profile_id),
        }
    }

    /// Load a session file. A missing file is an empty session.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No session at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the session file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        debug!("Session saved to {}", path.display());
        Ok(())
    }

    /// Remove the session file. Removing a missing file is not an error.
    pub fn clear(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Set or clear the token. Clearing it also forgets the profile id.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
        if self.token.is_none() {
            self.profile_id = None;
        }
    }

    /// Set or clear the profile id.
    pub fn set_profile_id(&mut self, id: Option<i64>) {
        self.profile_id = id.filter(|id| *id != 0);
    }

    /// Stored token, if signed in.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Stored profile id, if known.
    pub fn profile_id(&self) -> Option<i64> {
        self.profile_id
    }

    /// Check whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("anixart-wrapped-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_load_clear() {
        let path = temp_path("session.json");
        let session = Session::new("tok", 42);
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.profile_id(), Some(42));

        Session::clear(&path).unwrap();
        assert!(!path.exists());
        Session::clear(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let session = Session::load(&temp_path("absent.json")).unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.profile_id(), None);
    }

    #[test]
    fn test_logout_clears_profile_id() {
        let mut session = Session::new("tok", 7);
        session.set_token(None);
        assert_eq!(session.token(), None);
        assert_eq!(session.profile_id(), None);
    }

    #[test]
    fn test_empty_token_is_a_logout() {
        let mut session = Session::new("tok", 7);
        session.set_token(Some(String::new()));
        assert!(!session.is_authenticated());
        assert_eq!(session.profile_id(), None);
    }
}
