//! Authentication state: the opaque token issued by `/api/sign-in`.
//!
//! A [`Session`] is created once and handed to whatever needs the token,
//! instead of being read from a global. When backed by a file, sign-in and
//! sign-out are persisted so the next process picks them up.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::storage::{load_from_file, remove_file, save_to_file};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    token: Option<String>,
}

#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    path: Option<PathBuf>,
}

impl Session {
    /// A session that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            path: None,
        }
    }

    /// Restore the session stored at `path`, if any.
    pub fn load(path: &Path) -> Result<Self> {
        let stored: StoredSession = load_from_file(path)?.unwrap_or_default();
        debug!(path = %path.display(), signed_in = stored.token.is_some(), "session loaded");
        Ok(Self {
            token: stored.token.filter(|t| !t.is_empty()),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The token for a protected call, or `AuthRequired`.
    pub fn require_token(&self) -> Result<&str> {
        self.token().ok_or(StoreError::AuthRequired)
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        if let Some(path) = &self.path {
            save_to_file(
                &StoredSession {
                    token: self.token.clone(),
                },
                path,
            )?;
        }
        info!("session token stored");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        if let Some(path) = &self.path {
            remove_file(path)?;
        }
        info!("session cleared");
        Ok(())
    }
}
