//! Persistent credential storage.
//!
//! Stores the bearer token and cached user profile in
//! `${LANYARD_HOME}/credentials.json` with restricted permissions (0600).
//! The pair is written on login, read once at startup, and erased on
//! logout; it is never partially updated.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::types::StoredUser;

/// The persisted (token, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub token: String,
    pub user: StoredUser,
}

/// On-disk shape. Fields are optional so a damaged or hand-edited file
/// degrades to "not logged in" instead of an error.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<StoredUser>,
}

/// File-backed credential store. Constructed with an explicit path so tests
/// can point it anywhere.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the stored credential.
    ///
    /// Returns `Some` only when both token and user are present; a missing
    /// file or a half-empty one yields `None`.
    pub fn load(&self) -> Result<Option<StoredCredential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credentials from {}", self.path.display()))?;
        let Ok(file) = serde_json::from_str::<CredentialFile>(&contents) else {
            warn!(path = %self.path.display(), "unparseable credential file, treating as logged out");
            return Ok(None);
        };

        match (file.token, file.user) {
            (Some(token), Some(user)) => Ok(Some(StoredCredential { token, user })),
            _ => Ok(None),
        }
    }

    /// Saves the credential pair with restricted permissions (0600).
    pub fn save(&self, credential: &StoredCredential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let file = CredentialFile {
            token: Some(credential.token.clone()),
            user: Some(credential.user.clone()),
        };
        let contents =
            serde_json::to_string_pretty(&file).context("Failed to serialize credentials")?;

        #[cfg(unix)]
        {
            use std::fs::OpenOptions;
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut out = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| {
                    format!("Failed to open {} for writing", self.path.display())
                })?;
            out.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Erases the stored credential. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        let had_credential = self.load().unwrap_or(None).is_some();
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(had_credential)
    }
}
