//! Credential storage for the Bitbucket account.
//!
//! Credentials live in a small clear-text JSON file next to the executable
//! and are only ever written by the `set-username` / `set-password`
//! subcommands. Loading is soft: a missing or unreadable file yields an
//! empty record so first runs can point the user at the setter commands.

use crate::error::{BumpError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the credentials store, resolved next to the executable.
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding an unset username.
pub const USERNAME_ENV: &str = "BITBUCKET_USERNAME";

/// Environment variable overriding an unset app password.
pub const APP_PASSWORD_ENV: &str = "BITBUCKET_APP_PASSWORD";

/// The Bitbucket account identity used for both the REST API and git
/// transport over HTTPS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub app_password: String,
}

impl Credentials {
    /// Both fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.app_password.is_empty()
    }

    /// The fatal precondition for every network-dependent command.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(BumpError::Config(
                "You must set username and app password first (repo-bump set-username / set-password)."
                    .into(),
            ))
        }
    }

    /// Fill empty fields from the environment.
    pub fn merged_with_env(mut self) -> Self {
        if self.username.is_empty()
            && let Ok(username) = std::env::var(USERNAME_ENV)
        {
            self.username = username;
        }
        if self.app_password.is_empty()
            && let Ok(app_password) = std::env::var(APP_PASSWORD_ENV)
        {
            self.app_password = app_password;
        }
        self
    }
}

/// Reads and writes the credentials file at an explicit path.
///
/// Field merging is the caller's concern: the setter subcommands load the
/// current record, replace one field, and save the whole record back, so
/// setting the username never erases a stored app password.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `config.json` beside the running executable.
    pub fn default_path() -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        Ok(exe.with_file_name(CONFIG_FILE))
    }

    /// Load stored credentials, or an empty record if the file is missing
    /// or malformed.
    pub fn load(&self) -> Credentials {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return Credentials::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    /// Overwrite the backing file with the given record.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(credentials)?;
        rendered.push('\n');
        std::fs::write(&self.path, rendered)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
