//! Error types for the repo-bump tool.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for batch update operations.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bitbucket rejected the credentials: {message}")]
    Auth { message: String },

    #[error("Bitbucket API error: {message}")]
    Api { message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed manifest at {}: {}", .path.display(), .message)]
    ManifestParse { path: PathBuf, message: String },

    #[error("Clone failed for {repo}: {message}")]
    Clone { repo: String, message: String },

    #[error("Branch operation failed: {message}")]
    Branch { message: String },

    #[error("Push failed: {message}")]
    Push { message: String },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// A specialized Result type for batch update operations.
pub type Result<T> = std::result::Result<T, BumpError>;
