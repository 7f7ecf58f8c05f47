//! Git operations for the update workflow.
//!
//! A thin layer over git2 covering exactly what one repository update
//! needs: clone with authentication, branch checkout, staging, commit,
//! and push.

mod auth;
mod branch;
mod commit;
mod push;

pub use auth::GitAuth;
pub use branch::BranchOps;
pub use commit::CommitOps;
pub use push::PushOps;

use crate::error::{BumpError, Result};
use git2::Repository;
use std::path::Path;

/// Git operations wrapper with write capabilities.
///
/// # Example
///
/// ```rust,no_run
/// use repo_bump::git::{BranchOps, CommitOps, GitAuth, GitOps, PushOps};
///
/// let auth = GitAuth::basic("alice", "app-password");
/// let git = GitOps::clone(
///     "https://bitbucket.org/acme/billing-service.git",
///     "/tmp/billing-service".as_ref(),
///     auth,
/// )?;
///
/// git.checkout("release")?;
/// // ... edit files ...
/// git.stage_all()?;
/// git.commit("Update left-pad to version 2.0.0 (scripted update)")?;
/// git.push("origin", "release")?;
/// # Ok::<(), repo_bump::error::BumpError>(())
/// ```
pub struct GitOps {
    repo: Repository,
    auth: GitAuth,
}

impl std::fmt::Debug for GitOps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitOps")
            .field("repo", &self.repo.path())
            .field("auth", &self.auth)
            .finish()
    }
}

impl GitOps {
    /// Open an existing repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::open(path.as_ref())?;
        Ok(Self {
            repo,
            auth: GitAuth::None,
        })
    }

    /// Clone a repository into `into`, authenticating fetches with `auth`.
    ///
    /// The remote keeps its clean URL; credentials travel through the
    /// transport callbacks, never the stored config.
    pub fn clone(url: &str, into: &Path, auth: GitAuth) -> Result<Self> {
        let mut callbacks = git2::RemoteCallbacks::new();
        auth.configure_callbacks(&mut callbacks);

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        let repo = git2::build::RepoBuilder::new()
            .fetch_options(fetch_options)
            .clone(url, into)
            .map_err(|e| BumpError::Clone {
                repo: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { repo, auth })
    }

    /// Set authentication method for remote operations.
    pub fn with_auth(mut self, auth: GitAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Get a reference to the underlying git2::Repository.
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Get the repository's working directory path.
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Get the current authentication configuration.
    pub fn auth(&self) -> &GitAuth {
        &self.auth
    }
}
