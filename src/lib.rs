//! # repo-bump
//!
//! Batch dependency version updates across Bitbucket repositories.
//!
//! Given a branch name, a library, and a target version, one run walks
//! every repository the account can see, and in each repository that
//! carries the branch: clones it into a scratch workspace, rewrites the
//! library's pinned version in `package.json`, commits, and pushes the
//! branch back. Repositories without the branch or without the dependency
//! are reported and skipped; one repository's failure never stops the
//! batch; the scratch workspace is removed when the run ends.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repo_bump::prelude::*;
//!
//! let client = BitbucketClient::new("alice", "app-password");
//! let params = UpdateParams {
//!     branch: "release".into(),
//!     library: "left-pad".into(),
//!     version: "2.0.0".into(),
//! };
//!
//! let result = BatchUpdate::new(&client, params)
//!     .with_git_auth(GitAuth::basic("alice", "app-password"))
//!     .execute(|_| {})?;
//!
//! println!("updated {} of {} repositories", result.summary.updated, result.summary.total);
//! # Ok::<(), repo_bump::error::BumpError>(())
//! ```

pub mod batch;
pub mod bitbucket;
pub mod credentials;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod resolver;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::batch::{
        BatchEvent, BatchResult, BatchSummary, BatchUpdate, RepoDescriptor, RepoDirectory,
        RepoReport, RepoStatus,
    };
    pub use crate::bitbucket::{BitbucketClient, BitbucketRepo, RepoOps};
    pub use crate::credentials::{CredentialStore, Credentials};
    pub use crate::error::{BumpError, Result};
    pub use crate::git::{BranchOps, CommitOps, GitAuth, GitOps, PushOps};
    pub use crate::manifest::{NotApplicableReason, PatchOutcome, patch_manifest};
    pub use crate::resolver::{ArgResolver, ParameterResolver, PromptResolver, UpdateParams};
}

pub use prelude::*;
