//! Bitbucket Cloud API integration.
//!
//! This module provides a client for the parts of the Bitbucket 2.0 REST
//! API the update workflow needs:
//! - Listing every repository the account can see
//! - Testing whether a named branch exists in a repository
//!
//! # Example
//!
//! ```rust,no_run
//! use repo_bump::bitbucket::{BitbucketClient, RepoOps};
//!
//! let client = BitbucketClient::new("alice", "app-password");
//!
//! for repo in client.fetch_repositories()? {
//!     println!("{}", repo.full_name);
//! }
//! # Ok::<(), repo_bump::error::BumpError>(())
//! ```

mod client;
mod repos;

pub use client::{BitbucketClient, DEFAULT_BASE_URL};
pub use repos::{BitbucketRepo, CloneLink, RepoLinks, RepoOps};
