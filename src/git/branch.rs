//! Git branch operations.

use crate::error::{BumpError, Result};
use crate::git::GitOps;

/// Branch operations for GitOps.
pub trait BranchOps {
    /// Checkout a branch.
    ///
    /// When only the remote-tracking ref exists (the usual state right
    /// after a clone), a local branch is created from `origin/<name>`
    /// with its upstream set before checkout.
    fn checkout(&self, name: &str) -> Result<()>;

    /// Get the current branch name.
    fn current_branch(&self) -> Result<String>;

    /// Check if a branch exists locally.
    fn branch_exists(&self, name: &str) -> bool;
}

impl BranchOps for GitOps {
    fn checkout(&self, name: &str) -> Result<()> {
        if !self.branch_exists(name) {
            self.create_from_remote(name)?;
        }

        let refname = format!("refs/heads/{}", name);
        let reference = self
            .repo()
            .find_reference(&refname)
            .map_err(|_| BumpError::Branch {
                message: format!("Branch '{}' not found", name),
            })?;

        let obj = reference.peel(git2::ObjectType::Commit)?;
        self.repo().checkout_tree(&obj, None)?;
        self.repo().set_head(&refname)?;

        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo().head()?;

        if head.is_branch() {
            head.shorthand()
                .map(String::from)
                .ok_or_else(|| BumpError::Branch {
                    message: "HEAD has no shorthand name".into(),
                })
        } else {
            Err(BumpError::Branch {
                message: "HEAD is not pointing to a branch (detached HEAD state)".into(),
            })
        }
    }

    fn branch_exists(&self, name: &str) -> bool {
        self.repo()
            .find_branch(name, git2::BranchType::Local)
            .is_ok()
    }
}

impl GitOps {
    /// Materialize a local branch from its remote-tracking counterpart.
    fn create_from_remote(&self, name: &str) -> Result<()> {
        let remote_ref = format!("refs/remotes/origin/{}", name);
        let reference = self
            .repo()
            .find_reference(&remote_ref)
            .map_err(|_| BumpError::Branch {
                message: format!("Branch '{}' not found locally or on origin", name),
            })?;

        let commit = reference.peel_to_commit()?;
        let mut branch = self.repo().branch(name, &commit, false)?;
        branch.set_upstream(Some(&format!("origin/{}", name)))?;

        Ok(())
    }
}
