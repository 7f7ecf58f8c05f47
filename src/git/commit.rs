//! Git staging and commit operations.

use crate::error::Result;
use crate::git::GitOps;
use git2::{IndexAddOption, Signature};

/// Commit operations for GitOps.
pub trait CommitOps {
    /// Stage all changes (new, modified, deleted files).
    fn stage_all(&self) -> Result<()>;

    /// Create a commit with the staged changes.
    fn commit(&self, message: &str) -> Result<git2::Oid>;
}

impl CommitOps for GitOps {
    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo().index()?;

        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;

        // Record deletions too.
        index.update_all(["*"].iter(), None)?;

        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<git2::Oid> {
        let signature = self.signature()?;

        let mut index = self.repo().index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo().find_tree(tree_id)?;

        let parent = self.repo().head()?.peel_to_commit()?;

        let oid = self.repo().commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(oid)
    }
}

impl GitOps {
    fn signature(&self) -> Result<Signature<'_>> {
        self.repo().signature().or_else(|_| {
            // Fallback signature for automation.
            Signature::now("repo-bump", "repo-bump@automated.local").map_err(|e| e.into())
        })
    }
}
