//! Git push operations with authentication.

use crate::error::{BumpError, Result};
use crate::git::GitOps;
use git2::{PushOptions, RemoteCallbacks};

/// Push operations for GitOps.
pub trait PushOps {
    /// Push a branch to a remote.
    fn push(&self, remote_name: &str, branch: &str) -> Result<()>;
}

impl PushOps for GitOps {
    fn push(&self, remote_name: &str, branch: &str) -> Result<()> {
        let mut remote = self
            .repo()
            .find_remote(remote_name)
            .map_err(|_| BumpError::Push {
                message: format!("Remote '{}' not found", remote_name),
            })?;

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);

        let mut callbacks = RemoteCallbacks::new();
        self.auth().configure_callbacks(&mut callbacks);

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        remote
            .push(&[&refspec], Some(&mut push_options))
            .map_err(|e| BumpError::Push {
                message: e.to_string(),
            })?;

        Ok(())
    }
}
