//! Batch update orchestration across repositories.
//!
//! One run: fetch the repository list, and for every repository that
//! carries the target branch, clone it into a scratch workspace, patch
//! its manifest, and commit/push when something changed. Each repository
//! is an independent attempt — one broken clone or rejected push never
//! blocks the rest of the batch. The scratch workspace is removed
//! unconditionally at the end.

use crate::bitbucket::{BitbucketClient, BitbucketRepo, RepoOps};
use crate::error::Result;
use crate::git::{BranchOps, CommitOps, GitAuth, GitOps, PushOps};
use crate::manifest::{self, NotApplicableReason, PatchOutcome};
use crate::resolver::UpdateParams;
use std::path::PathBuf;

/// The slice of repository metadata one run needs.
#[derive(Debug, Clone)]
pub struct RepoDescriptor {
    pub slug: String,
    pub full_name: String,
    pub clone_url: String,
}

impl From<&BitbucketRepo> for RepoDescriptor {
    fn from(repo: &BitbucketRepo) -> Self {
        Self {
            slug: repo.slug.clone(),
            full_name: repo.full_name.clone(),
            clone_url: repo.clone_url().unwrap_or_default().to_string(),
        }
    }
}

/// Source of repositories and branch facts (trait object so tests can
/// substitute fakes for the live API).
pub trait RepoDirectory {
    /// List every repository visible to the account.
    fn list_repositories(&self) -> Result<Vec<RepoDescriptor>>;

    /// Whether the named branch exists in the named repository.
    fn branch_exists(&self, full_name: &str, branch: &str) -> Result<bool>;
}

impl RepoDirectory for BitbucketClient {
    fn list_repositories(&self) -> Result<Vec<RepoDescriptor>> {
        let repos = self.fetch_repositories()?;
        Ok(repos.iter().map(RepoDescriptor::from).collect())
    }

    fn branch_exists(&self, full_name: &str, branch: &str) -> Result<bool> {
        self.check_branch_exists(full_name, branch)
    }
}

/// Terminal state of one repository within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoStatus {
    /// Manifest patched, committed, and pushed.
    Updated { branch: String },
    /// The target branch does not exist here.
    BranchAbsent,
    /// Cloned and inspected, but there was nothing to update.
    NotApplicable(NotApplicableReason),
    /// Some step failed; the rest of the batch carried on.
    Failed(String),
}

/// Result for a single repository.
#[derive(Debug, Clone)]
pub struct RepoReport {
    pub slug: String,
    pub full_name: String,
    pub status: RepoStatus,
}

/// Tally of terminal states across the run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub updated: usize,
    pub branch_absent: usize,
    pub not_applicable: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, status: &RepoStatus) {
        match status {
            RepoStatus::Updated { .. } => self.updated += 1,
            RepoStatus::BranchAbsent => self.branch_absent += 1,
            RepoStatus::NotApplicable(_) => self.not_applicable += 1,
            RepoStatus::Failed(_) => self.failed += 1,
        }
    }
}

/// Result of executing a batch update.
#[derive(Debug)]
pub struct BatchResult {
    pub reports: Vec<RepoReport>,
    pub summary: BatchSummary,
}

/// Progress notifications emitted while a run executes.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    RepositoriesFetched { count: usize },
    Cloning { repo: &'a RepoDescriptor },
    Pushing { repo: &'a RepoDescriptor, branch: &'a str },
    RepoFinished { report: &'a RepoReport },
    CleaningUp,
}

/// The batch update orchestrator.
///
/// # Example
///
/// ```rust,no_run
/// use repo_bump::batch::BatchUpdate;
/// use repo_bump::bitbucket::BitbucketClient;
/// use repo_bump::git::GitAuth;
/// use repo_bump::resolver::UpdateParams;
///
/// let client = BitbucketClient::new("alice", "app-password");
/// let params = UpdateParams {
///     branch: "release".into(),
///     library: "left-pad".into(),
///     version: "2.0.0".into(),
/// };
///
/// let result = BatchUpdate::new(&client, params)
///     .with_git_auth(GitAuth::basic("alice", "app-password"))
///     .execute(|_| {})?;
///
/// println!("updated {} repositories", result.summary.updated);
/// # Ok::<(), repo_bump::error::BumpError>(())
/// ```
pub struct BatchUpdate<'a> {
    directory: &'a dyn RepoDirectory,
    params: UpdateParams,
    workspace: PathBuf,
    git_auth: GitAuth,
}

impl<'a> BatchUpdate<'a> {
    pub fn new(directory: &'a dyn RepoDirectory, params: UpdateParams) -> Self {
        Self {
            directory,
            params,
            workspace: std::env::temp_dir().join("repo-bump-workspace"),
            git_auth: GitAuth::None,
        }
    }

    /// Set the scratch workspace directory for clones.
    pub fn workspace(mut self, path: impl Into<PathBuf>) -> Self {
        self.workspace = path.into();
        self
    }

    /// Set git authentication for clone and push.
    pub fn with_git_auth(mut self, auth: GitAuth) -> Self {
        self.git_auth = auth;
        self
    }

    /// Run the batch. The scratch workspace is removed before returning,
    /// whether the run succeeded or not.
    pub fn execute<F>(self, on_event: F) -> Result<BatchResult>
    where
        F: Fn(BatchEvent<'_>),
    {
        std::fs::create_dir_all(&self.workspace)?;

        let outcome = self.run(&on_event);

        on_event(BatchEvent::CleaningUp);
        let cleanup = std::fs::remove_dir_all(&self.workspace);

        let result = outcome?;
        cleanup?;
        Ok(result)
    }

    fn run<F>(&self, on_event: &F) -> Result<BatchResult>
    where
        F: Fn(BatchEvent<'_>),
    {
        let repos = self.directory.list_repositories()?;
        on_event(BatchEvent::RepositoriesFetched { count: repos.len() });

        let mut summary = BatchSummary {
            total: repos.len(),
            ..BatchSummary::default()
        };
        let mut reports = Vec::with_capacity(repos.len());

        for repo in &repos {
            let report = self.process_repo(repo, on_event);
            summary.record(&report.status);
            on_event(BatchEvent::RepoFinished { report: &report });
            reports.push(report);
        }

        Ok(BatchResult { reports, summary })
    }

    fn process_repo<F>(&self, repo: &RepoDescriptor, on_event: &F) -> RepoReport
    where
        F: Fn(BatchEvent<'_>),
    {
        let report = |status: RepoStatus| RepoReport {
            slug: repo.slug.clone(),
            full_name: repo.full_name.clone(),
            status,
        };

        match self
            .directory
            .branch_exists(&repo.full_name, &self.params.branch)
        {
            Ok(true) => {}
            Ok(false) => return report(RepoStatus::BranchAbsent),
            Err(e) => {
                return report(RepoStatus::Failed(format!("Branch query failed: {}", e)));
            }
        }

        on_event(BatchEvent::Cloning { repo });
        let clone_dir = self.workspace.join(&repo.slug);
        let git = match GitOps::clone(&repo.clone_url, &clone_dir, self.git_auth.clone()) {
            Ok(git) => git,
            Err(e) => return report(RepoStatus::Failed(e.to_string())),
        };

        if let Err(e) = git.checkout(&self.params.branch) {
            return report(RepoStatus::Failed(e.to_string()));
        }

        match manifest::patch_manifest(&clone_dir, &self.params.library, &self.params.version) {
            Ok(PatchOutcome::Applied { .. }) => {}
            Ok(PatchOutcome::NotApplicable(reason)) => {
                return report(RepoStatus::NotApplicable(reason));
            }
            Err(e) => return report(RepoStatus::Failed(e.to_string())),
        }

        on_event(BatchEvent::Pushing {
            repo,
            branch: &self.params.branch,
        });

        let message = format!(
            "Update {} to version {} (scripted update)",
            self.params.library, self.params.version
        );
        let pushed = git
            .stage_all()
            .and_then(|_| git.commit(&message))
            .and_then(|_| git.push("origin", &self.params.branch));

        match pushed {
            Ok(()) => report(RepoStatus::Updated {
                branch: self.params.branch.clone(),
            }),
            Err(e) => report(RepoStatus::Failed(e.to_string())),
        }
    }
}
