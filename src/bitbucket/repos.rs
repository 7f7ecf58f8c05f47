//! Bitbucket repository listing and branch queries.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::bitbucket::BitbucketClient;
use crate::error::Result;

/// Repository information from the Bitbucket API.
#[derive(Debug, Clone, Deserialize)]
pub struct BitbucketRepo {
    pub slug: String,
    pub full_name: String,
    #[serde(default)]
    pub links: RepoLinks,
}

/// The `links` object of a repository payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoLinks {
    #[serde(default, rename = "clone")]
    pub clone_links: Vec<CloneLink>,
}

/// One advertised clone endpoint (`https` or `ssh`).
#[derive(Debug, Clone, Deserialize)]
pub struct CloneLink {
    pub name: String,
    pub href: String,
}

impl BitbucketRepo {
    /// The HTTPS clone URL, falling back to the first advertised link.
    pub fn clone_url(&self) -> Option<&str> {
        self.links
            .clone_links
            .iter()
            .find(|link| link.name == "https")
            .or_else(|| self.links.clone_links.first())
            .map(|link| link.href.as_str())
    }
}

/// Bitbucket's paginated list envelope.
#[derive(Debug, Deserialize)]
struct Paginated<T> {
    values: Vec<T>,
    next: Option<String>,
}

/// Repository listing and branch query operations.
pub trait RepoOps {
    /// List every repository the authenticated account can see.
    fn fetch_repositories(&self) -> Result<Vec<BitbucketRepo>>;

    /// Whether the named branch exists in the named repository.
    fn check_branch_exists(&self, full_name: &str, branch: &str) -> Result<bool>;
}

impl RepoOps for BitbucketClient {
    fn fetch_repositories(&self) -> Result<Vec<BitbucketRepo>> {
        let mut all_repos = Vec::new();
        let mut url = format!("{}/repositories?role=member&pagelen=100", self.base_url());

        loop {
            let page: Paginated<BitbucketRepo> = self.get_json(&url)?;
            all_repos.extend(page.values);

            match page.next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(all_repos)
    }

    fn check_branch_exists(&self, full_name: &str, branch: &str) -> Result<bool> {
        let url = format!(
            "{}/repositories/{}/refs/branches/{}",
            self.base_url(),
            full_name,
            urlencoding::encode(branch)
        );

        let response = self.send_get(&url)?;
        let status = response.status();

        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        let body = response.text().unwrap_or_default();
        Err(self.status_error(status, &body))
    }
}
