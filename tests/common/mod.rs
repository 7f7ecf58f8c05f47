//! Test fixtures: throwaway git remotes built with git2.
#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;

/// A bare repository standing in for a hosted remote.
/// Removed from disk when dropped.
pub struct RemoteRepo {
    dir: TempDir,
}

impl RemoteRepo {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> String {
        self.dir.path().to_str().unwrap().to_string()
    }
}

/// Initialize a working repository whose first branch is `branch`.
pub fn init_repo(dir: &Path, branch: &str) -> git2::Repository {
    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head(branch);
    git2::Repository::init_opts(dir, &opts).unwrap()
}

/// Write `files` into the working tree and commit everything.
pub fn commit_files(repo: &git2::Repository, files: &[(&str, &str)], message: &str) {
    let workdir = repo.workdir().unwrap();
    for (name, contents) in files {
        std::fs::write(workdir.join(name), contents).unwrap();
    }

    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}

/// Create and switch to a new branch at the current HEAD.
pub fn checkout_new_branch(repo: &git2::Repository, name: &str) {
    let commit = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(name, &commit, false).unwrap();
    repo.set_head(&format!("refs/heads/{}", name)).unwrap();

    let mut checkout = git2::build::CheckoutBuilder::new();
    checkout.force();
    repo.checkout_head(Some(&mut checkout)).unwrap();
}

/// Push `branches` from a working repository into a fresh bare remote and
/// make `head` its default branch.
pub fn publish(repo: &git2::Repository, branches: &[&str], head: &str) -> RemoteRepo {
    let dir = TempDir::new().unwrap();
    git2::Repository::init_bare(dir.path()).unwrap();

    let mut remote = repo
        .remote("origin", dir.path().to_str().unwrap())
        .unwrap();
    let refspecs: Vec<String> = branches
        .iter()
        .map(|b| format!("refs/heads/{0}:refs/heads/{0}", b))
        .collect();
    let refspec_refs: Vec<&str> = refspecs.iter().map(String::as_str).collect();
    remote.push(&refspec_refs, None).unwrap();

    let bare = git2::Repository::open(dir.path()).unwrap();
    bare.set_head(&format!("refs/heads/{}", head)).unwrap();

    RemoteRepo { dir }
}

/// One-branch convenience: a bare remote whose `branch` tip carries `files`.
pub fn bare_remote(branch: &str, files: &[(&str, &str)]) -> RemoteRepo {
    let src = TempDir::new().unwrap();
    let repo = init_repo(src.path(), branch);
    commit_files(&repo, files, "Initial commit");
    publish(&repo, &[branch], branch)
}

/// Contents of `file` at the tip of `branch` in the repository at `path`.
pub fn read_file_on_branch(path: &Path, branch: &str, file: &str) -> String {
    let repo = git2::Repository::open(path).unwrap();
    let branch = repo.find_branch(branch, git2::BranchType::Local).unwrap();
    let tree = branch.get().peel_to_commit().unwrap().tree().unwrap();
    let entry = tree.get_path(Path::new(file)).unwrap();
    let object = entry.to_object(&repo).unwrap();
    String::from_utf8(object.as_blob().unwrap().content().to_vec()).unwrap()
}

/// Commit message at the tip of `branch`.
pub fn tip_message(path: &Path, branch: &str) -> String {
    let repo = git2::Repository::open(path).unwrap();
    let branch = repo.find_branch(branch, git2::BranchType::Local).unwrap();
    branch
        .get()
        .peel_to_commit()
        .unwrap()
        .message()
        .unwrap()
        .to_string()
}

/// Number of commits reachable from the tip of `branch`.
pub fn commit_count(path: &Path, branch: &str) -> usize {
    let repo = git2::Repository::open(path).unwrap();
    let branch = repo.find_branch(branch, git2::BranchType::Local).unwrap();
    let mut walk = repo.revwalk().unwrap();
    walk.push(branch.get().peel_to_commit().unwrap().id())
        .unwrap();
    walk.count()
}
