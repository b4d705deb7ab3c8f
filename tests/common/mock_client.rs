//! In-memory repository client for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use icon_sync::error::{Error, Result};
use icon_sync::platform::{expand_compare_entry, RepositoryClient};
use icon_sync::types::{
    BlobRef, Comparison, CreatePrRequest, PullRequest, RepoCoordinates, TreeEntry,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Path -> blob SHA
pub type Files = BTreeMap<String, String>;

/// Call record for `create_commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommitCall {
    pub message: String,
    pub tree_sha: String,
    pub parents: Vec<String>,
}

/// Call record for `update_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRefCall {
    pub branch: String,
    pub commit_sha: String,
    pub force: bool,
}

#[derive(Debug, Clone)]
struct Commit {
    tree_sha: String,
}

/// Repository state shared by all calls
#[derive(Default)]
struct Store {
    blobs: HashMap<String, String>,
    trees: HashMap<String, Files>,
    commits: HashMap<String, Commit>,
    refs: HashMap<String, String>,
}

/// Mock repository client backed by an in-memory object store
///
/// Blob and tree SHAs are content hashes, so uploading the same markup twice
/// yields the same SHA and an unchanged tree keeps its SHA, as on GitHub.
///
/// Features:
/// - Seeded default branch with arbitrary files
/// - Compare computed from the stored trees, optionally with rename detection
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockRepositoryClient {
    coordinates: RepoCoordinates,
    default_branch: String,
    store: Mutex<Store>,
    next_commit: AtomicU64,
    next_pr_number: AtomicU64,
    // Call tracking
    calls: Mutex<Vec<&'static str>>,
    blob_uploads: Mutex<Vec<String>>,
    create_tree_calls: Mutex<Vec<Vec<BlobRef>>>,
    create_commit_calls: Mutex<Vec<CreateCommitCall>>,
    update_ref_calls: Mutex<Vec<UpdateRefCall>>,
    create_pr_calls: Mutex<Vec<CreatePrRequest>>,
    // Error injection
    fail_blob_containing: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    error_on_default_branch: Mutex<bool>,
    branch_collisions: Mutex<bool>,
    // Compare behavior
    report_renames: Mutex<bool>,
    compare_limit: Mutex<Option<usize>>,
}

impl MockRepositoryClient {
    /// Repository `acme/icons` whose `main` branch holds `files` (path, content)
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let mock = Self {
            coordinates: RepoCoordinates {
                owner: "acme".to_string(),
                repo: "icons".to_string(),
                host: None,
            },
            default_branch: "main".to_string(),
            store: Mutex::new(Store::default()),
            next_commit: AtomicU64::new(1),
            next_pr_number: AtomicU64::new(1),
            calls: Mutex::new(Vec::new()),
            blob_uploads: Mutex::new(Vec::new()),
            create_tree_calls: Mutex::new(Vec::new()),
            create_commit_calls: Mutex::new(Vec::new()),
            update_ref_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            fail_blob_containing: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_default_branch: Mutex::new(false),
            branch_collisions: Mutex::new(false),
            report_renames: Mutex::new(false),
            compare_limit: Mutex::new(None),
        };

        let mut tree = Files::new();
        {
            let mut store = mock.store.lock().unwrap();
            for (path, content) in files {
                let sha = content_sha("blob", content);
                store.blobs.insert(sha.clone(), (*content).to_string());
                tree.insert((*path).to_string(), sha);
            }
            let tree_sha = store_tree(&mut store, tree);
            let commit_sha = mock.alloc_commit_sha();
            store.commits.insert(commit_sha.clone(), Commit { tree_sha });
            store.refs.insert("main".to_string(), commit_sha);
        }
        mock
    }

    /// Empty repository
    pub fn new() -> Self {
        Self::with_files(&[])
    }

    fn alloc_commit_sha(&self) -> String {
        format!("commit{:034}", self.next_commit.fetch_add(1, Ordering::SeqCst))
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn files_at_commit(store: &Store, commit_sha: &str) -> Result<Files> {
        let commit = store
            .commits
            .get(commit_sha)
            .ok_or_else(|| Error::NotFound(format!("commit {commit_sha}")))?;
        Ok(store.trees[&commit.tree_sha].clone())
    }

    // === Error injection methods ===

    /// Make `create_blob` fail for any content containing `needle`
    pub fn fail_blob_containing(&self, needle: &str) {
        *self.fail_blob_containing.lock().unwrap() = Some(needle.to_string());
    }

    /// Make `create_pull_request` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_default_branch` fail as if the token were rejected
    pub fn fail_auth(&self) {
        *self.error_on_default_branch.lock().unwrap() = true;
    }

    /// Make every `create_branch` collide with an existing ref
    pub fn collide_branches(&self) {
        *self.branch_collisions.lock().unwrap() = true;
    }

    // === Compare behavior ===

    /// Report an added file whose blob matches a removed file as `renamed`
    pub fn report_renames(&self) {
        *self.report_renames.lock().unwrap() = true;
    }

    /// List at most `limit` compare entries and flag the rest as truncated
    pub fn limit_compare(&self, limit: usize) {
        *self.compare_limit.lock().unwrap() = Some(limit);
    }

    /// Create a branch directly, bypassing call tracking
    pub fn seed_branch(&self, name: &str) {
        let mut store = self.store.lock().unwrap();
        let main = store.refs["main"].clone();
        store.refs.insert(name.to_string(), main);
    }

    // === State inspection ===

    /// Files on a branch, or `None` if the branch does not exist
    pub fn files_on(&self, branch: &str) -> Option<Files> {
        let store = self.store.lock().unwrap();
        let commit = store.refs.get(branch)?;
        Self::files_at_commit(&store, commit).ok()
    }

    /// Content of a file on a branch
    pub fn read_file(&self, branch: &str, path: &str) -> Option<String> {
        let store = self.store.lock().unwrap();
        let commit = store.refs.get(branch)?;
        let files = Self::files_at_commit(&store, commit).ok()?;
        store.blobs.get(files.get(path)?).cloned()
    }

    /// Branch names, sorted
    pub fn branches(&self) -> Vec<String> {
        let mut names: Vec<_> = self.store.lock().unwrap().refs.keys().cloned().collect();
        names.sort();
        names
    }

    // === Call verification methods ===

    /// Every trait method called, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of remote calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Contents passed to `create_blob`, in completion order
    pub fn blob_uploads(&self) -> Vec<String> {
        self.blob_uploads.lock().unwrap().clone()
    }

    /// Entry lists passed to `create_tree`
    pub fn create_tree_calls(&self) -> Vec<Vec<BlobRef>> {
        self.create_tree_calls.lock().unwrap().clone()
    }

    /// All `create_commit` calls
    pub fn create_commit_calls(&self) -> Vec<CreateCommitCall> {
        self.create_commit_calls.lock().unwrap().clone()
    }

    /// All `update_ref` calls
    pub fn update_ref_calls(&self) -> Vec<UpdateRefCall> {
        self.update_ref_calls.lock().unwrap().clone()
    }

    /// All `create_pull_request` calls
    pub fn create_pr_calls(&self) -> Vec<CreatePrRequest> {
        self.create_pr_calls.lock().unwrap().clone()
    }
}

fn content_sha(kind: &str, content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    kind.hash(&mut hasher);
    content.hash(&mut hasher);
    format!("{kind}{:016x}", hasher.finish())
}

fn store_tree(store: &mut Store, files: Files) -> String {
    let listing: String = files
        .iter()
        .map(|(path, sha)| format!("{path}\0{sha}\n"))
        .collect();
    let sha = content_sha("tree", &listing);
    store.trees.insert(sha.clone(), files);
    sha
}

#[async_trait]
impl RepositoryClient for MockRepositoryClient {
    async fn get_default_branch(&self) -> Result<String> {
        self.record("get_default_branch");
        if *self.error_on_default_branch.lock().unwrap() {
            return Err(Error::Auth("Bad credentials".to_string()));
        }
        Ok(self.default_branch.clone())
    }

    async fn get_ref_commit_sha(&self, branch: &str) -> Result<String> {
        self.record("get_ref_commit_sha");
        self.store
            .lock()
            .unwrap()
            .refs
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("ref heads/{branch}")))
    }

    async fn get_commit_tree_sha(&self, commit_sha: &str) -> Result<String> {
        self.record("get_commit_tree_sha");
        self.store
            .lock()
            .unwrap()
            .commits
            .get(commit_sha)
            .map(|c| c.tree_sha.clone())
            .ok_or_else(|| Error::NotFound(format!("commit {commit_sha}")))
    }

    async fn create_branch(&self, name: &str, from_commit_sha: &str) -> Result<()> {
        self.record("create_branch");
        let mut store = self.store.lock().unwrap();
        if *self.branch_collisions.lock().unwrap() || store.refs.contains_key(name) {
            return Err(Error::RefAlreadyExists(name.to_string()));
        }
        store
            .refs
            .insert(name.to_string(), from_commit_sha.to_string());
        Ok(())
    }

    async fn create_blob(&self, content: &str) -> Result<String> {
        self.record("create_blob");
        if let Some(needle) = self.fail_blob_containing.lock().unwrap().as_ref() {
            if content.contains(needle.as_str()) {
                return Err(Error::GitHubApi("blob rejected".to_string()));
            }
        }
        let sha = content_sha("blob", content);
        self.store
            .lock()
            .unwrap()
            .blobs
            .insert(sha.clone(), content.to_string());
        self.blob_uploads.lock().unwrap().push(content.to_string());
        Ok(sha)
    }

    async fn list_tree(&self, tree_sha: &str) -> Result<Vec<TreeEntry>> {
        self.record("list_tree");
        let store = self.store.lock().unwrap();
        let files = store
            .trees
            .get(tree_sha)
            .ok_or_else(|| Error::NotFound(format!("tree {tree_sha}")))?;
        Ok(files
            .iter()
            .map(|(path, sha)| TreeEntry {
                path: path.clone(),
                sha: sha.clone(),
            })
            .collect())
    }

    async fn create_tree(&self, base_tree_sha: &str, entries: &[BlobRef]) -> Result<String> {
        self.record("create_tree");
        self.create_tree_calls.lock().unwrap().push(entries.to_vec());

        let mut store = self.store.lock().unwrap();
        let mut files = store
            .trees
            .get(base_tree_sha)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("tree {base_tree_sha}")))?;
        for entry in entries {
            match &entry.sha {
                Some(sha) => {
                    if !store.blobs.contains_key(sha) {
                        return Err(Error::GitHubApi(format!("unknown blob {sha}")));
                    }
                    files.insert(entry.path.clone(), sha.clone());
                }
                None => {
                    files.remove(&entry.path);
                }
            }
        }
        Ok(store_tree(&mut store, files))
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_shas: &[String],
    ) -> Result<String> {
        self.record("create_commit");
        self.create_commit_calls
            .lock()
            .unwrap()
            .push(CreateCommitCall {
                message: message.to_string(),
                tree_sha: tree_sha.to_string(),
                parents: parent_shas.to_vec(),
            });

        let sha = self.alloc_commit_sha();
        let mut store = self.store.lock().unwrap();
        if !store.trees.contains_key(tree_sha) {
            return Err(Error::NotFound(format!("tree {tree_sha}")));
        }
        store.commits.insert(
            sha.clone(),
            Commit {
                tree_sha: tree_sha.to_string(),
            },
        );
        Ok(sha)
    }

    async fn update_ref(&self, branch: &str, commit_sha: &str, force: bool) -> Result<()> {
        self.record("update_ref");
        self.update_ref_calls.lock().unwrap().push(UpdateRefCall {
            branch: branch.to_string(),
            commit_sha: commit_sha.to_string(),
            force,
        });

        let mut store = self.store.lock().unwrap();
        if !store.refs.contains_key(branch) {
            return Err(Error::NotFound(format!("ref heads/{branch}")));
        }
        store.refs.insert(branch.to_string(), commit_sha.to_string());
        Ok(())
    }

    async fn compare_refs(&self, base: &str, head: &str) -> Result<Comparison> {
        self.record("compare_refs");
        let renames = *self.report_renames.lock().unwrap();
        let limit = *self.compare_limit.lock().unwrap();
        let store = self.store.lock().unwrap();
        let resolve = |name: &str| {
            store
                .refs
                .get(name)
                .ok_or_else(|| Error::NotFound(format!("ref heads/{name}")))
                .and_then(|commit| Self::files_at_commit(&store, commit))
        };
        let before = resolve(base)?;
        let after = resolve(head)?;

        // (filename, status, previous_filename) as the compare API lists them
        let mut entries: Vec<(String, &str, Option<String>)> = Vec::new();
        let mut removed: Vec<(&String, &String)> = before
            .iter()
            .filter(|(path, _)| !after.contains_key(*path))
            .collect();
        for (path, sha) in &after {
            match before.get(path) {
                None => {
                    let renamed_from = removed
                        .iter()
                        .position(|(_, old_sha)| renames && *old_sha == sha)
                        .map(|i| removed.remove(i).0.clone());
                    match renamed_from {
                        Some(old) => entries.push((path.clone(), "renamed", Some(old))),
                        None => entries.push((path.clone(), "added", None)),
                    }
                }
                Some(old) if old != sha => entries.push((path.clone(), "modified", None)),
                Some(_) => {}
            }
        }
        entries.extend(removed.into_iter().map(|(path, _)| (path.clone(), "removed", None)));
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let truncated = limit.is_some_and(|limit| entries.len() > limit);
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        let files = entries
            .into_iter()
            .flat_map(|(path, status, previous)| expand_compare_entry(path, status, previous))
            .collect();
        Ok(Comparison { files, truncated })
    }

    async fn create_pull_request(&self, request: &CreatePrRequest) -> Result<PullRequest> {
        self.record("create_pull_request");
        self.create_pr_calls.lock().unwrap().push(request.clone());

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/acme/icons/pull/{number}"),
            base_ref: request.base.clone(),
            head_ref: request.head.clone(),
            title: request.title.clone(),
        })
    }

    fn coordinates(&self) -> &RepoCoordinates {
        &self.coordinates
    }
}
