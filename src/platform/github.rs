//! GitHub repository client implementation

use crate::error::{Error, Result};
use crate::platform::RepositoryClient;
use crate::types::{
    BlobRef, ChangedFile, Comparison, CreatePrRequest, FileStatus, PullRequest, RepoCoordinates,
    TreeEntry,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Most files the compare endpoint lists; later pages only page commits
pub const COMPARE_FILE_LIMIT: usize = 300;

// Git data API payloads

#[derive(Deserialize)]
struct RepositoryInfo {
    default_branch: String,
}

#[derive(Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Deserialize)]
struct RefResponse {
    object: GitObject,
}

#[derive(Deserialize)]
struct CommitResponse {
    tree: GitObject,
}

#[derive(Deserialize)]
struct ShaResponse {
    sha: String,
}

#[derive(Deserialize)]
struct TreeResponse {
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    sha: Option<String>,
}

#[derive(Deserialize)]
struct CompareResponse {
    #[serde(default)]
    files: Vec<CompareFile>,
}

#[derive(Deserialize)]
struct CompareFile {
    filename: String,
    status: String,
    #[serde(default)]
    previous_filename: Option<String>,
}

#[derive(Serialize)]
struct CreateRefBody<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

#[derive(Serialize)]
struct CreateBlobBody<'a> {
    content: &'a str,
    encoding: &'static str,
}

#[derive(Serialize)]
struct CreateTreeBody<'a> {
    base_tree: &'a str,
    tree: &'a [BlobRef],
}

#[derive(Serialize)]
struct CreateCommitBody<'a> {
    message: &'a str,
    tree: &'a str,
    parents: &'a [String],
}

#[derive(Serialize)]
struct UpdateRefBody<'a> {
    sha: &'a str,
    force: bool,
}

/// GitHub client using octocrab
pub struct GitHubService {
    client: Octocrab,
    coordinates: RepoCoordinates,
}

impl GitHubService {
    /// Create a client for github.com, or for `coordinates.host` as GitHub Enterprise
    pub fn new(token: &str, coordinates: RepoCoordinates) -> Result<Self> {
        let base_uri = coordinates
            .host
            .as_ref()
            .map(|h| format!("https://{h}/api/v3"));
        Self::build(token, coordinates, base_uri.as_deref())
    }

    /// Create a client against an explicit API base URI
    pub fn with_base_uri(token: &str, coordinates: RepoCoordinates, base_uri: &str) -> Result<Self> {
        Self::build(token, coordinates, Some(base_uri))
    }

    fn build(token: &str, coordinates: RepoCoordinates, base_uri: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            coordinates,
        })
    }

    fn route(&self, path: &str) -> String {
        format!(
            "/repos/{}/{}/{path}",
            self.coordinates.owner, self.coordinates.repo
        )
    }
}

/// Percent-encode a ref name segment by segment, keeping `/` separators
fn encode_ref(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Changed files for one entry of a comparison
///
/// A rename becomes a removal of `previous_filename` plus an addition of
/// `filename`, and a copy is an addition. Unknown statuses yield nothing.
pub fn expand_compare_entry(
    filename: String,
    status: &str,
    previous_filename: Option<String>,
) -> Vec<ChangedFile> {
    let change = |path: String, status: FileStatus| ChangedFile { path, status };
    match status {
        "added" | "copied" => vec![change(filename, FileStatus::Added)],
        "removed" => vec![change(filename, FileStatus::Removed)],
        "modified" | "changed" => vec![change(filename, FileStatus::Modified)],
        "renamed" => previous_filename
            .map(|old| change(old, FileStatus::Removed))
            .into_iter()
            .chain(std::iter::once(change(filename, FileStatus::Added)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl RepositoryClient for GitHubService {
    async fn get_default_branch(&self) -> Result<String> {
        debug!(repo = %self.coordinates, "reading default branch");
        let route = format!(
            "/repos/{}/{}",
            self.coordinates.owner, self.coordinates.repo
        );
        let info: RepositoryInfo = self.client.get(route, None::<&()>).await?;
        Ok(info.default_branch)
    }

    async fn get_ref_commit_sha(&self, branch: &str) -> Result<String> {
        debug!(branch, "reading ref");
        let route = self.route(&format!("git/ref/heads/{}", encode_ref(branch)));
        let reference: RefResponse = self.client.get(route, None::<&()>).await?;
        Ok(reference.object.sha)
    }

    async fn get_commit_tree_sha(&self, commit_sha: &str) -> Result<String> {
        debug!(commit_sha, "reading commit");
        let route = self.route(&format!("git/commits/{commit_sha}"));
        let commit: CommitResponse = self.client.get(route, None::<&()>).await?;
        Ok(commit.tree.sha)
    }

    async fn create_branch(&self, name: &str, from_commit_sha: &str) -> Result<()> {
        debug!(name, from_commit_sha, "creating branch");
        let body = CreateRefBody {
            reference: format!("refs/heads/{name}"),
            sha: from_commit_sha,
        };
        let created: Result<serde_json::Value> = self
            .client
            .post(self.route("git/refs"), Some(&body))
            .await
            .map_err(Error::from);
        match created {
            Ok(_) => Ok(()),
            Err(Error::RefAlreadyExists(_)) => Err(Error::RefAlreadyExists(name.to_string())),
            Err(e) => Err(e),
        }
    }

    async fn create_blob(&self, content: &str) -> Result<String> {
        let body = CreateBlobBody {
            content,
            encoding: "utf-8",
        };
        let blob: ShaResponse = self.client.post(self.route("git/blobs"), Some(&body)).await?;
        debug!(sha = %blob.sha, bytes = content.len(), "created blob");
        Ok(blob.sha)
    }

    async fn list_tree(&self, tree_sha: &str) -> Result<Vec<TreeEntry>> {
        debug!(tree_sha, "listing tree");
        let route = self.route(&format!("git/trees/{tree_sha}"));
        let tree: TreeResponse = self
            .client
            .get(route, Some(&[("recursive", "1")]))
            .await?;

        if tree.truncated {
            warn!(tree_sha, "tree listing was truncated by GitHub; removals may be incomplete");
        }

        Ok(tree
            .tree
            .into_iter()
            .filter(|item| item.kind == "blob")
            .filter_map(|item| {
                item.sha.map(|sha| TreeEntry {
                    path: item.path,
                    sha,
                })
            })
            .collect())
    }

    async fn create_tree(&self, base_tree_sha: &str, entries: &[BlobRef]) -> Result<String> {
        debug!(base_tree_sha, entries = entries.len(), "creating tree");
        let body = CreateTreeBody {
            base_tree: base_tree_sha,
            tree: entries,
        };
        let tree: ShaResponse = self.client.post(self.route("git/trees"), Some(&body)).await?;
        Ok(tree.sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_shas: &[String],
    ) -> Result<String> {
        debug!(tree_sha, ?parent_shas, "creating commit");
        let body = CreateCommitBody {
            message,
            tree: tree_sha,
            parents: parent_shas,
        };
        let commit: ShaResponse = self
            .client
            .post(self.route("git/commits"), Some(&body))
            .await?;
        Ok(commit.sha)
    }

    async fn update_ref(&self, branch: &str, commit_sha: &str, force: bool) -> Result<()> {
        debug!(branch, commit_sha, force, "updating ref");
        let route = self.route(&format!("git/refs/heads/{}", encode_ref(branch)));
        let body = UpdateRefBody {
            sha: commit_sha,
            force,
        };
        let _: serde_json::Value = self.client.patch(route, Some(&body)).await?;
        Ok(())
    }

    async fn compare_refs(&self, base: &str, head: &str) -> Result<Comparison> {
        debug!(base, head, "comparing refs");
        let route = self.route(&format!(
            "compare/{}...{}",
            encode_ref(base),
            encode_ref(head)
        ));
        let comparison: CompareResponse = self.client.get(route, None::<&()>).await?;

        let truncated = comparison.files.len() >= COMPARE_FILE_LIMIT;
        if truncated {
            warn!(
                base,
                head,
                limit = COMPARE_FILE_LIMIT,
                "comparison file list hit GitHub's limit; the summary is partial"
            );
        }

        let files = comparison
            .files
            .into_iter()
            .flat_map(|file| {
                expand_compare_entry(file.filename, &file.status, file.previous_filename)
            })
            .collect();
        Ok(Comparison { files, truncated })
    }

    async fn create_pull_request(&self, request: &CreatePrRequest) -> Result<PullRequest> {
        debug!(head = %request.head, base = %request.base, "creating PR");
        let pr = self
            .client
            .pulls(&self.coordinates.owner, &self.coordinates.repo)
            .create(&request.title, &request.head, &request.base)
            .body(&request.body)
            .send()
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    fn coordinates(&self) -> &RepoCoordinates {
        &self.coordinates
    }
}
