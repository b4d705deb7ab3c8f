//! Blob uploads

use crate::error::{Error, Result};
use crate::platform::RepositoryClient;
use crate::publish::ProgressCallback;
use crate::types::{BlobRef, SvgDocument};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

/// Repository path for an icon: `<folder>/<name>.svg`
pub fn blob_path(folder: &str, name: &str) -> String {
    format!("{folder}/{name}.svg")
}

/// Upload every document as a blob, concurrently
///
/// Returns entries in document order. The first failed upload aborts the
/// remaining ones; blobs that already landed stay behind as unreferenced objects.
pub async fn upload_blobs(
    client: &Arc<dyn RepositoryClient>,
    folder: &str,
    documents: &[SvgDocument],
    progress: &dyn ProgressCallback,
) -> Result<Vec<BlobRef>> {
    let mut uploads = JoinSet::new();

    for (index, doc) in documents.iter().enumerate() {
        let client = Arc::clone(client);
        let path = blob_path(folder, &doc.name);
        let content = doc.svg_text.clone();
        uploads.spawn(async move {
            let sha = client.create_blob(&content).await?;
            Ok::<_, Error>((index, BlobRef::blob(path, sha)))
        });
    }

    let mut slots: Vec<Option<BlobRef>> = vec![None; documents.len()];
    while let Some(joined) = uploads.join_next().await {
        let (index, blob) = match joined {
            Ok(Ok(uploaded)) => uploaded,
            Ok(Err(e)) => {
                uploads.abort_all();
                return Err(e);
            }
            Err(e) => {
                uploads.abort_all();
                return Err(Error::Internal(format!("blob upload task failed: {e}")));
            }
        };
        debug!(path = %blob.path, "uploaded blob");
        progress.on_blob_uploaded(&blob.path).await;
        slots[index] = Some(blob);
    }

    Ok(slots.into_iter().flatten().collect())
}
