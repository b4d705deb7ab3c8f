//! Selection sources: where extracted SVG documents come from

use crate::error::{Error, Result};
use crate::extract::scene::{exportable_children, SceneNode};
use crate::types::SvgDocument;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One-shot request/response port to the design-tool host
///
/// A call answers "extract the current selection's SVGs". Implementations
/// must not return partially extracted selections.
#[async_trait]
pub trait SelectionSource: Send + Sync {
    /// Extract the SVG documents of the current selection
    async fn extract_selection(&self) -> Result<Vec<SvgDocument>>;
}

/// Scene export written by the host plugin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneExport {
    /// Selected nodes, in selection order
    #[serde(default)]
    pub selection: Vec<SceneNode>,
}

impl SceneExport {
    /// Run the extractor over this selection and collect the rendered markup
    pub fn to_documents(&self) -> Result<Vec<SvgDocument>> {
        exportable_children(&self.selection)?
            .into_iter()
            .map(document_from_node)
            .collect()
    }
}

fn document_from_node(node: &SceneNode) -> Result<SvgDocument> {
    let svg_text = match (&node.svg, &node.svg_bytes) {
        (Some(text), _) => text.clone(),
        (None, Some(bytes)) => String::from_utf8(bytes.clone()).map_err(|e| {
            Error::InvalidDocument(format!("'{}' is not valid UTF-8: {e}", node.name))
        })?,
        (None, None) => {
            return Err(Error::InvalidDocument(format!(
                "'{}' has no rendered SVG markup",
                node.name
            )));
        }
    };

    Ok(SvgDocument {
        id: node.id.clone(),
        name: node.name.clone(),
        svg_text,
    })
}

/// Selection source backed by a JSON scene export on disk
#[derive(Debug, Clone)]
pub struct SceneFileSource {
    path: PathBuf,
}

impl SceneFileSource {
    /// Read the scene export at `path` on each extraction
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the scene export
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SelectionSource for SceneFileSource {
    async fn extract_selection(&self) -> Result<Vec<SvgDocument>> {
        debug!(path = %self.path.display(), "reading scene export");
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let export: SceneExport = serde_json::from_str(&raw)
            .map_err(|e| Error::Parse(format!("{}: {e}", self.path.display())))?;
        let documents = export.to_documents()?;
        debug!(count = documents.len(), "extracted SVG documents");
        Ok(documents)
    }
}

/// Selection source over documents that are already extracted
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: Vec<SvgDocument>,
}

impl StaticSource {
    /// Serve `documents` on every extraction
    pub const fn new(documents: Vec<SvgDocument>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl SelectionSource for StaticSource {
    async fn extract_selection(&self) -> Result<Vec<SvgDocument>> {
        Ok(self.documents.clone())
    }
}
