//! Node extraction
//!
//! Walks the selected containers of a design file and turns every child that
//! holds vector content into an [`SvgDocument`].

mod scene;
mod source;

pub use scene::{exportable_children, NodeKind, SceneNode};
pub use source::{SceneExport, SceneFileSource, SelectionSource, StaticSource};

use crate::error::{Error, Result};
use crate::types::SvgDocument;
use std::collections::HashSet;

/// Check that every document can become a flat `<folder>/<name>.svg` path
pub fn validate_documents(documents: &[SvgDocument]) -> Result<()> {
    for doc in documents {
        if doc.name.trim().is_empty() {
            return Err(Error::InvalidDocument(format!(
                "node {} has an empty name",
                doc.id
            )));
        }
        if doc.name.contains('/') || doc.name.contains('\\') {
            return Err(Error::InvalidDocument(format!(
                "'{}' contains a path separator",
                doc.name
            )));
        }
    }
    Ok(())
}

/// Names used by more than one document, in first-seen order
pub fn duplicate_names(documents: &[SvgDocument]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for doc in documents {
        if !seen.insert(doc.name.as_str()) && reported.insert(doc.name.as_str()) {
            duplicates.push(doc.name.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, name: &str) -> SvgDocument {
        SvgDocument {
            id: id.to_string(),
            name: name.to_string(),
            svg_text: "<svg/>".to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_empty_and_nested_names() {
        assert!(validate_documents(&[doc("1", "add")]).is_ok());
        assert!(matches!(
            validate_documents(&[doc("1", "  ")]),
            Err(Error::InvalidDocument(_))
        ));
        assert!(matches!(
            validate_documents(&[doc("1", "arrows/left")]),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_duplicate_names_reported_once() {
        let docs = vec![doc("1", "a"), doc("2", "b"), doc("3", "a"), doc("4", "a")];
        assert_eq!(duplicate_names(&docs), vec!["a"]);
        assert!(duplicate_names(&docs[..2]).is_empty());
    }
}
