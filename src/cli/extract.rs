//! Extract command - list the icons a scene export would publish

use crate::cli::style::{cross, Stylize};
use anstream::{eprintln, println};
use icon_sync::config::normalize_folder;
use icon_sync::error::Result;
use icon_sync::extract::{duplicate_names, validate_documents, SceneFileSource, SelectionSource};
use icon_sync::publish::blob_path;
use std::path::Path;

/// Run the extract command
pub async fn run_extract(scene: &Path, folder: Option<&str>) -> Result<()> {
    let documents = SceneFileSource::new(scene).extract_selection().await?;
    validate_documents(&documents)?;
    let folder = folder.map(normalize_folder).transpose()?;

    println!(
        "{} icon{}:",
        documents.len().accent(),
        if documents.len() == 1 { "" } else { "s" }
    );
    for doc in &documents {
        let size = format!("({} bytes)", doc.svg_text.len());
        match &folder {
            Some(folder) => println!(
                "  {} {}",
                blob_path(folder, &doc.name).accent(),
                size.muted()
            ),
            None => println!("  {}.svg {}", doc.name.accent(), size.muted()),
        }
    }

    for name in duplicate_names(&documents) {
        eprintln!(
            "{} '{}' appears more than once; only the last is published",
            cross(),
            name.warn()
        );
    }

    Ok(())
}
