//! Config command - show where settings come from

use crate::cli::style::Stylize;
use anstream::{print, println};
use icon_sync::config::load_file_config;
use icon_sync::error::{Error, Result};
use std::path::Path;

/// Print the config file location
pub fn run_config_path(path: Option<&Path>) {
    match path {
        Some(path) if path.exists() => println!("{}", path.display()),
        Some(path) => println!("{} {}", path.display(), "(not found)".muted()),
        None => println!("{}", "No config directory available".muted()),
    }
}

/// Print the parsed config file
pub fn run_config_show(path: Option<&Path>) -> Result<()> {
    let config = load_file_config(path)?;
    let rendered = toml::to_string(&config)
        .map_err(|e| Error::Internal(format!("cannot render config: {e}")))?;
    if rendered.trim().is_empty() {
        println!("{}", "# no settings (defaults apply)".muted());
    } else {
        print!("{rendered}");
    }
    Ok(())
}
