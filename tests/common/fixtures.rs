//! Test data factories for icon-sync types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use icon_sync::types::SvgDocument;
use serde_json::{json, Value};

/// SVG markup that identifies its icon and revision
pub fn svg_markup(name: &str, revision: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" data-icon="{name}" data-rev="{revision}"><path d="M0 0h24v24H0z"/></svg>"#
    )
}

/// Create an extracted document at revision 1
pub fn make_doc(name: &str) -> SvgDocument {
    make_doc_rev(name, 1)
}

/// Create an extracted document with specific markup revision
pub fn make_doc_rev(name: &str, revision: u32) -> SvgDocument {
    SvgDocument {
        id: format!("1:{name}"),
        name: name.to_string(),
        svg_text: svg_markup(name, revision),
    }
}

/// Create documents for several names at revision 1
pub fn make_docs(names: &[&str]) -> Vec<SvgDocument> {
    names.iter().map(|n| make_doc(n)).collect()
}

/// Scene node for a vector icon inside a container
pub fn icon_node(name: &str) -> Value {
    json!({
        "id": format!("2:{name}"),
        "name": name,
        "type": "COMPONENT",
        "svg": svg_markup(name, 1),
        "children": [{ "id": format!("3:{name}"), "name": "Vector", "type": "VECTOR" }]
    })
}

/// Scene export with one frame holding `icons`
pub fn scene_with_icons(icons: &[&str]) -> Value {
    json!({
        "selection": [{
            "id": "1:1",
            "name": "Icons",
            "type": "FRAME",
            "children": icons.iter().map(|n| icon_node(n)).collect::<Vec<_>>()
        }]
    })
}
