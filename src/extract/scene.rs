//! Scene graph model and vector-content detection

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Kind of a design-tool node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Frame
    Frame,
    /// Group
    Group,
    /// Component definition
    Component,
    /// Set of component variants
    ComponentSet,
    /// Component instance
    Instance,
    /// Canvas section
    Section,
    /// Vector path, the only exportable vector shape
    Vector,
    /// Boolean operation over shapes
    BooleanOperation,
    /// Rectangle
    Rectangle,
    /// Ellipse
    Ellipse,
    /// Polygon
    Polygon,
    /// Star
    Star,
    /// Line
    Line,
    /// Text
    Text,
    /// Any node kind not listed above
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Whether a selected node of this kind can act as an icon container
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Frame
                | Self::Group
                | Self::Component
                | Self::ComponentSet
                | Self::Instance
                | Self::Section
        )
    }
}

/// A node of the design tool's scene graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    /// Stable node identifier
    pub id: String,
    /// Layer name
    pub name: String,
    /// Node kind
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// SVG markup rendered by the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    /// Rendered SVG as raw bytes, when the host sends bytes instead of text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_bytes: Option<Vec<u8>>,
    /// Child nodes in sibling order
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Whether any strict descendant of this node is a vector shape
    pub fn contains_vector(&self) -> bool {
        let mut stack: Vec<&Self> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            if node.kind == NodeKind::Vector {
                return true;
            }
            stack.extend(node.children.iter());
        }
        false
    }
}

/// Immediate children of the selected containers that contain vector content
///
/// Order follows the selection, then sibling order within each container.
pub fn exportable_children(selection: &[SceneNode]) -> Result<Vec<&SceneNode>> {
    if selection.is_empty() {
        return Err(Error::EmptySelection);
    }

    if let Some(node) = selection.iter().find(|n| !n.kind.is_container()) {
        return Err(Error::NotAContainer(node.name.clone()));
    }

    let children: Vec<&SceneNode> = selection
        .iter()
        .flat_map(|container| container.children.iter())
        .filter(|child| child.contains_vector())
        .collect();

    if children.is_empty() {
        return Err(Error::NoVectorContent);
    }

    Ok(children)
}
