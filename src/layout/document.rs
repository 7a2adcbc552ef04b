// ABOUTME: Raw layout document as written in layout files
// Loosely typed on purpose: panes may be bare command strings or full records

use serde::{Deserialize, Serialize};

/// A layout file as written on disk, before paths are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub windows: Vec<WindowDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDocument {
    #[serde(default)]
    pub name: String,
    /// Accepted for teamocil compatibility but never used: every pane
    /// carries its own root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub layout: String,
    #[serde(default)]
    pub panes: Vec<PaneEntry>,
}

/// One entry of a window's `panes` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaneEntry {
    Command(String),
    Record(PaneDocument),
}

/// Long form of a pane entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneDocument {
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub focus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}
