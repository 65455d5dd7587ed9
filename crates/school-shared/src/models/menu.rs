use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl MenuItem {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Top-level entry of the rendered navigation bar.
///
/// `submenu` is `None` for a root without children, so a renderer can tell a
/// plain link from a dropdown toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub title: String,
    pub url: Option<String>,
    pub slug: String,
    pub submenu: Option<Vec<SubmenuEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmenuEntry {
    pub title: String,
    pub url: Option<String>,
    pub slug: String,
}

/// A root item together with its direct children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuNode {
    #[serde(flatten)]
    pub item: MenuItem,
    pub children: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePath {
    pub active_slug: String,
    pub active_parent_slug: Option<String>,
}
