use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{MenuEntry, MenuItem, NewsArticle};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMenuItemRequest {
    pub title: String,
    /// Generated from the title when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The slug is always regenerated from `title`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MenuPageResponse {
    pub item: MenuItem,
    pub active_slug: String,
    pub active_parent_slug: Option<String>,
    pub menu: Vec<MenuEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub menu: Vec<MenuEntry>,
    pub latest_news: Vec<NewsArticle>,
}
