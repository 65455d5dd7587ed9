//! Persistent storage for menu items, news articles and users.
//!
//! Handlers and services talk to the [`Store`] trait object so the same code
//! runs against PostgreSQL in production and the in-memory store in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_shared::{MenuItem, NewsArticle, User};
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub title: String,
    pub url: Option<String>,
    pub slug: String,
    pub parent_id: Option<Uuid>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewNewsArticle {
    pub title: String,
    pub image: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// A user row including the password hash, which never leaves the server.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }
}

/// Menu items. Listing methods return items in insertion order.
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>>;

    async fn list_menu_children(&self, parent_id: Uuid) -> StoreResult<Vec<MenuItem>>;

    async fn get_menu_item(&self, id: Uuid) -> StoreResult<MenuItem>;

    /// Fails with [`StoreError::Conflict`] when the slug is taken.
    async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem>;

    async fn update_menu_item(&self, item: &MenuItem) -> StoreResult<MenuItem>;

    /// Removes all given items atomically and returns how many were removed.
    async fn delete_menu_items(&self, ids: &[Uuid]) -> StoreResult<u64>;

    async fn count_menu_items(&self) -> StoreResult<i64>;
}

/// News articles. Listing methods return the newest article first.
#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn list_news(&self, limit: Option<i64>) -> StoreResult<Vec<NewsArticle>>;

    async fn get_news(&self, id: Uuid) -> StoreResult<NewsArticle>;

    async fn create_news(&self, article: NewNewsArticle) -> StoreResult<NewsArticle>;

    /// `created_at` is never changed by an update.
    async fn update_news(&self, article: &NewsArticle) -> StoreResult<NewsArticle>;

    async fn delete_news(&self, id: Uuid) -> StoreResult<()>;

    async fn count_news(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> StoreResult<Vec<UserRecord>>;

    async fn get_user(&self, id: Uuid) -> StoreResult<UserRecord>;

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>>;

    /// Fails with [`StoreError::Conflict`] when the username is taken.
    async fn create_user(&self, user: NewUser) -> StoreResult<UserRecord>;

    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;
}

pub trait Store: MenuStore + NewsStore + UserStore {}

impl<T: MenuStore + NewsStore + UserStore> Store for T {}
