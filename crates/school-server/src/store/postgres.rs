use async_trait::async_trait;
use chrono::{DateTime, Utc};
use school_shared::{MenuItem, NewsArticle};
use uuid::Uuid;

use super::{
    MenuStore, NewMenuItem, NewNewsArticle, NewUser, NewsStore, StoreError, StoreResult,
    UserRecord, UserStore,
};
use crate::db::DbPool;

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-constraint violation to a conflict carrying `message`.
fn conflict_on_unique(err: sqlx::Error, message: impl Into<String>) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(message.into())
        }
        _ => StoreError::Database(err),
    }
}

type MenuItemRow = (
    Uuid,           // id
    String,         // title
    Option<String>, // url
    String,         // slug
    Option<Uuid>,   // parent_id
    Option<String>, // content
);

fn row_to_menu_item(row: MenuItemRow) -> MenuItem {
    MenuItem {
        id: row.0,
        title: row.1,
        url: row.2,
        slug: row.3,
        parent_id: row.4,
        content: row.5,
    }
}

type NewsRow = (
    Uuid,           // id
    String,         // title
    Option<String>, // image
    Option<String>, // content
    DateTime<Utc>,  // created_at
);

fn row_to_news(row: NewsRow) -> NewsArticle {
    NewsArticle {
        id: row.0,
        title: row.1,
        image: row.2,
        content: row.3,
        created_at: row.4,
    }
}

type UserRow = (Uuid, String, String, bool, DateTime<Utc>);

fn row_to_user(row: UserRow) -> UserRecord {
    UserRecord {
        id: row.0,
        username: row.1,
        password_hash: row.2,
        is_admin: row.3,
        created_at: row.4,
    }
}

#[async_trait]
impl MenuStore for PgStore {
    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, title, url, slug, parent_id, content
            FROM menu_items
            ORDER BY position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_menu_item).collect())
    }

    async fn list_menu_children(&self, parent_id: Uuid) -> StoreResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, title, url, slug, parent_id, content
            FROM menu_items
            WHERE parent_id = $1
            ORDER BY position
            "#,
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_menu_item).collect())
    }

    async fn get_menu_item(&self, id: Uuid) -> StoreResult<MenuItem> {
        let row: MenuItemRow = sqlx::query_as(
            "SELECT id, title, url, slug, parent_id, content FROM menu_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row_to_menu_item(row))
    }

    async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        let id = Uuid::new_v4();

        let row: MenuItemRow = sqlx::query_as(
            r#"
            INSERT INTO menu_items (id, title, url, slug, parent_id, content)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, url, slug, parent_id, content
            "#,
        )
        .bind(id)
        .bind(&item.title)
        .bind(&item.url)
        .bind(&item.slug)
        .bind(item.parent_id)
        .bind(&item.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, format!("Slug '{}' is already in use", item.slug)))?;

        Ok(row_to_menu_item(row))
    }

    async fn update_menu_item(&self, item: &MenuItem) -> StoreResult<MenuItem> {
        let row: MenuItemRow = sqlx::query_as(
            r#"
            UPDATE menu_items
            SET title = $1,
                url = $2,
                slug = $3,
                parent_id = $4,
                content = $5
            WHERE id = $6
            RETURNING id, title, url, slug, parent_id, content
            "#,
        )
        .bind(&item.title)
        .bind(&item.url)
        .bind(&item.slug)
        .bind(item.parent_id)
        .bind(&item.content)
        .bind(item.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, format!("Slug '{}' is already in use", item.slug)))?
        .ok_or(StoreError::NotFound)?;

        Ok(row_to_menu_item(row))
    }

    async fn delete_menu_items(&self, ids: &[Uuid]) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_menu_items(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl NewsStore for PgStore {
    async fn list_news(&self, limit: Option<i64>) -> StoreResult<Vec<NewsArticle>> {
        let rows: Vec<NewsRow> = sqlx::query_as(
            r#"
            SELECT id, title, image, content, created_at
            FROM news
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_news).collect())
    }

    async fn get_news(&self, id: Uuid) -> StoreResult<NewsArticle> {
        let row: NewsRow = sqlx::query_as(
            "SELECT id, title, image, content, created_at FROM news WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row_to_news(row))
    }

    async fn create_news(&self, article: NewNewsArticle) -> StoreResult<NewsArticle> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO news (id, title, image, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&article.title)
        .bind(&article.image)
        .bind(&article.content)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(NewsArticle {
            id,
            title: article.title,
            image: article.image,
            content: article.content,
            created_at: now,
        })
    }

    async fn update_news(&self, article: &NewsArticle) -> StoreResult<NewsArticle> {
        let row: NewsRow = sqlx::query_as(
            r#"
            UPDATE news
            SET title = $1,
                image = $2,
                content = $3
            WHERE id = $4
            RETURNING id, title, image, content, created_at
            "#,
        )
        .bind(&article.title)
        .bind(&article.image)
        .bind(&article.content)
        .bind(article.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row_to_news(row))
    }

    async fn delete_news(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn count_news(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn list_users(&self) -> StoreResult<Vec<UserRecord>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, is_admin, created_at FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<UserRecord> {
        let row: UserRow = sqlx::query_as(
            "SELECT id, username, password_hash, is_admin, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row_to_user(row))
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, is_admin, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_user))
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<UserRecord> {
        let id = Uuid::new_v4();

        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, password_hash, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, is_admin, created_at
            "#,
        )
        .bind(id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(e, format!("Username '{}' is already taken", user.username))
        })?;

        Ok(row_to_user(row))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
