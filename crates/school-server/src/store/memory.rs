use async_trait::async_trait;
use chrono::Utc;
use school_shared::{MenuItem, NewsArticle};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    MenuStore, NewMenuItem, NewNewsArticle, NewUser, NewsStore, StoreError, StoreResult,
    UserRecord, UserStore,
};

/// Store kept entirely in process memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

#[derive(Default)]
struct MemoryData {
    menu_items: Vec<MenuItem>,
    news: Vec<NewsArticle>,
    users: Vec<UserRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(items: &[MenuItem], slug: &str, except: Option<Uuid>) -> bool {
    items
        .iter()
        .any(|i| i.slug == slug && Some(i.id) != except)
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn list_menu_items(&self) -> StoreResult<Vec<MenuItem>> {
        Ok(self.data.read().await.menu_items.clone())
    }

    async fn list_menu_children(&self, parent_id: Uuid) -> StoreResult<Vec<MenuItem>> {
        let data = self.data.read().await;
        Ok(data
            .menu_items
            .iter()
            .filter(|i| i.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn get_menu_item(&self, id: Uuid) -> StoreResult<MenuItem> {
        let data = self.data.read().await;
        data.menu_items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        let mut data = self.data.write().await;

        if slug_taken(&data.menu_items, &item.slug, None) {
            return Err(StoreError::Conflict(format!(
                "Slug '{}' is already in use",
                item.slug
            )));
        }

        let created = MenuItem {
            id: Uuid::new_v4(),
            title: item.title,
            url: item.url,
            slug: item.slug,
            parent_id: item.parent_id,
            content: item.content,
        };
        data.menu_items.push(created.clone());

        Ok(created)
    }

    async fn update_menu_item(&self, item: &MenuItem) -> StoreResult<MenuItem> {
        let mut data = self.data.write().await;

        if slug_taken(&data.menu_items, &item.slug, Some(item.id)) {
            return Err(StoreError::Conflict(format!(
                "Slug '{}' is already in use",
                item.slug
            )));
        }

        let existing = data
            .menu_items
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or(StoreError::NotFound)?;
        *existing = item.clone();

        Ok(item.clone())
    }

    async fn delete_menu_items(&self, ids: &[Uuid]) -> StoreResult<u64> {
        let mut data = self.data.write().await;
        let before = data.menu_items.len();
        data.menu_items.retain(|i| !ids.contains(&i.id));

        Ok((before - data.menu_items.len()) as u64)
    }

    async fn count_menu_items(&self) -> StoreResult<i64> {
        Ok(self.data.read().await.menu_items.len() as i64)
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn list_news(&self, limit: Option<i64>) -> StoreResult<Vec<NewsArticle>> {
        let data = self.data.read().await;

        // Later inserts win ties on created_at
        let mut articles: Vec<NewsArticle> = data.news.iter().rev().cloned().collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = limit {
            articles.truncate(usize::try_from(limit).unwrap_or(0));
        }

        Ok(articles)
    }

    async fn get_news(&self, id: Uuid) -> StoreResult<NewsArticle> {
        let data = self.data.read().await;
        data.news
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_news(&self, article: NewNewsArticle) -> StoreResult<NewsArticle> {
        let created = NewsArticle {
            id: Uuid::new_v4(),
            title: article.title,
            image: article.image,
            content: article.content,
            created_at: Utc::now(),
        };
        self.data.write().await.news.push(created.clone());

        Ok(created)
    }

    async fn update_news(&self, article: &NewsArticle) -> StoreResult<NewsArticle> {
        let mut data = self.data.write().await;
        let existing = data
            .news
            .iter_mut()
            .find(|a| a.id == article.id)
            .ok_or(StoreError::NotFound)?;

        existing.title = article.title.clone();
        existing.image = article.image.clone();
        existing.content = article.content.clone();

        Ok(existing.clone())
    }

    async fn delete_news(&self, id: Uuid) -> StoreResult<()> {
        let mut data = self.data.write().await;
        let before = data.news.len();
        data.news.retain(|a| a.id != id);

        if data.news.len() == before {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn count_news(&self) -> StoreResult<i64> {
        Ok(self.data.read().await.news.len() as i64)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> StoreResult<Vec<UserRecord>> {
        let mut users = self.data.read().await.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<UserRecord> {
        let data = self.data.read().await;
        data.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<UserRecord> {
        let mut data = self.data.write().await;

        if data.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        let created = UserRecord {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        data.users.push(created.clone());

        Ok(created)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut data = self.data.write().await;
        let before = data.users.len();
        data.users.retain(|u| u.id != id);

        if data.users.len() == before {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(title: &str, slug: &str, parent_id: Option<Uuid>) -> NewMenuItem {
        NewMenuItem {
            title: title.to_string(),
            url: Some("#".to_string()),
            slug: slug.to_string(),
            parent_id,
            content: None,
        }
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let store = MemoryStore::new();
        store
            .create_menu_item(new_item("About", "about", None))
            .await
            .unwrap();

        let err = store
            .create_menu_item(new_item("About us", "about", None))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.count_menu_items().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn listing_keeps_insertion_order() {
        let store = MemoryStore::new();
        for slug in ["c", "a", "b"] {
            store
                .create_menu_item(new_item(slug, slug, None))
                .await
                .unwrap();
        }

        let slugs: Vec<String> = store
            .list_menu_items()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.slug)
            .collect();
        assert_eq!(slugs, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn news_update_keeps_created_at() {
        let store = MemoryStore::new();
        let article = store
            .create_news(NewNewsArticle {
                title: "Old".to_string(),
                image: None,
                content: None,
            })
            .await
            .unwrap();

        let mut edited = article.clone();
        edited.title = "New".to_string();
        edited.created_at = Utc::now() + chrono::Duration::days(1);
        let updated = store.update_news(&edited).await.unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.created_at, article.created_at);
    }

    #[tokio::test]
    async fn news_listing_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            store
                .create_news(NewNewsArticle {
                    title: title.to_string(),
                    image: None,
                    content: None,
                })
                .await
                .unwrap();
        }

        let latest = store.list_news(Some(2)).await.unwrap();
        let titles: Vec<&str> = latest.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["third", "second"]);
    }
}
