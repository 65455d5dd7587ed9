//! Runs against a live database:
//! `DATABASE_URL=postgres://... cargo test -p school-server -- --ignored`

use school_server::{
    db,
    store::{
        MenuStore, NewMenuItem, NewNewsArticle, NewUser, NewsStore, PgStore, StoreError,
        UserStore,
    },
};
use uuid::Uuid;

async fn store() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = db::create_pool(&url).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    PgStore::new(pool)
}

/// Slug unique to one test run, so tests can share a database.
fn unique_slug(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

fn new_item(slug: &str, parent_id: Option<Uuid>) -> NewMenuItem {
    NewMenuItem {
        title: slug.to_string(),
        url: Some("#".to_string()),
        slug: slug.to_string(),
        parent_id,
        content: None,
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_slug_maps_to_conflict() {
    let store = store().await;
    let slug = unique_slug("dup");

    store.create_menu_item(new_item(&slug, None)).await.unwrap();
    let err = store.create_menu_item(new_item(&slug, None)).await.unwrap_err();

    assert!(matches!(err, StoreError::Conflict(_)), "{err:?}");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn renaming_onto_a_taken_slug_conflicts() {
    let store = store().await;
    let taken = store
        .create_menu_item(new_item(&unique_slug("taken"), None))
        .await
        .unwrap();
    let mut other = store
        .create_menu_item(new_item(&unique_slug("other"), None))
        .await
        .unwrap();

    other.slug = taken.slug.clone();
    let err = store.update_menu_item(&other).await.unwrap_err();

    assert!(matches!(err, StoreError::Conflict(_)), "{err:?}");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn delete_removes_every_listed_id() {
    let store = store().await;
    let root = store
        .create_menu_item(new_item(&unique_slug("root"), None))
        .await
        .unwrap();
    let child = store
        .create_menu_item(new_item(&unique_slug("child"), Some(root.id)))
        .await
        .unwrap();
    let sibling_root = store
        .create_menu_item(new_item(&unique_slug("keep"), None))
        .await
        .unwrap();

    let children = store.list_menu_children(root.id).await.unwrap();
    assert_eq!(children, vec![child.clone()]);

    let removed = store.delete_menu_items(&[root.id, child.id]).await.unwrap();
    assert_eq!(removed, 2);

    assert!(matches!(
        store.get_menu_item(child.id).await,
        Err(StoreError::NotFound)
    ));
    assert_eq!(store.get_menu_item(sibling_root.id).await.unwrap(), sibling_root);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn menu_listing_keeps_insertion_order() {
    let store = store().await;
    let first = store
        .create_menu_item(new_item(&unique_slug("first"), None))
        .await
        .unwrap();
    let second = store
        .create_menu_item(new_item(&unique_slug("second"), None))
        .await
        .unwrap();

    let items = store.list_menu_items().await.unwrap();
    let pos = |id: Uuid| items.iter().position(|i| i.id == id).unwrap();

    assert!(pos(first.id) < pos(second.id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn news_listing_with_and_without_limit() {
    let store = store().await;
    let article = store
        .create_news(NewNewsArticle {
            title: unique_slug("news"),
            image: None,
            content: Some("body".to_string()),
        })
        .await
        .unwrap();

    let all = store.list_news(None).await.unwrap();
    assert!(all.iter().any(|a| a.id == article.id));
    assert_eq!(all.len() as i64, store.count_news().await.unwrap());

    let limited = store.list_news(Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);

    // Read back: the database truncates timestamps to microseconds
    let stored = store.get_news(article.id).await.unwrap();
    let mut edited = stored.clone();
    edited.title = "Edited".to_string();
    edited.created_at = chrono::Utc::now() + chrono::Duration::days(1);
    let updated = store.update_news(&edited).await.unwrap();
    assert_eq!(updated.title, "Edited");
    assert_eq!(updated.created_at, stored.created_at);

    store.delete_news(article.id).await.unwrap();
    assert!(matches!(
        store.delete_news(article.id).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_username_maps_to_conflict() {
    let store = store().await;
    let username = unique_slug("user");
    let new_user = || NewUser {
        username: username.clone(),
        password_hash: "hash".to_string(),
        is_admin: false,
    };

    let user = store.create_user(new_user()).await.unwrap();
    let err = store.create_user(new_user()).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)), "{err:?}");

    store.delete_user(user.id).await.unwrap();
    assert!(store
        .find_user_by_username(&username)
        .await
        .unwrap()
        .is_none());
}
