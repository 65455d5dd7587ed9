use school_shared::api::{CreateMenuItemRequest, MenuPageResponse, UpdateMenuItemRequest};
use school_shared::{MenuEntry, MenuItem, MenuNode};
use uuid::Uuid;

use super::slug::{generate_slug, is_valid_slug};
use super::tree::{build_menu_structure, build_menu_tree, resolve_active_slugs, validate_hierarchy};
use crate::error::AppError;
use crate::store::{MenuStore, NewMenuItem};

/// Url given to items created without one.
pub const PLACEHOLDER_URL: &str = "#";

/// Public path of a menu page.
pub fn page_url(slug: &str) -> String {
    format!("/page/{slug}")
}

/// Menu operations on top of a [`MenuStore`].
pub struct MenuService<'a, S: MenuStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: MenuStore + ?Sized> MenuService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn menu_structure(&self) -> Result<Vec<MenuEntry>, AppError> {
        let items = self.store.list_menu_items().await?;
        Ok(build_menu_structure(&items))
    }

    pub async fn menu_tree(&self) -> Result<Vec<MenuNode>, AppError> {
        let items = self.store.list_menu_items().await?;
        Ok(build_menu_tree(&items))
    }

    pub async fn get(&self, id: Uuid) -> Result<MenuItem, AppError> {
        Ok(self.store.get_menu_item(id).await?)
    }

    /// Page payload for `slug`, built from a single snapshot of the menu.
    pub async fn page(&self, slug: &str) -> Result<MenuPageResponse, AppError> {
        let items = self.store.list_menu_items().await?;

        let item = items
            .iter()
            .find(|i| i.slug == slug)
            .cloned()
            .ok_or(AppError::NotFound)?;

        let active = resolve_active_slugs(&items, slug);

        Ok(MenuPageResponse {
            item,
            active_slug: active.active_slug,
            active_parent_slug: active.active_parent_slug,
            menu: build_menu_structure(&items),
        })
    }

    pub async fn create(&self, req: CreateMenuItemRequest) -> Result<MenuItem, AppError> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Menu item title is required".to_string()));
        }

        let slug = match req.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(slug) if is_valid_slug(slug) => slug.to_string(),
            Some(_) => {
                return Err(AppError::Validation(
                    "Slug may only contain a-z, 0-9, '-' and '_'".to_string(),
                ))
            }
            None => derive_slug(title)?,
        };

        let items = self.store.list_menu_items().await?;
        validate_hierarchy(&items, req.parent_id)?;
        ensure_slug_free(&items, &slug, None)?;

        let url = req
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_URL.to_string());

        let item = self
            .store
            .create_menu_item(NewMenuItem {
                title: title.to_string(),
                url: Some(url),
                slug,
                parent_id: req.parent_id,
                content: req.content,
            })
            .await?;

        tracing::info!(id = %item.id, slug = %item.slug, "Menu item created");
        Ok(item)
    }

    /// Renames an item. The slug is regenerated from the new title, so the
    /// page moves to a new url and the old slug stops resolving.
    pub async fn update(&self, id: Uuid, req: UpdateMenuItemRequest) -> Result<MenuItem, AppError> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Menu item title is required".to_string()));
        }

        let existing = self.store.get_menu_item(id).await?;
        let slug = derive_slug(title)?;

        let items = self.store.list_menu_items().await?;
        ensure_slug_free(&items, &slug, Some(id))?;

        let updated = MenuItem {
            title: title.to_string(),
            url: Some(page_url(&slug)),
            slug,
            content: req.content,
            ..existing
        };
        let item = self.store.update_menu_item(&updated).await?;

        if item.slug != existing.slug {
            tracing::info!(id = %id, old_slug = %existing.slug, new_slug = %item.slug, "Menu item slug changed");
        }
        Ok(item)
    }

    /// Deletes an item; a root takes its direct children with it.
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let item = self.store.get_menu_item(id).await?;

        let mut ids = vec![item.id];
        if item.is_root() {
            let children = self.store.list_menu_children(item.id).await?;
            ids.extend(children.iter().map(|c| c.id));
        }

        let removed = self.store.delete_menu_items(&ids).await?;
        tracing::info!(id = %id, slug = %item.slug, removed, "Menu item deleted");
        Ok(removed)
    }
}

fn derive_slug(title: &str) -> Result<String, AppError> {
    let slug = generate_slug(title);
    if slug.is_empty() {
        return Err(AppError::Validation(
            "Title must contain at least one letter or digit".to_string(),
        ));
    }
    Ok(slug)
}

fn ensure_slug_free(items: &[MenuItem], slug: &str, except: Option<Uuid>) -> Result<(), AppError> {
    if items.iter().any(|i| i.slug == slug && Some(i.id) != except) {
        return Err(AppError::Conflict(format!("Slug '{slug}' is already in use")));
    }
    Ok(())
}
