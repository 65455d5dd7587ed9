//! Read models derived from a snapshot of all menu items.
//!
//! Every function here is pure and linear in the number of items. Items whose
//! parent is missing or is itself a child are never rendered.

use std::collections::{HashMap, HashSet};

use school_shared::{ActivePath, MenuEntry, MenuItem, MenuNode, SubmenuEntry};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyViolation {
    #[error("Parent menu item not found")]
    ParentNotFound,

    #[error("Parent menu item is itself a submenu entry; only one level of nesting is allowed")]
    ParentNotRoot,
}

/// Direct children of every root, keyed by root id, in snapshot order.
fn children_by_root(items: &[MenuItem]) -> HashMap<Uuid, Vec<&MenuItem>> {
    let roots: HashSet<Uuid> = items
        .iter()
        .filter(|i| i.is_root())
        .map(|i| i.id)
        .collect();

    let mut children: HashMap<Uuid, Vec<&MenuItem>> = HashMap::new();
    for item in items {
        if let Some(parent_id) = item.parent_id {
            if roots.contains(&parent_id) {
                children.entry(parent_id).or_default().push(item);
            }
        }
    }
    children
}

/// Navigation bar: every root with its direct children.
pub fn build_menu_structure(items: &[MenuItem]) -> Vec<MenuEntry> {
    let children = children_by_root(items);

    items
        .iter()
        .filter(|i| i.is_root())
        .map(|root| MenuEntry {
            title: root.title.clone(),
            url: root.url.clone(),
            slug: root.slug.clone(),
            submenu: children.get(&root.id).map(|subs| {
                subs.iter()
                    .map(|sub| SubmenuEntry {
                        title: sub.title.clone(),
                        url: sub.url.clone(),
                        slug: sub.slug.clone(),
                    })
                    .collect()
            }),
        })
        .collect()
}

/// Roots with their full child items, for the admin listing.
pub fn build_menu_tree(items: &[MenuItem]) -> Vec<MenuNode> {
    let mut children = children_by_root(items);

    items
        .iter()
        .filter(|i| i.is_root())
        .map(|root| MenuNode {
            item: root.clone(),
            children: children
                .remove(&root.id)
                .unwrap_or_default()
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect()
}

/// Which navigation entries to highlight for `requested_slug`.
///
/// `active_parent_slug` is the slug of the root whose direct children contain
/// the requested item; `None` for roots and unknown slugs.
pub fn resolve_active_slugs(items: &[MenuItem], requested_slug: &str) -> ActivePath {
    let active_parent_slug = items
        .iter()
        .find(|i| i.slug == requested_slug)
        .and_then(|item| item.parent_id)
        .and_then(|parent_id| items.iter().find(|i| i.id == parent_id && i.is_root()))
        .map(|root| root.slug.clone());

    ActivePath {
        active_slug: requested_slug.to_string(),
        active_parent_slug,
    }
}

/// Checks that attaching an item under `parent_id` keeps the tree two levels deep.
pub fn validate_hierarchy(
    items: &[MenuItem],
    parent_id: Option<Uuid>,
) -> Result<(), HierarchyViolation> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };

    let parent = items
        .iter()
        .find(|i| i.id == parent_id)
        .ok_or(HierarchyViolation::ParentNotFound)?;

    if !parent.is_root() {
        return Err(HierarchyViolation::ParentNotRoot);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slug: &str, parent: Option<&MenuItem>) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            title: slug.to_uppercase(),
            url: Some(format!("/page/{slug}")),
            slug: slug.to_string(),
            parent_id: parent.map(|p| p.id),
            content: None,
        }
    }

    /// R1 with children C1a and C1b, R2 without children.
    fn sample() -> Vec<MenuItem> {
        let r1 = item("r1-slug", None);
        let c1a = item("c1a-slug", Some(&r1));
        let r2 = item("r2-slug", None);
        let c1b = item("c1b-slug", Some(&r1));
        vec![r1, c1a, r2, c1b]
    }

    #[test]
    fn test_menu_structure_groups_children_under_roots() {
        let menu = build_menu_structure(&sample());

        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].slug, "r1-slug");
        let submenu = menu[0].submenu.as_ref().unwrap();
        let slugs: Vec<&str> = submenu.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, ["c1a-slug", "c1b-slug"]);

        assert_eq!(menu[1].slug, "r2-slug");
        assert!(menu[1].submenu.is_none());
    }

    #[test]
    fn test_menu_structure_serializes_missing_submenu_as_null() {
        let menu = build_menu_structure(&sample());
        let json = serde_json::to_value(&menu).unwrap();

        assert!(json[1]["submenu"].is_null());
        assert_eq!(json[0]["submenu"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_menu_structure_skips_grandchildren() {
        let mut items = sample();
        let grandchild = item("deep", Some(&items[1]));
        items.push(grandchild);

        let menu = build_menu_structure(&items);
        let total: usize = menu
            .iter()
            .map(|e| 1 + e.submenu.as_ref().map_or(0, Vec::len))
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_menu_tree_keeps_full_items() {
        let items = sample();
        let tree = build_menu_tree(&items);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children, vec![items[1].clone(), items[3].clone()]);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_resolve_active_slugs_for_child() {
        let active = resolve_active_slugs(&sample(), "c1a-slug");
        assert_eq!(active.active_slug, "c1a-slug");
        assert_eq!(active.active_parent_slug.as_deref(), Some("r1-slug"));
    }

    #[test]
    fn test_resolve_active_slugs_for_root() {
        let active = resolve_active_slugs(&sample(), "r1-slug");
        assert_eq!(active.active_slug, "r1-slug");
        assert_eq!(active.active_parent_slug, None);
    }

    #[test]
    fn test_resolve_active_slugs_for_unknown_slug() {
        let active = resolve_active_slugs(&sample(), "missing");
        assert_eq!(active.active_slug, "missing");
        assert_eq!(active.active_parent_slug, None);
    }

    #[test]
    fn test_validate_hierarchy() {
        let items = sample();

        assert_eq!(validate_hierarchy(&items, None), Ok(()));
        assert_eq!(validate_hierarchy(&items, Some(items[0].id)), Ok(()));
        assert_eq!(
            validate_hierarchy(&items, Some(items[1].id)),
            Err(HierarchyViolation::ParentNotRoot)
        );
        assert_eq!(
            validate_hierarchy(&items, Some(Uuid::new_v4())),
            Err(HierarchyViolation::ParentNotFound)
        );
    }
}
