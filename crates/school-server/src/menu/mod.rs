mod service;
mod slug;
mod tree;

pub use service::{page_url, MenuService, PLACEHOLDER_URL};
pub use slug::{generate_slug, is_valid_slug, SLUG_SEPARATOR};
pub use tree::{
    build_menu_structure, build_menu_tree, resolve_active_slugs, validate_hierarchy,
    HierarchyViolation,
};
