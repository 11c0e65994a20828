//! Collaborator seams: the viewer looking at a menu and the tag catalog the
//! menu reads from.
//!
//! Both are owned by the host plugin. The engine never evaluates permission
//! strings or stores tags itself; it asks through these traits on every
//! population pass so hot-reloaded state is always picked up.

use crate::category::Category;

/// Minimal projection of a tag: just enough to count and filter by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Owning category id, if the tag is categorized.
    pub category: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, category: Option<String>) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// A viewer currently interacting with a menu.
pub trait Viewer: Send + Sync {
    fn id(&self) -> u64;

    fn name(&self) -> &str;

    /// Whether the viewer holds the given permission node.
    fn has_permission(&self, node: &str) -> bool;
}

/// Read access to the host's category/tag state.
pub trait TagCatalog: Send + Sync {
    /// Whether the category menu feature is enabled at all. When false the
    /// menu delegates straight to the flat tag list.
    fn categories_enabled(&self) -> bool;

    /// All known categories, in backing-store insertion order.
    fn cached_categories(&self) -> Vec<Category>;

    /// Every tag under the category (global categories: every tag).
    fn tags_in_category(&self, category: &Category) -> Vec<Tag>;

    /// Tags under the category that `viewer` can currently use.
    fn accessible_tags_in_category(&self, category: &Category, viewer: &dyn Viewer) -> Vec<Tag>;

    /// Clear the viewer's active tag (backs the clear-tag control).
    fn clear_active_tag(&self, viewer: &dyn Viewer);
}
