//! Shared icon cache with reload-driven invalidation.
//!
//! One cache per menu type, shared by every open session: rendered elements
//! are viewer-independent, so the first population pass to encounter a
//! category pays the construction cost and later passes (any viewer) reuse the
//! element. The action half of a cached item is stale by definition and the
//! consumer must rebind it before placement.
//!
//! There is no TTL and no size bound — the category count is bounded by
//! configuration, and the only invalidation path is [`IconCache::clear`] on
//! menu reload.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::category::Category;
use crate::element::MenuItem;

/// Category id → cached menu item. Keys are the case-insensitive identity of
/// the category, so at most one entry exists per category at any time.
pub struct IconCache {
    entries: Mutex<HashMap<String, MenuItem>>,
    enabled: AtomicBool,
}

impl IconCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            enabled: AtomicBool::new(true),
        }
    }

    /// Toggle caching. While disabled, `get` always reports absent and `put`
    /// is a no-op, forcing fresh construction on every pass. Existing entries
    /// are kept and become visible again when re-enabled.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn get(&self, category: &Category) -> Option<MenuItem> {
        if !self.is_enabled() {
            return None;
        }
        self.entries.lock().get(&category.key()).cloned()
    }

    pub fn put(&self, category: &Category, item: MenuItem) {
        if !self.is_enabled() {
            return;
        }
        self.entries.lock().insert(category.key(), item);
    }

    /// Drop every entry. Called when the menu configuration is reloaded.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IconCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{DisplayElement, MenuAction};
    use pretty_assertions::assert_eq;

    fn item(name: &str) -> MenuItem {
        MenuItem::new(DisplayElement::new("name_tag", name), MenuAction::OpenAllTags)
    }

    #[test]
    fn test_put_then_get_returns_item() {
        let cache = IconCache::new();
        let cat = Category::new("animals", "Animals");

        cache.put(&cat, item("Animals"));
        assert_eq!(cache.get(&cat), Some(item("Animals")));
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = IconCache::new();
        let cat = Category::new("animals", "Animals");

        cache.put(&cat, item("Animals"));
        cache.clear();
        assert_eq!(cache.get(&cat), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_identity_is_case_insensitive() {
        let cache = IconCache::new();
        cache.put(&Category::new("VIP", "VIP"), item("first"));
        cache.put(&Category::new("vip", "vip"), item("second"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&Category::new("Vip", "Vip")), Some(item("second")));
    }

    #[test]
    fn test_disabled_cache_reports_absent() {
        let cache = IconCache::new();
        let cat = Category::new("animals", "Animals");

        cache.set_enabled(false);
        cache.put(&cat, item("Animals"));
        assert_eq!(cache.get(&cat), None);
        assert!(cache.is_empty(), "put must be a no-op while disabled");
    }

    #[test]
    fn test_reenabling_restores_existing_entries() {
        let cache = IconCache::new();
        let cat = Category::new("animals", "Animals");

        cache.put(&cat, item("Animals"));
        cache.set_enabled(false);
        assert_eq!(cache.get(&cat), None);

        cache.set_enabled(true);
        assert_eq!(cache.get(&cat), Some(item("Animals")));
    }
}
