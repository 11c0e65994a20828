//! Companion menu lookup.
//!
//! The category menu hands viewers off to sibling menus (the flat tag list,
//! favorites, search, the main menu). Those are registered by the host at
//! startup; a missing registration degrades to a logged skip, never an error
//! shown to the viewer.

use std::sync::Arc;

use crate::catalog::{Tag, Viewer};

/// Predicate selecting which tags a filtered tag-list view shows.
pub type TagFilter = Arc<dyn Fn(&Tag) -> bool + Send + Sync>;

/// The flat tag list menu. `None` filter = the full list.
pub trait TagListMenu: Send + Sync {
    fn open(&self, viewer: &Arc<dyn Viewer>, filter: Option<TagFilter>);
}

/// A sibling menu that just needs a viewer to open.
pub trait CompanionMenu: Send + Sync {
    fn open(&self, viewer: &Arc<dyn Viewer>);
}

/// Registered companion menus. Cheap to clone; all slots optional.
#[derive(Clone, Default)]
pub struct MenuRegistry {
    tags: Option<Arc<dyn TagListMenu>>,
    favorites: Option<Arc<dyn CompanionMenu>>,
    search: Option<Arc<dyn CompanionMenu>>,
    main: Option<Arc<dyn CompanionMenu>>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, menu: Arc<dyn TagListMenu>) -> Self {
        self.tags = Some(menu);
        self
    }

    pub fn with_favorites(mut self, menu: Arc<dyn CompanionMenu>) -> Self {
        self.favorites = Some(menu);
        self
    }

    pub fn with_search(mut self, menu: Arc<dyn CompanionMenu>) -> Self {
        self.search = Some(menu);
        self
    }

    pub fn with_main(mut self, menu: Arc<dyn CompanionMenu>) -> Self {
        self.main = Some(menu);
        self
    }

    pub fn tags(&self) -> Option<&Arc<dyn TagListMenu>> {
        self.tags.as_ref()
    }

    pub fn favorites(&self) -> Option<&Arc<dyn CompanionMenu>> {
        self.favorites.as_ref()
    }

    pub fn search(&self) -> Option<&Arc<dyn CompanionMenu>> {
        self.search.as_ref()
    }

    pub fn main(&self) -> Option<&Arc<dyn CompanionMenu>> {
        self.main.as_ref()
    }
}
