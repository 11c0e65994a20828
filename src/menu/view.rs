//! The category menu: one open session per viewer, populated from the
//! filter/sort pipeline and the shared icon cache.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{TagCatalog, Viewer};
use crate::config::{ConfigError, ConfigStore};
use crate::element::{DisplayElement, ElementRenderer, MenuAction, MenuItem, Placeholders};
use crate::icon_cache::IconCache;
use crate::visibility::compute_visible;

use super::container::{ContainerFactory, ContainerKind, MenuContainer};
use super::refresh::{RefreshHandle, RefreshScheduler};
use super::registry::{MenuRegistry, TagFilter};

/// Fixed control elements and their config paths, placed on every session.
const CONTROLS: [(&str, MenuAction); 6] = [
    ("next-page", MenuAction::NextPage),
    ("previous-page", MenuAction::PreviousPage),
    ("clear-tag", MenuAction::ClearTag),
    ("favorite-tags", MenuAction::OpenFavorites),
    ("search", MenuAction::OpenSearch),
    ("main-menu", MenuAction::OpenMainMenu),
];

/// The category-browsing menu.
///
/// One instance exists per menu type and is shared by every session: all
/// fields are `Arc`s, so cloning is cheap and the icon cache is genuinely
/// process-wide. Per-session state lives in the container the widget toolkit
/// hands back from [`ContainerFactory::create`].
#[derive(Clone)]
pub struct CategoryMenu {
    config: Arc<ConfigStore>,
    catalog: Arc<dyn TagCatalog>,
    renderer: Arc<dyn ElementRenderer>,
    containers: Arc<dyn ContainerFactory>,
    menus: MenuRegistry,
    icons: Arc<IconCache>,
}

impl CategoryMenu {
    pub fn new(
        config: Arc<ConfigStore>,
        catalog: Arc<dyn TagCatalog>,
        renderer: Arc<dyn ElementRenderer>,
        containers: Arc<dyn ContainerFactory>,
        menus: MenuRegistry,
    ) -> Self {
        Self {
            config,
            catalog,
            renderer,
            containers,
            menus,
            icons: Arc::new(IconCache::new()),
        }
    }

    /// The shared icon cache for this menu type.
    pub fn icon_cache(&self) -> &Arc<IconCache> {
        &self.icons
    }

    /// Re-read the configuration and invalidate the icon cache. This is the
    /// cache's only invalidation path.
    pub fn reload(&self) -> Result<(), ConfigError> {
        self.config.reload()?;
        self.icons.clear();
        tracing::debug!("Category menu reloaded, icon cache cleared");
        Ok(())
    }

    /// Open a new session for `viewer`.
    ///
    /// With categories disabled this delegates straight to the flat tag list.
    /// Otherwise it builds the container, places controls, shows it, and runs
    /// the population step once — or repeatedly when dynamic refresh is on.
    ///
    /// Must be called within a tokio runtime: dynamic refresh and async
    /// population spawn tasks. Returns the refresh handle when a refresh
    /// session was started.
    pub fn open(&self, viewer: Arc<dyn Viewer>) -> Option<RefreshHandle> {
        if !self.catalog.categories_enabled() {
            match self.menus.tags() {
                Some(tags) => tags.open(&viewer, None),
                None => tracing::warn!("Categories disabled and no tag list menu registered"),
            }
            return None;
        }

        let config = self.config.current();
        let settings = &config.gui_settings;

        let kind = match (settings.scrolling_gui, settings.scrolling_type) {
            (true, Some(scroll)) => ContainerKind::Scrolling(scroll),
            _ => ContainerKind::Paged,
        };

        let container = match self.containers.create(kind, &settings.title, settings.rows) {
            Ok(container) => container,
            Err(e) => {
                // Nothing is visible yet, so there is nothing to degrade.
                tracing::error!(error = %e, "Failed to create category menu container");
                return None;
            }
        };

        for key in config.extra_items.keys() {
            let path = format!("extra-items.{key}");
            match self.renderer.render(&path, &Placeholders::new()) {
                Some(element) => container.add_control(MenuItem::decorative(element)),
                None => tracing::warn!(path = %path, "Invalid extra item, skipping"),
            }
        }

        for (path, action) in CONTROLS {
            match self.renderer.render(path, &Placeholders::new()) {
                Some(element) => container.add_control(MenuItem::new(element, action)),
                // Controls are opt-in per config; an absent spec just means
                // the menu doesn't have that button.
                None => tracing::debug!(path = %path, "Control not configured, skipping"),
            }
        }

        container.open(viewer.as_ref());

        if settings.dynamic_gui && settings.dynamic_speed > 0 {
            let period = Duration::from_millis(settings.dynamic_speed);
            return Some(RefreshScheduler::spawn(
                self.clone(),
                Arc::clone(&container),
                Arc::clone(&viewer),
                period,
            ));
        }

        if settings.add_pages_asynchronously {
            let menu = self.clone();
            let container = Arc::clone(&container);
            let viewer = Arc::clone(&viewer);
            tokio::spawn(async move {
                menu.populate(&container, &viewer);
                menu.refresh_title(&container);
            });
        } else {
            self.populate(&container, &viewer);
            self.refresh_title(&container);
        }

        None
    }

    /// The population step: recompute the visible category list and place an
    /// entry per category, reusing cached elements where allowed.
    ///
    /// A malformed per-category display spec degrades that one entry to a
    /// default sign; it never aborts the pass.
    pub fn populate(&self, container: &Arc<dyn MenuContainer>, viewer: &Arc<dyn Viewer>) {
        let config = self.config.current();
        let settings = &config.gui_settings;

        if container.kind().is_paged() {
            container.clear_page_content();
        }

        // Every entry's click lands in the tag list; without it the menu
        // would be a grid of dead buttons.
        if self.menus.tags().is_none() {
            tracing::warn!("Tag list menu not registered, skipping category population");
            return;
        }

        self.icons.set_enabled(settings.cache_icons);

        let visible = compute_visible(
            self.catalog.cached_categories(),
            viewer.as_ref(),
            settings,
            self.catalog.as_ref(),
        );

        for category in visible {
            let action = if category.global {
                MenuAction::OpenAllTags
            } else {
                MenuAction::OpenCategory(category.id.clone())
            };

            if let Some(mut item) = self.icons.get(&category) {
                // Reuse the element, never the binding: the cached action may
                // belong to a previous viewer's session.
                item.action = action;
                container.add_item(item);
                continue;
            }

            let mut placeholders = Placeholders::new()
                .add("category", &category.display_name)
                .add("total", self.catalog.tags_in_category(&category).len());
            if settings.only_unlocked_categories {
                placeholders = placeholders.add(
                    "unlocked",
                    self.catalog
                        .accessible_tags_in_category(&category, viewer.as_ref())
                        .len(),
                );
            }

            let path = format!("categories.{}.display-item", category.id);
            let element = match self.renderer.render(&path, &placeholders) {
                Some(element) => element,
                None => {
                    tracing::warn!(
                        category = %category.id,
                        "Invalid display item for category, using default sign"
                    );
                    DisplayElement::sign(&category.display_name)
                }
            };

            let item = MenuItem::new(element, action);
            container.add_item(item.clone());
            self.icons.put(&category, item);
        }
    }

    /// Click entry point. The viewer comes from the click event, so a cached
    /// element dispatched here always acts for the viewer who clicked.
    pub fn dispatch(
        &self,
        container: &Arc<dyn MenuContainer>,
        action: &MenuAction,
        viewer: &Arc<dyn Viewer>,
    ) {
        match action {
            MenuAction::None => {}
            MenuAction::OpenAllTags => match self.menus.tags() {
                Some(tags) => tags.open(viewer, None),
                None => tracing::warn!("Tag list menu not registered"),
            },
            MenuAction::OpenCategory(id) => {
                let Some(tags) = self.menus.tags() else {
                    tracing::warn!("Tag list menu not registered");
                    return;
                };
                let id = id.to_lowercase();
                let filter: TagFilter = Arc::new(move |tag| {
                    tag.category
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(&id))
                });
                tags.open(viewer, Some(filter));
            }
            MenuAction::NextPage => {
                container.next_page();
                self.refresh_title(container);
            }
            MenuAction::PreviousPage => {
                container.previous_page();
                self.refresh_title(container);
            }
            MenuAction::ClearTag => self.catalog.clear_active_tag(viewer.as_ref()),
            MenuAction::OpenFavorites => match self.menus.favorites() {
                Some(menu) => menu.open(viewer),
                None => tracing::warn!("Favorites menu not registered"),
            },
            MenuAction::OpenSearch => match self.menus.search() {
                Some(menu) => menu.open(viewer),
                None => tracing::warn!("Search menu not registered"),
            },
            MenuAction::OpenMainMenu => match self.menus.main() {
                Some(menu) => menu.open(viewer),
                None => tracing::warn!("Main menu not registered"),
            },
        }
    }

    /// Reformat the title with current page placeholders, when configured.
    pub fn refresh_title(&self, container: &Arc<dyn MenuContainer>) {
        let config = self.config.current();
        let settings = &config.gui_settings;
        if !settings.update_title {
            return;
        }

        let placeholders = Placeholders::new()
            .add("page", container.current_page())
            .add("pages", container.page_count());
        container.update_title(&placeholders.apply(&settings.title));
    }
}
