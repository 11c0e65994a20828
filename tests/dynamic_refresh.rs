//! Integration tests for the dynamic refresh loop, driven by tokio's paused
//! clock so interval timing is deterministic.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use tagmenu::{
    Category, CategoryMenu, ConfigStore, ContainerFactory, ContainerKind, DisplayElement,
    ElementRenderer, GuiSettings, MenuConfig, MenuContainer, MenuItem, MenuRegistry, Placeholders,
    RefreshScheduler, RefreshState, Tag, TagCatalog, TagFilter, TagListMenu, Viewer,
};

// ============================================================================
// Fakes
// ============================================================================

struct FakeViewer;

impl Viewer for FakeViewer {
    fn id(&self) -> u64 {
        1
    }

    fn name(&self) -> &str {
        "steve"
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }
}

struct FakeCatalog;

impl TagCatalog for FakeCatalog {
    fn categories_enabled(&self) -> bool {
        true
    }

    fn cached_categories(&self) -> Vec<Category> {
        vec![Category::new("animals", "Animals")]
    }

    fn tags_in_category(&self, _category: &Category) -> Vec<Tag> {
        vec![Tag::new("bear", Some("animals".to_string()))]
    }

    fn accessible_tags_in_category(&self, category: &Category, _viewer: &dyn Viewer) -> Vec<Tag> {
        self.tags_in_category(category)
    }

    fn clear_active_tag(&self, _viewer: &dyn Viewer) {}
}

struct FakeRenderer;

impl ElementRenderer for FakeRenderer {
    fn render(&self, config_path: &str, _placeholders: &Placeholders) -> Option<DisplayElement> {
        Some(DisplayElement::new("name_tag", config_path))
    }
}

struct NoopTagList;

impl TagListMenu for NoopTagList {
    fn open(&self, _viewer: &Arc<dyn Viewer>, _filter: Option<TagFilter>) {}
}

/// Container that counts population passes (one `clear_page_content` per pass)
/// and lets tests drop the observer count to simulate the view closing.
struct FakeContainer {
    observers: AtomicUsize,
    populations: AtomicUsize,
    items: Mutex<Vec<MenuItem>>,
}

impl FakeContainer {
    fn new() -> Self {
        Self {
            observers: AtomicUsize::new(0),
            populations: AtomicUsize::new(0),
            items: Mutex::new(Vec::new()),
        }
    }

    fn populations(&self) -> usize {
        self.populations.load(Ordering::SeqCst)
    }

    fn close_all(&self) {
        self.observers.store(0, Ordering::SeqCst);
    }
}

impl MenuContainer for FakeContainer {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Paged
    }

    fn add_item(&self, item: MenuItem) {
        self.items.lock().push(item);
    }

    fn add_control(&self, _item: MenuItem) {}

    fn clear_page_content(&self) {
        self.populations.fetch_add(1, Ordering::SeqCst);
        self.items.lock().clear();
    }

    fn next_page(&self) -> bool {
        false
    }

    fn previous_page(&self) -> bool {
        false
    }

    fn current_page(&self) -> usize {
        1
    }

    fn page_count(&self) -> usize {
        1
    }

    fn update_title(&self, _title: &str) {}

    fn open(&self, _viewer: &dyn Viewer) {
        self.observers.fetch_add(1, Ordering::SeqCst);
    }

    fn observer_count(&self) -> usize {
        self.observers.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct FakeFactory {
    created: Mutex<Vec<Arc<FakeContainer>>>,
}

impl FakeFactory {
    fn last(&self) -> Arc<FakeContainer> {
        self.created
            .lock()
            .last()
            .cloned()
            .expect("no container created")
    }
}

impl ContainerFactory for FakeFactory {
    fn create(
        &self,
        _kind: ContainerKind,
        _title: &str,
        _rows: u8,
    ) -> anyhow::Result<Arc<dyn MenuContainer>> {
        let container = Arc::new(FakeContainer::new());
        self.created.lock().push(Arc::clone(&container));
        Ok(container)
    }
}

fn dynamic_settings(speed_ms: u64) -> GuiSettings {
    GuiSettings {
        dynamic_gui: true,
        dynamic_speed: speed_ms,
        ..GuiSettings::default()
    }
}

fn menu_with(settings: GuiSettings) -> (CategoryMenu, Arc<FakeFactory>) {
    let config = ConfigStore::from_config(MenuConfig {
        gui_settings: settings,
        ..MenuConfig::default()
    });
    let factory = Arc::new(FakeFactory::default());
    let menu = CategoryMenu::new(
        Arc::new(config),
        Arc::new(FakeCatalog),
        Arc::new(FakeRenderer),
        Arc::clone(&factory) as Arc<dyn ContainerFactory>,
        MenuRegistry::new().with_tags(Arc::new(NoopTagList) as Arc<dyn TagListMenu>),
    );
    (menu, factory)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_first_tick_populates_immediately() {
    let (menu, factory) = menu_with(dynamic_settings(100));
    let handle = menu.open(Arc::new(FakeViewer)).expect("refresh scheduled");
    let container = factory.last();

    // Nothing has run yet: population belongs to the refresh task.
    assert_eq!(container.populations(), 0);
    assert_eq!(handle.state(), RefreshState::Scheduled);

    // The first tick fires without any clock advance.
    tokio::task::yield_now().await;
    assert_eq!(container.populations(), 1);
    assert_eq!(container.items.lock().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_repopulates_each_period() {
    let (menu, factory) = menu_with(dynamic_settings(100));
    menu.open(Arc::new(FakeViewer)).expect("refresh scheduled");
    let container = factory.last();

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(container.populations(), 1);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(container.populations(), 2);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(container.populations(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_stops_when_view_loses_observers() {
    let (menu, factory) = menu_with(dynamic_settings(100));
    let handle = menu.open(Arc::new(FakeViewer)).expect("refresh scheduled");
    let container = factory.last();

    tokio::time::sleep(Duration::from_millis(201)).await;
    assert_eq!(container.populations(), 3);
    assert_eq!(handle.state(), RefreshState::Scheduled);

    // Viewer closes the view between ticks.
    container.close_all();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(container.populations(), 3, "no population after close");
    assert_eq!(handle.state(), RefreshState::Cancelled);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_session_never_reschedules() {
    let (menu, factory) = menu_with(dynamic_settings(50));
    let handle = menu.open(Arc::new(FakeViewer)).expect("refresh scheduled");
    let container = factory.last();

    tokio::task::yield_now().await;
    container.close_all();
    tokio::time::sleep(Duration::from_millis(500)).await;

    let after_cancel = container.populations();
    assert_eq!(handle.state(), RefreshState::Cancelled);

    // A long quiet period later, still nothing.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(container.populations(), after_cancel);
}

#[tokio::test(start_paused = true)]
async fn test_zero_speed_disables_dynamic_refresh() {
    let (menu, factory) = menu_with(dynamic_settings(0));
    let handle = menu.open(Arc::new(FakeViewer));
    let container = factory.last();

    // No refresh session; the menu fell back to one-shot population.
    assert!(handle.is_none());
    assert_eq!(container.populations(), 1);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(container.populations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_static_menu_returns_no_handle() {
    let (menu, factory) = menu_with(GuiSettings::default());
    assert!(menu.open(Arc::new(FakeViewer)).is_none());
    assert_eq!(factory.last().populations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_spawn_directly_with_long_period() {
    let (menu, factory) = menu_with(dynamic_settings(100));
    // Build a container without going through open().
    let container = factory
        .create(ContainerKind::Paged, "Categories", 6)
        .unwrap();
    container.open(&FakeViewer);

    let handle = RefreshScheduler::spawn(
        menu,
        Arc::clone(&container),
        Arc::new(FakeViewer),
        Duration::from_secs(3600),
    );

    // Even with an hour-long period the initial tick is immediate.
    tokio::task::yield_now().await;
    assert_eq!(factory.last().populations(), 1);
    assert_eq!(handle.state(), RefreshState::Scheduled);
    assert!(!handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_refresh_picks_up_newly_visible_categories() {
    // Catalog whose category list can change between passes, as unlock state
    // does on a live server.
    struct GrowingCatalog {
        visible: Mutex<HashSet<&'static str>>,
    }

    impl TagCatalog for GrowingCatalog {
        fn categories_enabled(&self) -> bool {
            true
        }

        fn cached_categories(&self) -> Vec<Category> {
            self.visible
                .lock()
                .iter()
                .map(|id| Category::new(*id, *id))
                .collect()
        }

        fn tags_in_category(&self, category: &Category) -> Vec<Tag> {
            vec![Tag::new("t", Some(category.id.clone()))]
        }

        fn accessible_tags_in_category(
            &self,
            category: &Category,
            _viewer: &dyn Viewer,
        ) -> Vec<Tag> {
            self.tags_in_category(category)
        }

        fn clear_active_tag(&self, _viewer: &dyn Viewer) {}
    }

    let catalog = Arc::new(GrowingCatalog {
        visible: Mutex::new(HashSet::from(["animals"])),
    });
    let config = ConfigStore::from_config(MenuConfig {
        gui_settings: dynamic_settings(100),
        ..MenuConfig::default()
    });
    let factory = Arc::new(FakeFactory::default());
    let menu = CategoryMenu::new(
        Arc::new(config),
        Arc::clone(&catalog) as Arc<dyn TagCatalog>,
        Arc::new(FakeRenderer),
        Arc::clone(&factory) as Arc<dyn ContainerFactory>,
        MenuRegistry::new().with_tags(Arc::new(NoopTagList) as Arc<dyn TagListMenu>),
    );

    menu.open(Arc::new(FakeViewer));
    let container = factory.last();
    tokio::task::yield_now().await;
    assert_eq!(container.items.lock().len(), 1);

    catalog.visible.lock().insert("colors");
    tokio::time::sleep(Duration::from_millis(100)).await;
    tokio::task::yield_now().await;
    assert_eq!(container.items.lock().len(), 2);
}
