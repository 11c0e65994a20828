//! Menu orchestration module.
//!
//! - `container` - the widget-toolkit seam (paged/scrolling containers)
//! - `registry` - companion menu lookup (tag list, favorites, search, main)
//! - `view` - the category menu itself: open + population step + dispatch
//! - `refresh` - per-view dynamic refresh scheduling

mod container;
mod refresh;
mod registry;
mod view;

pub use container::{ContainerFactory, ContainerKind, MenuContainer, ScrollType};
pub use refresh::{RefreshHandle, RefreshScheduler, RefreshState};
pub use registry::{CompanionMenu, MenuRegistry, TagFilter, TagListMenu};
pub use view::CategoryMenu;
