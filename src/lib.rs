//! Category-browsing menu engine for tag customization plugins.
//!
//! Presents a paginated, permission-aware list of tag categories, each entry
//! opening a filtered tag-list view. The engine owns three things:
//!
//! - the category filter/sort pipeline ([`visibility::compute_visible`]),
//! - a shared icon cache invalidated on configuration reload
//!   ([`IconCache`]),
//! - the per-view dynamic refresh loop that keeps an open menu consistent
//!   with live permission/unlock state and self-terminates when the view
//!   loses its last observer ([`menu::RefreshScheduler`]).
//!
//! Everything else — widget rendering, permission evaluation, tag storage,
//! companion menus — belongs to the host plugin and is consumed through the
//! traits in [`catalog`], [`element`] and [`menu`].

pub mod catalog;
pub mod category;
pub mod config;
pub mod element;
pub mod icon_cache;
pub mod menu;
pub mod visibility;

pub use catalog::{Tag, TagCatalog, Viewer};
pub use category::{Category, SortType};
pub use config::{ConfigError, ConfigStore, GuiSettings, MenuConfig};
pub use element::{DisplayElement, ElementRenderer, MenuAction, MenuItem, Placeholders};
pub use icon_cache::IconCache;
pub use menu::{
    CategoryMenu, CompanionMenu, ContainerFactory, ContainerKind, MenuContainer, MenuRegistry,
    RefreshHandle, RefreshScheduler, RefreshState, ScrollType, TagFilter, TagListMenu,
};
