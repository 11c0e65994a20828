//! Container widget seam.
//!
//! Rendering, click-slot geometry and pagination internals live in the host's
//! widget toolkit; the engine drives containers exclusively through
//! [`MenuContainer`]. Mutating calls must land on the host's primary execution
//! context — implementations are responsible for marshaling if the engine
//! calls them from a background task.

use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::Viewer;
use crate::element::MenuItem;

/// Scroll axis of the scrolling container variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollType {
    Vertical,
    Horizontal,
}

impl FromStr for ScrollType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vertical" => Ok(ScrollType::Vertical),
            "horizontal" => Ok(ScrollType::Horizontal),
            _ => Err(()),
        }
    }
}

/// Which container variant a view uses. Behavior differs only in page
/// semantics, so the engine treats both as paged content holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Paged,
    Scrolling(ScrollType),
}

impl ContainerKind {
    /// Both variants hold their category entries as clearable page content;
    /// controls live outside it.
    pub fn is_paged(&self) -> bool {
        matches!(self, ContainerKind::Paged | ContainerKind::Scrolling(_))
    }
}

/// An open container instance owned by the widget toolkit.
pub trait MenuContainer: Send + Sync {
    fn kind(&self) -> ContainerKind;

    /// Add a category entry to the page content.
    fn add_item(&self, item: MenuItem);

    /// Add a fixed control/decorative entry, outside the page content.
    fn add_control(&self, item: MenuItem);

    /// Remove page content only; controls stay in place.
    fn clear_page_content(&self);

    /// Returns false when already on the last page.
    fn next_page(&self) -> bool;

    /// Returns false when already on the first page.
    fn previous_page(&self) -> bool;

    /// 1-based current page.
    fn current_page(&self) -> usize;

    fn page_count(&self) -> usize;

    fn update_title(&self, title: &str);

    /// Make the container visible to the viewer.
    fn open(&self, viewer: &dyn Viewer);

    /// Number of viewers currently looking at this container. Zero means the
    /// view is gone and any refresh session for it must terminate.
    fn observer_count(&self) -> usize;
}

/// Creates container instances for new menu sessions.
pub trait ContainerFactory: Send + Sync {
    fn create(
        &self,
        kind: ContainerKind,
        title: &str,
        rows: u8,
    ) -> anyhow::Result<Arc<dyn MenuContainer>>;
}
