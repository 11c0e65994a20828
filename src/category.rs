//! Category model and the configurable sort modes applied to visible lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// A named grouping of tags, owned by the host configuration subsystem.
///
/// The menu engine only reads categories; creation and destruction happen in
/// the excluded configuration layer. Identity is the `id` field, compared
/// case-insensitively (see [`Category::key`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier (config section name).
    pub id: String,
    /// Name shown on the rendered element and used for alphabetical sorting.
    pub display_name: String,
    /// Permission node gating this category, if any. `None` = ungated.
    pub permission: Option<String>,
    /// Global categories aggregate all tags and are exempt from both
    /// permission- and unlocked-filtering.
    pub global: bool,
    /// Optional parent grouping (purely informational for this engine).
    pub parent: Option<String>,
    /// Explicit position used by [`SortType::Custom`].
    pub order: i32,
}

impl Category {
    /// Create a plain (non-global, ungated) category.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            permission: None,
            global: false,
            parent: None,
            order: 0,
        }
    }

    /// Create a global category.
    pub fn global(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            global: true,
            ..Self::new(id, display_name)
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Case-insensitive identity key, used by the icon cache.
    pub fn key(&self) -> String {
        self.id.to_lowercase()
    }
}

/// Ordering applied to the visible category list.
///
/// Every mode is a deterministic total order: ties are broken by id so two
/// passes over the same input always produce the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortType {
    /// By display name (case-insensitive), ties by id.
    #[default]
    Alphabetical,
    /// By the configured `order` field, ties by id.
    Custom,
    /// Backing-store insertion order, untouched.
    None,
}

impl SortType {
    /// Sort `categories` in place. Stable, so [`SortType::None`] preserves
    /// the input order exactly.
    pub fn sort(self, categories: &mut [Category]) {
        match self {
            SortType::Alphabetical => categories.sort_by(|a, b| {
                a.display_name
                    .to_lowercase()
                    .cmp(&b.display_name.to_lowercase())
                    .then_with(|| a.id.cmp(&b.id))
            }),
            SortType::Custom => {
                categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
            }
            SortType::None => {}
        }
    }
}

impl FromStr for SortType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alphabetical" => Ok(SortType::Alphabetical),
            "custom" => Ok(SortType::Custom),
            "none" => Ok(SortType::None),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortType::Alphabetical => "alphabetical",
            SortType::Custom => "custom",
            SortType::None => "none",
        };
        f.write_str(name)
    }
}

/// An unrecognized sort-type in the config falls back to the default instead
/// of failing the whole menu load.
impl<'de> Deserialize<'de> for SortType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "Unknown sort-type, using alphabetical");
            SortType::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_alphabetical_sorts_by_display_name() {
        let mut cats = vec![
            Category::new("zoo", "Zoo"),
            Category::new("animals", "animals"),
            Category::new("misc", "Misc"),
        ];
        SortType::Alphabetical.sort(&mut cats);
        assert_eq!(ids(&cats), vec!["animals", "misc", "zoo"]);
    }

    #[test]
    fn test_alphabetical_ties_broken_by_id() {
        let mut cats = vec![
            Category::new("b", "Same"),
            Category::new("a", "same"),
        ];
        SortType::Alphabetical.sort(&mut cats);
        assert_eq!(ids(&cats), vec!["a", "b"]);
    }

    #[test]
    fn test_custom_sorts_by_order_then_id() {
        let mut cats = vec![
            Category::new("late", "Late").with_order(5),
            Category::new("b", "B").with_order(1),
            Category::new("a", "A").with_order(1),
        ];
        SortType::Custom.sort(&mut cats);
        assert_eq!(ids(&cats), vec!["a", "b", "late"]);
    }

    #[test]
    fn test_none_preserves_insertion_order() {
        let mut cats = vec![
            Category::new("c", "C"),
            Category::new("a", "A"),
            Category::new("b", "B"),
        ];
        SortType::None.sort(&mut cats);
        assert_eq!(ids(&cats), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_type_parse() {
        assert_eq!("alphabetical".parse(), Ok(SortType::Alphabetical));
        assert_eq!("CUSTOM".parse(), Ok(SortType::Custom));
        assert_eq!("none".parse(), Ok(SortType::None));
        assert_eq!("random".parse::<SortType>(), Err(()));
    }

    #[test]
    fn test_category_key_is_lowercase() {
        assert_eq!(Category::new("VIP", "VIP Tags").key(), "vip");
    }
}
