//! Display elements, click actions and placeholder substitution.
//!
//! A [`DisplayElement`] is the visual half of a menu entry; the behavioral
//! half is a [`MenuAction`]. Actions are plain data and never capture a
//! viewer: the viewer is resolved from the click event at dispatch time, which
//! is what makes cached elements safe to share across sessions.

use std::borrow::Cow;

/// Ordered `%key%` substitution set for rendered text.
///
/// Re-adding a key overwrites its value in place, matching the builder
/// semantics of the host's placeholder API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    entries: Vec<(String, String)>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every `%key%` occurrence in `input`. Returns borrowed input
    /// when there is nothing to substitute.
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if self.entries.is_empty() || !input.contains('%') {
            return Cow::Borrowed(input);
        }
        let mut out = input.to_string();
        for (key, value) in &self.entries {
            out = out.replace(&format!("%{key}%"), value);
        }
        Cow::Owned(out)
    }
}

/// Opaque renderable element. The widget toolkit interprets `kind`; the
/// engine only constructs and caches these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayElement {
    /// Toolkit material/kind identifier, e.g. `"oak_sign"`.
    pub kind: String,
    pub name: String,
    pub lore: Vec<String>,
}

impl DisplayElement {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            lore: Vec::new(),
        }
    }

    pub fn with_lore(mut self, lore: Vec<String>) -> Self {
        self.lore = lore;
        self
    }

    /// Default fallback element used when a configured display spec is
    /// malformed: a sign labeled with the category name.
    pub fn sign(label: &str) -> Self {
        Self::new("oak_sign", label)
    }
}

/// What clicking a menu entry does. Pure data; the viewer is supplied when
/// the action is dispatched, never stored inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Decorative entry, click does nothing.
    None,
    /// Open the flat tag list, unfiltered (global category).
    OpenAllTags,
    /// Open the tag list filtered to the category id.
    OpenCategory(String),
    NextPage,
    PreviousPage,
    ClearTag,
    OpenFavorites,
    OpenSearch,
    OpenMainMenu,
}

/// A placed menu entry: visual element plus its current action binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub element: DisplayElement,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(element: DisplayElement, action: MenuAction) -> Self {
        Self { element, action }
    }

    pub fn decorative(element: DisplayElement) -> Self {
        Self::new(element, MenuAction::None)
    }
}

/// Builds a display element from a config path plus placeholder substitutions.
///
/// Returns `None` when the configured spec is missing or malformed; failures
/// never propagate past this boundary.
pub trait ElementRenderer: Send + Sync {
    fn render(&self, config_path: &str, placeholders: &Placeholders) -> Option<DisplayElement>;
}
