//! Menu state primitives: identifiers, alignment flags and close scopes.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of an open menu.
///
/// Only meaningful while the menu is visible, and only computed in desktop
/// mode; mobile layouts never flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    Normal,
    FlippedLeft,
}

/// Handle to a first-level or nested menu inside a
/// [`NavModel`](crate::model::NavModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuId {
    Dropdown(usize),
    Nested(usize),
}

/// Subtree a close operation applies to.
///
/// `Dropdown` scopes to the contents of one first-level menu, so it reaches
/// the nested menus inside it but not the dropdown itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Document,
    Dropdown(usize),
}

/// What the binding layer must do after a viewport resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeEffect {
    /// The mobile/desktop boundary was crossed; all menus were closed.
    Closed,
    /// Same mode as before; re-measure these open menus and re-apply
    /// their alignment.
    Remeasure(Vec<MenuId>),
}

/// Visibility and alignment of a single menu.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MenuState {
    pub open: bool,
    pub alignment: Alignment,
}

/// A first-level dropdown. `list` keys the enclosing list container; `None`
/// falls back to document-wide scope for sibling exclusivity.
#[derive(Debug, Clone)]
pub(crate) struct Dropdown {
    pub list: Option<usize>,
    pub state: MenuState,
}

/// A nested submenu, scoped inside one parent dropdown.
#[derive(Debug, Clone)]
pub(crate) struct Nested {
    pub parent: usize,
    pub state: MenuState,
}
