//! Navigation state model: every open/closed transition lives here.
//!
//! The model is DOM-free. Geometry is fed in by the caller: menu right
//! edges go into [`NavModel::adjust_position`] and the viewport width into
//! [`NavModel::handle_resize`], which hands back a [`ResizeEffect`] naming
//! the menus that need re-measurement.

use log::debug;
use serde::Serialize;

use crate::error::{NavError, NavResult};
use crate::menu::{Alignment, Dropdown, MenuId, MenuState, Nested, ResizeEffect, Scope};
use crate::viewport::{ViewportMode, EDGE_BUFFER};

/// State of the whole navigation bar: one mobile menu, first-level
/// dropdowns grouped by list container, and nested submenus grouped by
/// parent dropdown.
///
/// A toggle's `aria-expanded` state is not stored separately from its
/// menu's visibility; one `open` flag per menu keeps the two equal by
/// construction.
pub struct NavModel {
    viewport_width: f64,
    was_mobile: bool,
    mobile_open: bool,
    dropdowns: Vec<Dropdown>,
    nested: Vec<Nested>,
}

impl NavModel {
    pub fn new(viewport_width: f64) -> Self {
        NavModel {
            viewport_width,
            was_mobile: ViewportMode::from_width(viewport_width).is_mobile(),
            mobile_open: false,
            dropdowns: Vec::new(),
            nested: Vec::new(),
        }
    }

    // ========================
    // Builder surface
    // ========================

    /// Register a first-level dropdown. `list` keys the enclosing list
    /// container; dropdowns sharing a key are exclusivity siblings, and
    /// `None` scopes the dropdown against the whole document.
    pub fn add_dropdown(&mut self, list: Option<usize>) -> MenuId {
        self.dropdowns.push(Dropdown {
            list,
            state: MenuState::default(),
        });
        MenuId::Dropdown(self.dropdowns.len() - 1)
    }

    /// Register a nested submenu under `parent`, which must be a
    /// previously added dropdown.
    pub fn add_nested(&mut self, parent: MenuId) -> NavResult<MenuId> {
        match parent {
            MenuId::Dropdown(i) if i < self.dropdowns.len() => {
                self.nested.push(Nested {
                    parent: i,
                    state: MenuState::default(),
                });
                Ok(MenuId::Nested(self.nested.len() - 1))
            }
            _ => Err(NavError::InvalidParent(parent)),
        }
    }

    // ========================
    // Close operations
    // ========================

    /// Close every dropdown and nested menu in `scope` and clear their
    /// alignment flags. Idempotent.
    pub fn close_all(&mut self, scope: Scope) {
        match scope {
            Scope::Document => {
                for d in &mut self.dropdowns {
                    d.state = MenuState::default();
                }
                for n in &mut self.nested {
                    n.state = MenuState::default();
                }
            }
            Scope::Dropdown(i) => {
                for n in self.nested.iter_mut().filter(|n| n.parent == i) {
                    n.state = MenuState::default();
                }
            }
        }
    }

    pub fn close_mobile_menu(&mut self) {
        self.mobile_open = false;
    }

    /// Full reset: outside clicks, Escape and mode transitions land here.
    pub fn close_everything(&mut self) {
        self.close_all(Scope::Document);
        self.close_mobile_menu();
    }

    // ========================
    // Toggle protocol
    // ========================

    /// Toggle the mobile menu. Opening it first closes all dropdowns, but
    /// closing it leaves them alone. Returns whether the menu is now open.
    pub fn toggle_mobile(&mut self) -> bool {
        let will_open = !self.mobile_open;
        if will_open {
            self.close_all(Scope::Document);
        }
        self.mobile_open = will_open;
        debug!("mobile menu {}", if will_open { "opened" } else { "closed" });
        will_open
    }

    /// Toggle a dropdown or nested menu, closing its exclusivity siblings
    /// first. Returns whether the menu is now open; when `true` the caller
    /// should measure it and call [`adjust_position`](Self::adjust_position).
    pub fn toggle(&mut self, menu: MenuId) -> NavResult<bool> {
        match menu {
            MenuId::Dropdown(i) => self.toggle_dropdown(i),
            MenuId::Nested(i) => self.toggle_nested(i),
        }
    }

    fn toggle_dropdown(&mut self, i: usize) -> NavResult<bool> {
        if i >= self.dropdowns.len() {
            return Err(NavError::DropdownNotFound(i));
        }
        let list = self.dropdowns[i].list;
        let will_open = !self.dropdowns[i].state.open;

        // Siblings share a list container; a dropdown outside any list
        // competes with every other dropdown on the page.
        for (j, other) in self.dropdowns.iter_mut().enumerate() {
            if j != i && (list.is_none() || other.list == list) {
                other.state.open = false;
            }
        }

        self.dropdowns[i].state.open = will_open;
        debug!("dropdown #{i} open={will_open}");
        Ok(will_open)
    }

    fn toggle_nested(&mut self, i: usize) -> NavResult<bool> {
        if i >= self.nested.len() {
            return Err(NavError::NestedNotFound(i));
        }
        let parent = self.nested[i].parent;
        let will_open = !self.nested[i].state.open;

        for (j, other) in self.nested.iter_mut().enumerate() {
            if j != i && other.parent == parent {
                other.state.open = false;
            }
        }

        self.nested[i].state.open = will_open;
        debug!("nested #{i} open={will_open}");
        Ok(will_open)
    }

    // ========================
    // Geometry
    // ========================

    /// Record `menu`'s measured right edge and flip it left when it would
    /// run past the viewport, keeping [`EDGE_BUFFER`] units of clearance.
    /// No-op in mobile mode.
    pub fn adjust_position(&mut self, menu: MenuId, right_edge: f64) -> NavResult<()> {
        if self.viewport_mode().is_mobile() {
            return Ok(());
        }
        let flipped = right_edge > self.viewport_width - EDGE_BUFFER;
        self.state_mut(menu)?.alignment = if flipped {
            Alignment::FlippedLeft
        } else {
            Alignment::Normal
        };
        Ok(())
    }

    /// Update the viewport width. Crossing the mobile/desktop boundary
    /// invalidates all open state; staying within a mode only invalidates
    /// alignment, so the open menus are handed back for re-measurement.
    pub fn handle_resize(&mut self, new_width: f64) -> ResizeEffect {
        self.viewport_width = new_width;
        let is_mobile = ViewportMode::from_width(new_width).is_mobile();
        if is_mobile != self.was_mobile {
            debug!("viewport mode changed, resetting nav");
            self.close_everything();
            self.was_mobile = is_mobile;
            ResizeEffect::Closed
        } else {
            ResizeEffect::Remeasure(self.open_menus())
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn viewport_mode(&self) -> ViewportMode {
        ViewportMode::from_width(self.viewport_width)
    }

    pub fn mobile_open(&self) -> bool {
        self.mobile_open
    }

    pub fn is_open(&self, menu: MenuId) -> NavResult<bool> {
        Ok(self.state(menu)?.open)
    }

    pub fn alignment(&self, menu: MenuId) -> NavResult<Alignment> {
        Ok(self.state(menu)?.alignment)
    }

    /// Every currently visible dropdown and nested menu.
    pub fn open_menus(&self) -> Vec<MenuId> {
        let dropdowns = self
            .dropdowns
            .iter()
            .enumerate()
            .filter(|(_, d)| d.state.open)
            .map(|(i, _)| MenuId::Dropdown(i));
        let nested = self
            .nested
            .iter()
            .enumerate()
            .filter(|(_, n)| n.state.open)
            .map(|(i, _)| MenuId::Nested(i));
        dropdowns.chain(nested).collect()
    }

    fn state(&self, menu: MenuId) -> NavResult<&MenuState> {
        match menu {
            MenuId::Dropdown(i) => self
                .dropdowns
                .get(i)
                .map(|d| &d.state)
                .ok_or(NavError::DropdownNotFound(i)),
            MenuId::Nested(i) => self
                .nested
                .get(i)
                .map(|n| &n.state)
                .ok_or(NavError::NestedNotFound(i)),
        }
    }

    fn state_mut(&mut self, menu: MenuId) -> NavResult<&mut MenuState> {
        match menu {
            MenuId::Dropdown(i) => self
                .dropdowns
                .get_mut(i)
                .map(|d| &mut d.state)
                .ok_or(NavError::DropdownNotFound(i)),
            MenuId::Nested(i) => self
                .nested
                .get_mut(i)
                .map(|n| &mut n.state)
                .ok_or(NavError::NestedNotFound(i)),
        }
    }

    /// Serializable view of the full state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            viewport_width: self.viewport_width,
            mode: self.viewport_mode(),
            mobile_open: self.mobile_open,
            dropdowns: self.dropdowns.iter().map(|d| d.state.into()).collect(),
            nested: self.nested.iter().map(|n| n.state.into()).collect(),
        }
    }
}

/// Point-in-time view of the navigation state, for debugging and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub viewport_width: f64,
    pub mode: ViewportMode,
    pub mobile_open: bool,
    pub dropdowns: Vec<MenuSnapshot>,
    pub nested: Vec<MenuSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MenuSnapshot {
    pub open: bool,
    pub alignment: Alignment,
}

impl From<MenuState> for MenuSnapshot {
    fn from(state: MenuState) -> Self {
        MenuSnapshot {
            open: state.open,
            alignment: state.alignment,
        }
    }
}
