//! Responsive navigation controller for the browser
//!
//! This library manages the open/closed state of a hamburger menu, a row of
//! first-level dropdown menus and the nested submenus inside them, including
//! viewport-edge repositioning of open menus in desktop mode.
//!
//! All transition logic lives in a DOM-free [`model::NavModel`] that can be
//! driven natively; the `wasm` feature adds the [`dom`] module, which scans
//! the page for the expected markup, listens for click/keydown/resize events
//! and mirrors model state back as presentation classes and `aria-expanded`
//! attributes.
//!
//! ## Example
//! ```rust
//! use nav_controller::prelude::*;
//!
//! let mut nav = NavModel::new(1024.0);
//!
//! // Two dropdowns sharing one list container.
//! let products = nav.add_dropdown(Some(0));
//! let services = nav.add_dropdown(Some(0));
//!
//! // Opening one closes its sibling.
//! nav.toggle(products).unwrap();
//! nav.toggle(services).unwrap();
//! assert!(!nav.is_open(products).unwrap());
//! assert!(nav.is_open(services).unwrap());
//!
//! // A menu whose right edge runs past the viewport flips left.
//! nav.adjust_position(services, 1010.0).unwrap();
//! assert_eq!(nav.alignment(services).unwrap(), Alignment::FlippedLeft);
//! ```

pub mod error;
pub mod menu;
pub mod model;
pub mod viewport;

// Re-export common types
pub mod prelude {
    pub use crate::error::{NavError, NavResult};
    pub use crate::menu::{Alignment, MenuId, ResizeEffect, Scope};
    pub use crate::model::{MenuSnapshot, NavModel, Snapshot};
    pub use crate::viewport::{ViewportMode, EDGE_BUFFER, MOBILE_BREAKPOINT};
}

#[cfg(feature = "wasm")]
pub mod dom;
