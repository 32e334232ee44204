//! Error types for the navigation controller

use thiserror::Error;

use crate::menu::MenuId;

/// Main error type for navigation state operations
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Dropdown menu #{0} not found")]
    DropdownNotFound(usize),

    #[error("Nested menu #{0} not found")]
    NestedNotFound(usize),

    #[error("Nested menus must attach to a first-level dropdown, got {0:?}")]
    InvalidParent(MenuId),

    #[error("Required element '{0}' missing from page")]
    MissingElement(&'static str),
}

/// Result type for navigation state operations
pub type NavResult<T> = Result<T, NavError>;

#[cfg(feature = "wasm")]
impl From<NavError> for wasm_bindgen::JsValue {
    fn from(err: NavError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
