//! Viewport mode detection and layout constants.

use serde::{Deserialize, Serialize};

/// Mobile/desktop breakpoint in CSS pixels, inclusive on the mobile side.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Gap kept between a menu's right edge and the viewport edge before the
/// menu flips to left-aligned.
pub const EDGE_BUFFER: f64 = 20.0;

/// Layout mode derived from the current viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    Mobile,
    Desktop,
}

impl ViewportMode {
    pub fn from_width(width: f64) -> Self {
        if width <= MOBILE_BREAKPOINT {
            ViewportMode::Mobile
        } else {
            ViewportMode::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, ViewportMode::Mobile)
    }
}
