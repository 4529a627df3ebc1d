#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Two coordinate spaces meet here: integer grid units ([`GridRect`]) and
//! fractional pixels ([`PixelRect`]). Grid edges saturate instead of
//! overflowing so a "drop to bottom" request (`y = i32::MAX`) stays ordered
//! after every finite row.

use serde::{Deserialize, Serialize};

/// A rectangle in grid units.
///
/// Origin is top-left; `x` counts columns, `y` counts rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    /// Left column (inclusive).
    pub x: i32,
    /// Top row (inclusive).
    pub y: i32,
    /// Width in columns.
    pub w: i32,
    /// Height in rows.
    pub h: i32,
}

impl GridRect {
    /// Create a new grid rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Strict overlap test.
    ///
    /// Rectangles whose edges merely touch do not overlap.
    #[inline]
    pub const fn overlaps(&self, other: &GridRect) -> bool {
        !(self.right() <= other.x
            || self.x >= other.right()
            || self.bottom() <= other.y
            || self.y >= other.bottom())
    }
}

/// A rectangle in pixels, as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Create a new pixel rectangle.
    #[inline]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A horizontal/vertical pixel pair, used for margins and container padding.
///
/// Serialized as a `[x, y]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Spacing {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Spacing {
    /// Create a spacing pair.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same value on both axes.
    pub const fn uniform(val: f64) -> Self {
        Self { x: val, y: val }
    }
}

impl From<f64> for Spacing {
    fn from(val: f64) -> Self {
        Self::uniform(val)
    }
}

impl From<[f64; 2]> for Spacing {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Spacing {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Spacing> for [f64; 2] {
    fn from(spacing: Spacing) -> Self {
        [spacing.x, spacing.y]
    }
}
