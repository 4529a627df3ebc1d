//! Pixel ⇄ grid-unit conversion.
//!
//! Gaps are only inserted *between* grid units: an item spanning `n` columns
//! is `n` column widths plus `n - 1` margins wide. Container padding offsets
//! the origin once.
//!
//! All rounding is half-up (`floor(v + 0.5)`), so `-2.5` rounds to `-2`.

use gridlock_core::geometry::{PixelRect, Spacing};
use serde::{Deserialize, Serialize};

use crate::item::ResizeHandle;

/// Grid parameters for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridParams {
    /// Gap between items, `[horizontal, vertical]`.
    pub margin: Spacing,
    /// Padding inside the container edges, `[horizontal, vertical]`.
    pub container_padding: Spacing,
    /// Container width in pixels.
    pub container_width: f64,
    /// Number of columns.
    pub cols: i32,
    /// Height of one row in pixels.
    pub row_height: f64,
    /// Maximum number of rows; `i32::MAX` means unbounded.
    pub max_rows: i32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            margin: Spacing::uniform(10.0),
            container_padding: Spacing::uniform(10.0),
            container_width: 1280.0,
            cols: 12,
            row_height: 150.0,
            max_rows: i32::MAX,
        }
    }
}

/// Exact pixel geometry supplied by an in-flight interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionOverride {
    /// The item is being dragged; its top/left follow the pointer.
    Dragging { top: f64, left: f64 },
    /// The item is being resized. West/north handles also move top/left.
    Resizing {
        width: f64,
        height: f64,
        top: Option<f64>,
        left: Option<f64>,
    },
}

/// Half-up rounding.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// `max(min(n, hi), lo)`. The lower bound wins when `lo > hi`.
#[inline]
pub fn clamp(n: i32, lo: i32, hi: i32) -> i32 {
    n.min(hi).max(lo)
}

/// Width of one column in pixels. Not rounded.
pub fn column_width(params: &GridParams) -> f64 {
    let cols = f64::from(params.cols);
    (params.container_width
        - params.margin.x * (cols - 1.0)
        - 2.0 * params.container_padding.x)
        / cols
}

/// Pixel extent of `units` grid units along one axis.
///
/// Non-finite input is returned unchanged so `0 × ∞` never produces `NaN`.
pub fn grid_units_to_pixels(units: f64, axis_size: f64, margin: f64) -> f64 {
    if !units.is_finite() {
        return units;
    }
    round_half_up(axis_size * units + (units - 1.0).max(0.0) * margin)
}

/// Pixel rectangle for a grid item, honoring an in-flight interaction.
pub fn grid_position_to_pixels(
    params: &GridParams,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    active: Option<&PositionOverride>,
) -> PixelRect {
    let col_width = column_width(params);

    let (width, height) = match active {
        Some(PositionOverride::Resizing { width, height, .. }) => {
            (round_half_up(*width), round_half_up(*height))
        }
        _ => (
            grid_units_to_pixels(f64::from(w), col_width, params.margin.x),
            grid_units_to_pixels(f64::from(h), params.row_height, params.margin.y),
        ),
    };

    let (top, left) = match active {
        Some(PositionOverride::Dragging { top, left }) => {
            (round_half_up(*top), round_half_up(*left))
        }
        Some(PositionOverride::Resizing {
            top: Some(top),
            left: Some(left),
            ..
        }) => (round_half_up(*top), round_half_up(*left)),
        _ => (
            round_half_up(
                (params.row_height + params.margin.y) * f64::from(y) + params.container_padding.y,
            ),
            round_half_up(
                (col_width + params.margin.x) * f64::from(x) + params.container_padding.x,
            ),
        ),
    };

    PixelRect::new(top, left, width, height)
}

/// Grid position for a pixel top/left, clamped so the item stays on the grid.
pub fn pixels_to_grid_position(
    params: &GridParams,
    top: f64,
    left: f64,
    w: i32,
    h: i32,
) -> (i32, i32) {
    let col_width = column_width(params);
    let x = round_half_up((left - params.container_padding.x) / (col_width + params.margin.x));
    let y = round_half_up((top - params.container_padding.y) / (params.row_height + params.margin.y));

    let x = clamp(x as i32, 0, params.cols.saturating_sub(w));
    let y = clamp(y as i32, 0, params.max_rows.saturating_sub(h));
    (x, y)
}

/// Grid size for a pixel width/height.
///
/// West- and north-side handles move the leading edge, so the opposite bound
/// is the whole grid rather than the space right of (or below) `x`/`y`.
pub fn pixels_to_grid_size(
    params: &GridParams,
    width: f64,
    height: f64,
    x: i32,
    y: i32,
    handle: ResizeHandle,
) -> (i32, i32) {
    let col_width = column_width(params);
    let w = round_half_up((width + params.margin.x) / (col_width + params.margin.x)) as i32;
    let h = round_half_up((height + params.margin.y) / (params.row_height + params.margin.y)) as i32;

    let w = if handle.is_west() {
        clamp(w, 0, params.cols)
    } else {
        clamp(w, 0, params.cols.saturating_sub(x))
    };
    let h = if handle.is_north() {
        clamp(h, 0, params.max_rows)
    } else {
        clamp(h, 0, params.max_rows.saturating_sub(y))
    };
    (w, h)
}

/// Keep a dragged item's pixel position inside the container.
///
/// Applies to bounded items only; `container_height` is the measured height
/// of the container.
pub fn bounded_drag_position(
    params: &GridParams,
    top: f64,
    left: f64,
    w: i32,
    h: i32,
    container_height: f64,
) -> (f64, f64) {
    let bottom_boundary =
        container_height - grid_units_to_pixels(f64::from(h), params.row_height, params.margin.y);
    let right_boundary = params.container_width
        - grid_units_to_pixels(f64::from(w), column_width(params), params.margin.x);
    (
        top.min(bottom_boundary).max(0.0),
        left.min(right_boundary).max(0.0),
    )
}
