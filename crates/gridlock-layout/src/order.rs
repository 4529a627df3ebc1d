//! Deterministic traversal order for compaction and collision resolution.
//!
//! Sorting is stable and ties compare equal, so equal keys keep their input
//! order on every platform.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::CompactionMode;
use crate::item::LayoutItem;

/// Row-major order: `(y, x)` ascending.
#[inline]
pub fn cmp_row_col(a: &LayoutItem, b: &LayoutItem) -> Ordering {
    a.y.cmp(&b.y).then(a.x.cmp(&b.x))
}

/// Column-major order: `(x, y)` ascending.
#[inline]
pub fn cmp_col_row(a: &LayoutItem, b: &LayoutItem) -> Ordering {
    a.x.cmp(&b.x).then(a.y.cmp(&b.y))
}

/// Items in the order `mode` traverses them.
///
/// `None` keeps the input order and borrows it.
pub fn sort_for_compaction(layout: &[LayoutItem], mode: CompactionMode) -> Cow<'_, [LayoutItem]> {
    match mode {
        CompactionMode::None => Cow::Borrowed(layout),
        CompactionMode::Vertical => {
            let mut sorted = layout.to_vec();
            sorted.sort_by(cmp_row_col);
            Cow::Owned(sorted)
        }
        CompactionMode::Horizontal => {
            let mut sorted = layout.to_vec();
            sorted.sort_by(cmp_col_row);
            Cow::Owned(sorted)
        }
    }
}

/// Indices of `layout` in the order `mode` traverses them.
pub fn compaction_order(layout: &[LayoutItem], mode: CompactionMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).collect();
    match mode {
        CompactionMode::None => {}
        CompactionMode::Vertical => order.sort_by(|&a, &b| cmp_row_col(&layout[a], &layout[b])),
        CompactionMode::Horizontal => {
            order.sort_by(|&a, &b| cmp_col_row(&layout[a], &layout[b]))
        }
    }
    order
}

/// Sort a layout row-major in place.
pub fn sort_row_col(layout: &mut [LayoutItem]) {
    layout.sort_by(cmp_row_col);
}
