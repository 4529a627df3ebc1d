//! Fit items inside the column range.

use gridlock_core::trace;

use crate::collision::first_collision;
use crate::item::LayoutItem;

/// Move every item back inside `[0, cols)`.
///
/// Items past the right edge slide left; items starting left of the grid are
/// moved to column 0 and stretched to the full width. Static items that land
/// on an earlier non-static item are pushed down until clear.
pub fn correct_bounds(layout: &[LayoutItem], cols: i32) -> Vec<LayoutItem> {
    let mut out = layout.to_vec();
    let mut obstacles: Vec<LayoutItem> = Vec::with_capacity(out.len());

    for item in &mut out {
        if item.right() > cols {
            item.x = cols.saturating_sub(item.w);
        }
        if item.x < 0 {
            item.x = 0;
            item.w = cols;
        }

        if item.is_static {
            let start = item.y;
            while first_collision(&obstacles, item).is_some() {
                item.y = item.y.saturating_add(1);
            }
            if item.y != start {
                trace!(id = %item.id, from = start, to = item.y, "static item pushed down");
            }
        } else {
            obstacles.push(item.clone());
        }
    }
    out
}
