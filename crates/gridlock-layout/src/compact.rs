//! Gap removal.
//!
//! Static items are seeded as obstacles, then every other item is visited in
//! [`compaction_order`] and pulled toward the origin until it would collide.
//! Items that still collide are pushed past their collider, and later items in
//! the way are pushed along with them.

use gridlock_core::{debug, trace};

use crate::collision::{bottom, collides, first_collision};
use crate::debug::{CompactionRecord, LayoutDebugger};
use crate::item::LayoutItem;
use crate::order::compaction_order;
use crate::{Axis, CompactionMode};

/// Compact a layout toward the edge selected by `mode`.
///
/// The output has the input's length and ordering, and `moved` is cleared on
/// every item.
pub fn compact(
    layout: &[LayoutItem],
    mode: CompactionMode,
    cols: i32,
    allow_overlap: bool,
) -> Vec<LayoutItem> {
    compact_traced(layout, mode, cols, allow_overlap, None)
}

/// [`compact`], recording the pass to `debugger` when it is enabled.
pub fn compact_traced(
    layout: &[LayoutItem],
    mode: CompactionMode,
    cols: i32,
    allow_overlap: bool,
    debugger: Option<&LayoutDebugger>,
) -> Vec<LayoutItem> {
    let order = compaction_order(layout, mode);
    let mut sorted: Vec<LayoutItem> = order.iter().map(|&i| layout[i].clone()).collect();
    let mut placed: Vec<LayoutItem> = layout.iter().filter(|i| i.is_static).cloned().collect();
    let mut out = layout.to_vec();

    for k in 0..sorted.len() {
        if !sorted[k].is_static {
            compact_item(&placed, &mut sorted, k, mode, cols, allow_overlap);
            placed.push(sorted[k].clone());
        }
        let mut item = sorted[k].clone();
        item.moved = false;
        out[order[k]] = item;
    }

    let shifted: Vec<_> = layout
        .iter()
        .zip(&out)
        .filter(|(before, after)| (before.x, before.y) != (after.x, after.y))
        .map(|(before, after)| (after.id.clone(), (before.x, before.y), (after.x, after.y)))
        .collect();

    debug!(
        mode = %mode,
        cols,
        items = layout.len(),
        shifted = shifted.len(),
        "compacted layout"
    );

    if let Some(debugger) = debugger {
        debugger.record_compaction(CompactionRecord {
            mode,
            cols,
            item_count: layout.len(),
            shifted,
        });
    }

    out
}

/// Place `items[idx]` against the already placed obstacles.
fn compact_item(
    placed: &[LayoutItem],
    items: &mut [LayoutItem],
    idx: usize,
    mode: CompactionMode,
    cols: i32,
    allow_overlap: bool,
) {
    let item = &mut items[idx];
    item.x = item.x.max(0);
    item.y = item.y.max(0);

    match mode {
        CompactionMode::Vertical => {
            let floor = bottom(placed);
            let item = &mut items[idx];
            item.y = item.y.min(floor);
            pull_toward_origin(placed, item, Axis::Y);
        }
        CompactionMode::Horizontal => pull_toward_origin(placed, &mut items[idx], Axis::X),
        CompactionMode::None => {}
    }

    let push_axis = if mode == CompactionMode::Horizontal {
        Axis::X
    } else {
        Axis::Y
    };

    // An item wider than the grid sits at x = 0 and never counts as overflowing.
    let overflows = |item: &LayoutItem| {
        mode == CompactionMode::Horizontal && item.x > 0 && item.right() > cols
    };

    loop {
        let collider_end = if allow_overlap && mode == CompactionMode::None {
            None
        } else {
            first_collision(placed, &items[idx]).map(|c| push_axis.end(c))
        };

        if let Some(move_to) = collider_end {
            trace!(id = %items[idx].id, move_to, "compaction collision");
            resolve_compaction_collision(items, idx, move_to, push_axis);
        } else if !overflows(&items[idx]) {
            break;
        }

        if overflows(&items[idx]) {
            let item = &mut items[idx];
            item.x = cols.saturating_sub(item.w).max(0);
            item.y = item.y.saturating_add(1);
            pull_toward_origin(placed, item, Axis::X);
        }
    }

    let item = &mut items[idx];
    item.x = item.x.max(0);
    item.y = item.y.max(0);
}

/// Step `item` toward the origin on `axis` while the next step is free.
fn pull_toward_origin(placed: &[LayoutItem], item: &mut LayoutItem, axis: Axis) {
    while axis.start(item) > 0 {
        let current = axis.start(item);
        axis.set_start(item, current - 1);
        if first_collision(placed, item).is_some() {
            axis.set_start(item, current);
            break;
        }
    }
}

/// Move `items[idx]` to `move_to` on `axis`, pushing later non-static items
/// that it now overlaps to its far edge.
///
/// `items` must be in compaction order; the scan stops at the first later item
/// that starts beyond the moved item's far edge.
fn resolve_compaction_collision(items: &mut [LayoutItem], idx: usize, move_to: i32, axis: Axis) {
    axis.set_start(&mut items[idx], move_to);
    let far = axis.end(&items[idx]);

    for j in idx + 1..items.len() {
        if items[j].is_static {
            continue;
        }
        if axis.start(&items[j]) > far {
            break;
        }
        if collides(&items[idx], &items[j]) {
            resolve_compaction_collision(items, j, far, axis);
        }
    }
}
