//! Resizing from any edge or corner.
//!
//! Pixel-space resolution ([`resize_item_in_direction`]) keeps an in-flight
//! resize inside the container. Grid-space resolution ([`resize_element`])
//! commits a new size and lets the layout settle around it.

use gridlock_core::debug;
use gridlock_core::geometry::PixelRect;

use crate::CompactionMode;
use crate::collision::{all_collisions, collides, index_of};
use crate::compact::compact;
use crate::error::LayoutError;
use crate::item::{LayoutItem, ResizeHandle};
use crate::movement::{MoveOptions, move_element};

/// Keep `proposed` within the container for a drag on `handle`.
///
/// `current` is the rectangle before the drag step. Corner handles apply the
/// vertical rule to the result of the horizontal one; both measure their
/// deltas against `current`.
pub fn resize_item_in_direction(
    handle: ResizeHandle,
    current: &PixelRect,
    proposed: PixelRect,
    container_width: f64,
) -> PixelRect {
    match handle {
        ResizeHandle::N => north(current, proposed),
        ResizeHandle::Ne => north(current, east(current, proposed, container_width)),
        ResizeHandle::E => east(current, proposed, container_width),
        ResizeHandle::Se => south(current, east(current, proposed, container_width)),
        ResizeHandle::S => south(current, proposed),
        ResizeHandle::Sw => south(current, west(current, proposed, container_width)),
        ResizeHandle::W => west(current, proposed, container_width),
        ResizeHandle::Nw => north(current, west(current, proposed, container_width)),
    }
}

fn constrain_width(left: f64, current_width: f64, width: f64, container_width: f64) -> f64 {
    if left + width > container_width {
        current_width
    } else {
        width
    }
}

fn constrain_height(top: f64, current_height: f64, height: f64) -> f64 {
    if top < 0.0 { current_height } else { height }
}

fn east(current: &PixelRect, proposed: PixelRect, container_width: f64) -> PixelRect {
    PixelRect {
        width: constrain_width(current.left, current.width, proposed.width, container_width),
        left: proposed.left.max(0.0),
        ..proposed
    }
}

fn west(current: &PixelRect, proposed: PixelRect, container_width: f64) -> PixelRect {
    let left = current.left - (proposed.width - current.width);
    let width = if left < 0.0 {
        current.width
    } else {
        constrain_width(current.left, current.width, proposed.width, container_width)
    };
    PixelRect {
        top: proposed.top.max(0.0),
        left: left.max(0.0),
        width,
        height: proposed.height,
    }
}

fn north(current: &PixelRect, proposed: PixelRect) -> PixelRect {
    let top = current.top - (proposed.height - current.height);
    PixelRect {
        top: top.max(0.0),
        height: constrain_height(top, current.height, proposed.height),
        ..proposed
    }
}

fn south(current: &PixelRect, proposed: PixelRect) -> PixelRect {
    PixelRect {
        top: proposed.top.max(0.0),
        height: constrain_height(proposed.top, current.height, proposed.height),
        ..proposed
    }
}

/// Parameters for [`resize_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    pub mode: CompactionMode,
    pub cols: i32,
    /// Shrink a resize that would collide instead of displacing neighbours.
    pub prevent_collision: bool,
    pub allow_overlap: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            mode: CompactionMode::Vertical,
            cols: 12,
            prevent_collision: false,
            allow_overlap: false,
        }
    }
}

/// Resize item `id` to `w × h` grid units via `handle`.
///
/// The size is clamped to the item's min/max. West and north handles keep the
/// right and bottom edges in place, moving the item when the size changes.
pub fn resize_element(
    layout: &[LayoutItem],
    id: &str,
    w: i32,
    h: i32,
    handle: ResizeHandle,
    options: ResizeOptions,
) -> Result<Vec<LayoutItem>, LayoutError> {
    let idx = index_of(layout, id).ok_or_else(|| LayoutError::UnknownItem { id: id.to_string() })?;
    let original = &layout[idx];
    let (mut w, mut h) = original.constrain_size(w, h);
    let (mut x, mut y) = (original.x, original.y);

    if handle.is_west() {
        x = original.right().saturating_sub(w);
        if x < 0 {
            x = 0;
            w = original.right();
        }
    }
    if handle.is_north() {
        y = original.bottom().saturating_sub(h);
        if y < 0 {
            y = 0;
            h = original.bottom();
        }
    }

    if options.prevent_collision && !options.allow_overlap {
        let candidate = LayoutItem { x, y, w, h, ..original.clone() };
        let collisions = all_collisions(layout, &candidate);
        if !collisions.is_empty() {
            let least_x = collisions.iter().map(|c| c.x).filter(|&cx| cx > x).min();
            let least_y = collisions.iter().map(|c| c.y).filter(|&cy| cy > y).min();
            if let Some(least_x) = least_x {
                w = least_x - x;
            }
            if let Some(least_y) = least_y {
                h = least_y - y;
            }
            let shrunk = LayoutItem { w, h, ..candidate };
            if layout.iter().any(|other| collides(other, &shrunk)) {
                (x, y, w, h) = (original.x, original.y, original.w, original.h);
            }
        }
    }

    debug!(
        id,
        handle = %handle,
        from = ?(original.w, original.h),
        to = ?(w, h),
        "resize"
    );

    let mut items = layout.to_vec();
    items[idx].w = w;
    items[idx].h = h;

    if (x, y) != (original.x, original.y) {
        let move_options = MoveOptions {
            is_user_action: true,
            prevent_collision: options.prevent_collision,
            mode: options.mode,
            cols: options.cols,
            allow_overlap: options.allow_overlap,
        };
        items = move_element(&items, id, Some(x), Some(y), move_options)?.into_owned();
    }

    if options.allow_overlap {
        return Ok(items);
    }
    Ok(compact(&items, options.mode, options.cols, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(layout: &[LayoutItem], id: &str) -> (i32, i32, i32, i32) {
        let item = layout.iter().find(|i| i.id == id).expect("item present");
        (item.x, item.y, item.w, item.h)
    }

    const CURRENT: PixelRect = PixelRect::new(100.0, 100.0, 200.0, 150.0);

    #[test]
    fn north_west_grows_up_and_left() {
        let proposed = PixelRect::new(80.0, 80.0, 220.0, 170.0);
        let out = resize_item_in_direction(ResizeHandle::Nw, &CURRENT, proposed, 1000.0);
        assert_eq!(out, PixelRect::new(80.0, 80.0, 220.0, 170.0));
    }

    #[test]
    fn east_respects_container_width() {
        let proposed = PixelRect::new(100.0, 100.0, 950.0, 150.0);
        let out = resize_item_in_direction(ResizeHandle::E, &CURRENT, proposed, 1000.0);
        assert_eq!(out.width, 200.0);

        let proposed = PixelRect::new(100.0, 100.0, 300.0, 150.0);
        let out = resize_item_in_direction(ResizeHandle::E, &CURRENT, proposed, 1000.0);
        assert_eq!(out.width, 300.0);
    }

    #[test]
    fn west_past_left_edge_keeps_width() {
        let proposed = PixelRect::new(100.0, 0.0, 350.0, 150.0);
        let out = resize_item_in_direction(ResizeHandle::W, &CURRENT, proposed, 1000.0);
        assert_eq!(out.width, 200.0);
        assert_eq!(out.left, 0.0);
    }

    #[test]
    fn north_past_top_keeps_height() {
        let proposed = PixelRect::new(0.0, 100.0, 200.0, 300.0);
        let out = resize_item_in_direction(ResizeHandle::N, &CURRENT, proposed, 1000.0);
        assert_eq!(out.height, 150.0);
        assert_eq!(out.top, 0.0);
    }

    #[test]
    fn south_reverts_on_negative_top() {
        let proposed = PixelRect::new(-5.0, 100.0, 200.0, 400.0);
        let out = resize_item_in_direction(ResizeHandle::S, &CURRENT, proposed, 1000.0);
        assert_eq!(out.height, 150.0);
        assert_eq!(out.top, 0.0);
    }

    #[test]
    fn south_east_combines_both_checks() {
        let proposed = PixelRect::new(100.0, 100.0, 2000.0, 400.0);
        let out = resize_item_in_direction(ResizeHandle::Se, &CURRENT, proposed, 1000.0);
        assert_eq!((out.width, out.height), (200.0, 400.0));
    }

    #[test]
    fn grid_resize_grows_item() {
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 2),
            LayoutItem::new("b", 4, 0, 2, 2),
        ];
        let out = resize_element(&layout, "a", 3, 2, ResizeHandle::Se, ResizeOptions::default())
            .unwrap();
        assert_eq!(rect(&out, "a"), (0, 0, 3, 2));
        assert_eq!(rect(&out, "b"), (4, 0, 2, 2));
    }

    #[test]
    fn grid_resize_pushes_neighbour_down() {
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 1),
            LayoutItem::new("b", 2, 0, 2, 1),
        ];
        let out = resize_element(&layout, "a", 3, 1, ResizeHandle::E, ResizeOptions::default())
            .unwrap();
        assert_eq!(rect(&out, "a"), (0, 0, 3, 1));
        assert_eq!(rect(&out, "b"), (2, 1, 2, 1));
    }

    #[test]
    fn prevent_collision_shrinks_to_neighbour() {
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 1),
            LayoutItem::new("b", 3, 0, 2, 1),
        ];
        let options = ResizeOptions {
            prevent_collision: true,
            ..ResizeOptions::default()
        };
        let out = resize_element(&layout, "a", 6, 1, ResizeHandle::E, options).unwrap();
        assert_eq!(rect(&out, "a"), (0, 0, 3, 1));
        assert_eq!(rect(&out, "b"), (3, 0, 2, 1));
    }

    #[test]
    fn constraints_clamp_size() {
        let layout = vec![LayoutItem::new("a", 0, 0, 2, 2).with_max_size(3, 3).with_min_size(1, 2)];
        let out = resize_element(&layout, "a", 8, 1, ResizeHandle::Se, ResizeOptions::default())
            .unwrap();
        assert_eq!(rect(&out, "a"), (0, 0, 3, 2));
    }

    #[test]
    fn west_handle_keeps_right_edge() {
        let layout = vec![LayoutItem::new("a", 4, 0, 2, 1)];
        let out = resize_element(&layout, "a", 4, 1, ResizeHandle::W, ResizeOptions::default())
            .unwrap();
        assert_eq!(rect(&out, "a"), (2, 0, 4, 1));

        let out = resize_element(&layout, "a", 9, 1, ResizeHandle::W, ResizeOptions::default())
            .unwrap();
        assert_eq!(rect(&out, "a"), (0, 0, 6, 1));
    }

    #[test]
    fn north_handle_keeps_bottom_edge() {
        let options = ResizeOptions {
            mode: CompactionMode::None,
            ..ResizeOptions::default()
        };
        let layout = vec![LayoutItem::new("a", 0, 3, 1, 2)];
        let out = resize_element(&layout, "a", 1, 4, ResizeHandle::N, options).unwrap();
        assert_eq!(rect(&out, "a"), (0, 1, 1, 4));
    }

    #[test]
    fn allow_overlap_skips_compaction() {
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 1),
            LayoutItem::new("b", 2, 0, 2, 1),
        ];
        let options = ResizeOptions {
            allow_overlap: true,
            ..ResizeOptions::default()
        };
        let out = resize_element(&layout, "a", 3, 1, ResizeHandle::E, options).unwrap();
        assert_eq!(rect(&out, "b"), (2, 0, 2, 1));
        assert!(collides(&out[0], &out[1]));
    }

    #[test]
    fn unknown_item() {
        let err = resize_element(&[], "a", 1, 1, ResizeHandle::Se, ResizeOptions::default())
            .unwrap_err();
        assert_eq!(err, LayoutError::UnknownItem { id: "a".to_string() });
    }
}
