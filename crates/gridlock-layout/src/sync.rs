//! Rebuild a layout from the current set of children.
//!
//! Children are identified by key. A child keeps its previous placement
//! unless it carries an explicit one; brand-new children without a placement
//! are stacked at the bottom.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use gridlock_core::debug;

use crate::CompactionMode;
use crate::bounds::correct_bounds;
use crate::collision::bottom;
use crate::compact::compact;
use crate::coords::round_half_up;
use crate::error::LayoutError;
use crate::item::{LayoutItem, ResizeHandle};
use crate::validate::validate_placement;

/// A placement supplied alongside a child.
///
/// Coordinates are fractional so that unvalidated host input (including
/// `NaN`) can be represented and rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPlacement {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<i32>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resizable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bounded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize_handles: Option<Vec<ResizeHandle>>,
}

impl GridPlacement {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Convert to a layout item, rounding coordinates half-up.
    ///
    /// Infinite coordinates saturate, so `y = ∞` becomes `i32::MAX`.
    pub fn into_item(self, id: impl Into<String>) -> LayoutItem {
        LayoutItem {
            id: id.into(),
            x: round_half_up(self.x) as i32,
            y: round_half_up(self.y) as i32,
            w: round_half_up(self.w) as i32,
            h: round_half_up(self.h) as i32,
            min_w: self.min_w,
            max_w: self.max_w,
            min_h: self.min_h,
            max_h: self.max_h,
            is_static: self.is_static,
            is_draggable: self.is_draggable,
            is_resizable: self.is_resizable,
            is_bounded: self.is_bounded,
            resize_handles: self.resize_handles,
            moved: false,
        }
    }
}

/// One child to be placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub key: String,
    /// Explicit placement; overrides whatever the previous layout held.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridPlacement>,
}

impl ItemDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            grid: None,
        }
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridPlacement) -> Self {
        self.grid = Some(grid);
        self
    }
}

/// Build the layout for `children`, reusing placements from `previous`.
///
/// Items in `previous` with no matching child are dropped. The result is
/// bounds-corrected and, unless `allow_overlap`, compacted.
pub fn synchronize_layout_with_children(
    previous: &[LayoutItem],
    children: &[ItemDescriptor],
    cols: i32,
    mode: CompactionMode,
    allow_overlap: bool,
) -> Result<Vec<LayoutItem>, LayoutError> {
    let existing: FxHashMap<&str, &LayoutItem> =
        previous.iter().map(|item| (item.id.as_str(), item)).collect();
    let mut seen = FxHashSet::default();
    let mut layout: Vec<LayoutItem> = Vec::with_capacity(children.len());

    for (index, child) in children.iter().enumerate() {
        if !seen.insert(child.key.as_str()) {
            return Err(LayoutError::DuplicateId {
                id: child.key.clone(),
            });
        }

        let item = match (&child.grid, existing.get(child.key.as_str())) {
            (None, Some(prev)) => {
                let mut item = (*prev).clone();
                item.moved = false;
                item
            }
            (Some(grid), _) => {
                validate_placement(grid, "synchronize_layout_with_children", index)?;
                grid.clone().into_item(child.key.as_str())
            }
            (None, None) => LayoutItem::new(child.key.as_str(), 0, bottom(&layout), 1, 1),
        };
        layout.push(item);
    }

    debug!(
        children = children.len(),
        previous = previous.len(),
        cols,
        "synchronized layout with children"
    );

    let corrected = correct_bounds(&layout, cols);
    if allow_overlap {
        Ok(corrected)
    } else {
        Ok(compact(&corrected, mode, cols, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(layout: &[LayoutItem], id: &str) -> (i32, i32, i32, i32) {
        let item = layout.iter().find(|i| i.id == id).expect("item present");
        (item.x, item.y, item.w, item.h)
    }

    #[test]
    fn into_item_rounds_half_up() {
        let item = GridPlacement::new(1.5, 2.4, -0.5, 3.5).into_item("a");
        assert_eq!(item.rect(), gridlock_core::GridRect::new(2, 2, 0, 4));
        let bottom = GridPlacement::new(0.0, f64::INFINITY, 1.0, 1.0).into_item("b");
        assert_eq!(bottom.y, i32::MAX);
    }

    #[test]
    fn reuses_previous_placement() {
        let previous = vec![LayoutItem::new("a", 3, 0, 2, 2)];
        let children = [ItemDescriptor::new("a")];
        let out = synchronize_layout_with_children(
            &previous,
            &children,
            12,
            CompactionMode::Vertical,
            false,
        )
        .unwrap();
        assert_eq!(pos(&out, "a"), (3, 0, 2, 2));
    }

    #[test]
    fn explicit_placement_wins() {
        let previous = vec![LayoutItem::new("a", 3, 0, 2, 2)];
        let children = [ItemDescriptor::new("a").with_grid(GridPlacement::new(0.0, 0.0, 4.0, 1.0))];
        let out = synchronize_layout_with_children(
            &previous,
            &children,
            12,
            CompactionMode::Vertical,
            false,
        )
        .unwrap();
        assert_eq!(pos(&out, "a"), (0, 0, 4, 1));
    }

    #[test]
    fn new_children_stack_at_bottom() {
        let previous = vec![LayoutItem::new("a", 0, 0, 2, 3)];
        let children = [
            ItemDescriptor::new("a"),
            ItemDescriptor::new("b"),
            ItemDescriptor::new("c"),
        ];
        let out = synchronize_layout_with_children(
            &previous,
            &children,
            12,
            CompactionMode::None,
            false,
        )
        .unwrap();
        assert_eq!(pos(&out, "b"), (0, 3, 1, 1));
        assert_eq!(pos(&out, "c"), (0, 4, 1, 1));
    }

    #[test]
    fn dropped_children_disappear() {
        let previous = vec![
            LayoutItem::new("a", 0, 0, 1, 1),
            LayoutItem::new("gone", 0, 1, 1, 1),
        ];
        let out = synchronize_layout_with_children(
            &previous,
            &[ItemDescriptor::new("a")],
            12,
            CompactionMode::Vertical,
            false,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn out_of_bounds_is_corrected_then_compacted() {
        let children = [ItemDescriptor::new("a").with_grid(GridPlacement::new(10.0, 5.0, 4.0, 1.0))];
        let out =
            synchronize_layout_with_children(&[], &children, 12, CompactionMode::Vertical, false)
                .unwrap();
        assert_eq!(pos(&out, "a"), (8, 0, 4, 1));

        let overlapping =
            synchronize_layout_with_children(&[], &children, 12, CompactionMode::Vertical, true)
                .unwrap();
        assert_eq!(pos(&overlapping, "a"), (8, 5, 4, 1));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let children = [ItemDescriptor::new("a"), ItemDescriptor::new("a")];
        let err =
            synchronize_layout_with_children(&[], &children, 12, CompactionMode::Vertical, false)
                .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateId { id: "a".to_string() });
    }

    #[test]
    fn nan_placement_is_rejected() {
        let children = [
            ItemDescriptor::new("a"),
            ItemDescriptor::new("b").with_grid(GridPlacement::new(f64::NAN, 0.0, 1.0, 1.0)),
        ];
        let err =
            synchronize_layout_with_children(&[], &children, 12, CompactionMode::Vertical, false)
                .unwrap_err();
        assert_eq!(
            err,
            LayoutError::NotNumeric {
                context: "synchronize_layout_with_children".to_string(),
                index: 1,
                field: "x",
            }
        );
    }
}
