#![forbid(unsafe_code)]

//! Grid layout engine: collision detection, compaction and cascading moves.
//!
//! Items live on an integer grid. The engine keeps them from overlapping as
//! they are dragged, resized, added or removed, and compacts them toward an
//! edge to close gaps. Every entry point consumes plain geometric data and
//! returns a fresh layout; the caller's slice is never mutated.
//!
//! # Usage
//!
//! ```
//! use gridlock_layout::{CompactionMode, LayoutItem, compact};
//!
//! let layout = vec![
//!     LayoutItem::new("a", 0, 0, 1, 1),
//!     LayoutItem::new("c", 0, 2, 1, 1),
//! ];
//! let compacted = compact(&layout, CompactionMode::Vertical, 12, false);
//! assert_eq!(compacted[1].y, 1);
//! ```

pub mod bounds;
pub mod collision;
pub mod compact;
pub mod coords;
pub mod debug;
pub mod engine;
pub mod error;
pub mod item;
pub mod movement;
pub mod order;
pub mod resize;
pub mod responsive;
pub mod sync;
pub mod validate;

pub use bounds::correct_bounds;
pub use collision::{all_collisions, bottom, collides, first_collision, get_layout_item, statics};
pub use compact::compact;
pub use coords::{GridParams, PositionOverride};
pub use debug::LayoutDebugger;
pub use engine::{EngineConfig, GridEngine};
pub use error::LayoutError;
pub use gridlock_core::geometry::{GridRect, PixelRect, Spacing};
pub use item::{LayoutItem, ResizeHandle};
pub use movement::{MoveOptions, move_element, move_element_traced};
pub use order::sort_for_compaction;
pub use resize::{ResizeOptions, resize_element, resize_item_in_direction};
pub use responsive::{
    Breakpoint, Breakpoints, Responsive, default_cols, find_or_generate_responsive_layout,
};
pub use sync::{GridPlacement, ItemDescriptor, synchronize_layout_with_children};
pub use validate::{parse_layout, validate_layout, validate_layout_json};

use serde::{Deserialize, Serialize};

/// Which edge items are pulled toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactionMode {
    /// Pull items up; traverse by row, then column.
    #[default]
    Vertical,
    /// Pull items left; traverse by column, then row.
    Horizontal,
    /// No automatic gap removal. Bounds correction still applies.
    None,
}

impl CompactionMode {
    /// The axis gaps are removed along, if any.
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Vertical => Some(Axis::Y),
            Self::Horizontal => Some(Axis::X),
            Self::None => None,
        }
    }

    /// Short label for display and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for CompactionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Columns.
    X,
    /// Rows.
    Y,
}

impl Axis {
    /// Leading coordinate of `item` on this axis.
    #[inline]
    pub fn start(self, item: &LayoutItem) -> i32 {
        match self {
            Self::X => item.x,
            Self::Y => item.y,
        }
    }

    /// Trailing (exclusive) edge of `item` on this axis.
    #[inline]
    pub fn end(self, item: &LayoutItem) -> i32 {
        match self {
            Self::X => item.right(),
            Self::Y => item.bottom(),
        }
    }

    /// Overwrite the leading coordinate of `item` on this axis.
    #[inline]
    pub fn set_start(self, item: &mut LayoutItem, value: i32) {
        match self {
            Self::X => item.x = value,
            Self::Y => item.y = value,
        }
    }
}
