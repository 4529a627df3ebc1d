#![forbid(unsafe_code)]

//! Engine configuration and the interaction cycle.
//!
//! A [`GridEngine`] owns the grid-wide settings and turns one interaction
//! (drag, resize, add, remove) into a settled layout: clone, mutate once, then
//! resolve collisions and compact.
//!
//! # Usage
//!
//! ```
//! use gridlock_layout::{EngineConfig, GridEngine, LayoutItem};
//!
//! let engine = GridEngine::new(EngineConfig::default());
//! let layout = vec![
//!     LayoutItem::new("a", 0, 0, 2, 1),
//!     LayoutItem::new("b", 0, 1, 2, 1),
//! ];
//! let layout = engine.remove_item(&layout, "a").unwrap();
//! assert_eq!((layout[0].x, layout[0].y), (0, 0));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use gridlock_core::geometry::PixelRect;
use gridlock_core::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::CompactionMode;
use crate::bounds::correct_bounds;
use crate::collision::{get_layout_item, index_of};
use crate::compact::compact_traced;
use crate::coords::{
    GridParams, PositionOverride, bounded_drag_position, grid_position_to_pixels,
    pixels_to_grid_position, pixels_to_grid_size,
};
use crate::debug::LayoutDebugger;
use crate::error::LayoutError;
use crate::item::{LayoutItem, ResizeHandle};
use crate::movement::{MoveOptions, move_element_traced};
use crate::resize::{ResizeOptions, resize_element};
use crate::sync::{ItemDescriptor, synchronize_layout_with_children};

/// Grid-wide settings.
///
/// Per-item flags left as `None` fall back to the defaults here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(flatten)]
    pub grid: GridParams,
    pub compact_type: CompactionMode,
    /// Let items overlap; disables compaction and displacement.
    pub allow_overlap: bool,
    /// Refuse colliding moves instead of displacing other items.
    pub prevent_collision: bool,
    pub is_draggable: bool,
    pub is_resizable: bool,
    /// Keep dragged items inside the container.
    pub is_bounded: bool,
    pub resize_handles: Vec<ResizeHandle>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridParams::default(),
            compact_type: CompactionMode::Vertical,
            allow_overlap: false,
            prevent_collision: false,
            is_draggable: true,
            is_resizable: true,
            is_bounded: false,
            resize_handles: vec![ResizeHandle::Se],
        }
    }
}

/// Runs the interaction cycle against an [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct GridEngine {
    config: EngineConfig,
    debugger: Option<Arc<LayoutDebugger>>,
}

impl GridEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            debugger: None,
        }
    }

    /// Record cascades and compactions to `debugger`.
    #[must_use]
    pub fn with_debugger(mut self, debugger: Arc<LayoutDebugger>) -> Self {
        self.debugger = Some(debugger);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn debugger(&self) -> Option<&Arc<LayoutDebugger>> {
        self.debugger.as_ref()
    }

    fn cols(&self) -> i32 {
        self.config.grid.cols
    }

    fn mode(&self) -> CompactionMode {
        self.config.compact_type
    }

    /// Whether `item` can be dragged. Static items default to no.
    pub fn can_drag(&self, item: &LayoutItem) -> bool {
        item.is_draggable
            .unwrap_or(!item.is_static && self.config.is_draggable)
    }

    /// Whether `item` can be resized. Static items default to no.
    pub fn can_resize(&self, item: &LayoutItem) -> bool {
        item.is_resizable
            .unwrap_or(!item.is_static && self.config.is_resizable)
    }

    /// Whether a drag of `item` is kept inside the container.
    pub fn is_bounded(&self, item: &LayoutItem) -> bool {
        self.can_drag(item) && item.is_bounded.unwrap_or(self.config.is_bounded)
    }

    /// Handles enabled on `item`.
    pub fn handles_for<'a>(&'a self, item: &'a LayoutItem) -> &'a [ResizeHandle] {
        item.resize_handles
            .as_deref()
            .unwrap_or(&self.config.resize_handles)
    }

    /// Compact with the configured mode; a no-op clone when overlap is allowed.
    pub fn compact(&self, layout: &[LayoutItem]) -> Vec<LayoutItem> {
        if self.config.allow_overlap {
            return layout.to_vec();
        }
        compact_traced(layout, self.mode(), self.cols(), false, self.debugger.as_deref())
    }

    fn move_options(&self) -> MoveOptions {
        MoveOptions {
            is_user_action: true,
            prevent_collision: self.config.prevent_collision,
            mode: self.mode(),
            cols: self.cols(),
            allow_overlap: self.config.allow_overlap,
        }
    }

    fn find<'a>(&self, layout: &'a [LayoutItem], id: &str) -> Result<&'a LayoutItem, LayoutError> {
        get_layout_item(layout, id).ok_or_else(|| LayoutError::UnknownItem { id: id.to_string() })
    }

    /// One drag step: move `id` to `(x, y)` and settle the layout.
    ///
    /// Returns the input borrowed when the item cannot be dragged or the move
    /// changed nothing.
    pub fn drag<'a>(
        &self,
        layout: &'a [LayoutItem],
        id: &str,
        x: i32,
        y: i32,
    ) -> Result<Cow<'a, [LayoutItem]>, LayoutError> {
        let item = self.find(layout, id)?;
        if !self.can_drag(item) {
            debug!(id, "drag refused, item not draggable");
            return Ok(Cow::Borrowed(layout));
        }
        let moved = move_element_traced(
            layout,
            id,
            Some(x),
            Some(y),
            self.move_options(),
            self.debugger.as_deref(),
        )?;
        match moved {
            Cow::Borrowed(_) => Ok(moved),
            Cow::Owned(items) => Ok(Cow::Owned(self.compact(&items))),
        }
    }

    /// End of a drag: move `id` to `(x, y)`, then compact.
    pub fn drag_stop(
        &self,
        layout: &[LayoutItem],
        id: &str,
        x: i32,
        y: i32,
    ) -> Result<Vec<LayoutItem>, LayoutError> {
        let item = self.find(layout, id)?;
        if !self.can_drag(item) {
            return Ok(self.compact(layout));
        }
        let moved = move_element_traced(
            layout,
            id,
            Some(x),
            Some(y),
            self.move_options(),
            self.debugger.as_deref(),
        )?;
        Ok(self.compact(&moved))
    }

    /// Resize `id` to `w × h` through `handle`.
    ///
    /// Returns the input borrowed when the item is not resizable or `handle`
    /// is not enabled on it.
    pub fn resize<'a>(
        &self,
        layout: &'a [LayoutItem],
        id: &str,
        w: i32,
        h: i32,
        handle: ResizeHandle,
    ) -> Result<Cow<'a, [LayoutItem]>, LayoutError> {
        let item = self.find(layout, id)?;
        if !self.can_resize(item) || !self.handles_for(item).contains(&handle) {
            debug!(id, handle = %handle, "resize refused");
            return Ok(Cow::Borrowed(layout));
        }
        let options = ResizeOptions {
            mode: self.mode(),
            cols: self.cols(),
            prevent_collision: self.config.prevent_collision,
            allow_overlap: self.config.allow_overlap,
        };
        resize_element(layout, id, w, h, handle, options).map(Cow::Owned)
    }

    /// Add an item, fitting it to the grid.
    pub fn add_item(
        &self,
        layout: &[LayoutItem],
        item: LayoutItem,
    ) -> Result<Vec<LayoutItem>, LayoutError> {
        if index_of(layout, &item.id).is_some() {
            return Err(LayoutError::DuplicateId { id: item.id });
        }
        let mut items = layout.to_vec();
        items.push(item);
        let corrected = correct_bounds(&items, self.cols());
        Ok(self.compact(&corrected))
    }

    /// Remove an item and close the gap it leaves.
    pub fn remove_item(&self, layout: &[LayoutItem], id: &str) -> Result<Vec<LayoutItem>, LayoutError> {
        let idx = index_of(layout, id).ok_or_else(|| LayoutError::UnknownItem { id: id.to_string() })?;
        let mut items = layout.to_vec();
        items.remove(idx);
        Ok(self.compact(&items))
    }

    /// Rebuild the layout for the current children.
    pub fn synchronize(
        &self,
        previous: &[LayoutItem],
        children: &[ItemDescriptor],
    ) -> Result<Vec<LayoutItem>, LayoutError> {
        synchronize_layout_with_children(
            previous,
            children,
            self.cols(),
            self.mode(),
            self.config.allow_overlap,
        )
    }

    /// Pixel rectangle for `item`, honoring an in-flight interaction.
    pub fn item_pixels(&self, item: &LayoutItem, active: Option<&PositionOverride>) -> PixelRect {
        grid_position_to_pixels(&self.config.grid, item.x, item.y, item.w, item.h, active)
    }

    /// Grid position for a dragged item's pixel top/left.
    ///
    /// Bounded items are first clamped inside the container when its height
    /// is known.
    pub fn position_from_pixels(
        &self,
        item: &LayoutItem,
        top: f64,
        left: f64,
        container_height: Option<f64>,
    ) -> (i32, i32) {
        let (top, left) = match container_height {
            Some(height) if self.is_bounded(item) => {
                bounded_drag_position(&self.config.grid, top, left, item.w, item.h, height)
            }
            _ => (top, left),
        };
        pixels_to_grid_position(&self.config.grid, top, left, item.w, item.h)
    }

    /// Grid size for a resized item's pixel size, within its constraints.
    pub fn size_from_pixels(
        &self,
        item: &LayoutItem,
        width: f64,
        height: f64,
        handle: ResizeHandle,
    ) -> (i32, i32) {
        let (w, h) = pixels_to_grid_size(&self.config.grid, width, height, item.x, item.y, handle);
        let (cw, ch) = item.constrain_size(w, h);
        if (cw, ch) != (w, h) {
            warn!(id = %item.id, w, h, cw, ch, "resize clamped by item constraints");
        }
        (cw, ch)
    }
}
