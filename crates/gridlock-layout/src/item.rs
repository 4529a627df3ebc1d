//! Layout items and resize handles.

use gridlock_core::geometry::GridRect;
use serde::{Deserialize, Serialize};

/// Resize handle classification for any-edge / any-corner resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// The handle moves the left edge.
    #[must_use]
    pub const fn is_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// The handle moves the top edge.
    #[must_use]
    pub const fn is_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Short label, as used in serialized layouts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One rectangle on the grid.
///
/// `None` in the optional flags means "inherit the engine default".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    /// Unique within a layout.
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<i32>,
    /// Never repositioned by compaction or displacement.
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
    /// Set while a single move cascade displaces this item.
    #[serde(skip)]
    pub moved: bool,
}

impl LayoutItem {
    /// Create a plain, non-static item.
    pub fn new(id: impl Into<String>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            max_w: None,
            min_h: None,
            max_h: None,
            is_static: false,
            is_draggable: None,
            is_resizable: None,
            is_bounded: None,
            resize_handles: None,
            moved: false,
        }
    }

    /// Create a static item.
    pub fn fixed(id: impl Into<String>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(id, x, y, w, h).with_static(true)
    }

    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = Some(draggable);
        self
    }

    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.is_resizable = Some(resizable);
        self
    }

    #[must_use]
    pub fn with_bounded(mut self, bounded: bool) -> Self {
        self.is_bounded = Some(bounded);
        self
    }

    /// Set minimum width and height.
    #[must_use]
    pub fn with_min_size(mut self, w: i32, h: i32) -> Self {
        self.min_w = Some(w);
        self.min_h = Some(h);
        self
    }

    /// Set maximum width and height.
    #[must_use]
    pub fn with_max_size(mut self, w: i32, h: i32) -> Self {
        self.max_w = Some(w);
        self.max_h = Some(h);
        self
    }

    #[must_use]
    pub fn with_resize_handles(mut self, handles: impl IntoIterator<Item = ResizeHandle>) -> Self {
        self.resize_handles = Some(handles.into_iter().collect());
        self
    }

    /// Grid rectangle occupied by the item.
    #[inline]
    pub fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.rect().right()
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.rect().bottom()
    }

    /// Clamp a proposed size to the item's min/max constraints.
    ///
    /// Maximums are applied first, so a contradictory `min > max` pair
    /// resolves to the minimum.
    #[must_use]
    pub fn constrain_size(&self, w: i32, h: i32) -> (i32, i32) {
        let mut w = w;
        let mut h = h;
        if let Some(max_w) = self.max_w {
            w = w.min(max_w);
        }
        if let Some(max_h) = self.max_h {
            h = h.min(max_h);
        }
        if let Some(min_w) = self.min_w {
            w = w.max(min_w);
        }
        if let Some(min_h) = self.min_h {
            h = h.max(min_h);
        }
        (w.max(0), h.max(0))
    }
}
