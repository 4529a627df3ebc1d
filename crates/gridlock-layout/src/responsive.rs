#![forbid(unsafe_code)]

//! Breakpoint-aware layouts.
//!
//! [`Responsive<T>`] maps [`Breakpoint`] tiers to values of any type,
//! with inheritance from smaller breakpoints. If no value is set for a
//! given breakpoint, the value from the next smaller breakpoint is used.
//!
//! # Usage
//!
//! ```
//! use gridlock_layout::{Breakpoint, Responsive};
//!
//! let cols = Responsive::new(2)      // xxs: 2
//!     .at(Breakpoint::Sm, 6)         // sm: 6
//!     .at(Breakpoint::Lg, 12);       // lg: 12
//!
//! // xs inherits from xxs, md inherits from sm
//! assert_eq!(cols.resolve(Breakpoint::Xs), &2);
//! assert_eq!(cols.resolve(Breakpoint::Md), &6);
//! ```
//!
//! # Invariants
//!
//! 1. `Xxs` always has a value (set via `new()`).
//! 2. A missing tier inherits from the nearest smaller tier that has a value.
//! 3. `resolve()` never fails.

use std::collections::BTreeMap;

use gridlock_core::debug;
use serde::{Deserialize, Serialize};

use crate::CompactionMode;
use crate::bounds::correct_bounds;
use crate::compact::compact;
use crate::item::LayoutItem;

/// Responsive tier, ordered from narrowest to widest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
}

impl Breakpoint {
    /// All breakpoints in ascending order.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Xxs,
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
    ];

    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Breakpoint::Xxs => "xxs",
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Breakpoint thresholds in container pixels.
///
/// A width belongs to the largest tier whose threshold it strictly exceeds.
/// `Xxs` implicitly starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub xs: f64,
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
}

impl Breakpoints {
    /// Default thresholds: 480 / 768 / 996 / 1200 px.
    pub const DEFAULT: Self = Self {
        xs: 480.0,
        sm: 768.0,
        md: 996.0,
        lg: 1200.0,
    };

    /// Classify a container width.
    #[must_use]
    pub fn for_width(&self, width: f64) -> Breakpoint {
        Breakpoint::ALL
            .into_iter()
            .rev()
            .find(|&bp| self.threshold(bp) < width)
            .unwrap_or(Breakpoint::Xxs)
    }

    /// Minimum width for a breakpoint.
    #[must_use]
    pub const fn threshold(&self, bp: Breakpoint) -> f64 {
        match bp {
            Breakpoint::Xxs => 0.0,
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A breakpoint-aware value with inheritance from smaller tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responsive<T> {
    /// Value at `Xxs`.
    base: T,
    /// Overrides for `Xs` through `Lg`.
    overrides: [Option<T>; 4],
}

impl<T: Clone> Responsive<T> {
    /// Create a responsive value with a base value for `Xxs`.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            base,
            overrides: [None, None, None, None],
        }
    }

    /// Set the value for a specific breakpoint (builder pattern).
    #[must_use]
    pub fn at(mut self, bp: Breakpoint, value: T) -> Self {
        self.set(bp, value);
        self
    }

    /// Set the value for a specific breakpoint (mutating).
    pub fn set(&mut self, bp: Breakpoint, value: T) {
        match slot(bp) {
            Some(i) => self.overrides[i] = Some(value),
            None => self.base = value,
        }
    }

    /// Resolve the value for a given breakpoint.
    #[must_use]
    pub fn resolve(&self, bp: Breakpoint) -> &T {
        let Some(top) = slot(bp) else {
            return &self.base;
        };
        self.overrides[..=top]
            .iter()
            .rev()
            .find_map(Option::as_ref)
            .unwrap_or(&self.base)
    }
}

fn slot(bp: Breakpoint) -> Option<usize> {
    match bp {
        Breakpoint::Xxs => None,
        Breakpoint::Xs => Some(0),
        Breakpoint::Sm => Some(1),
        Breakpoint::Md => Some(2),
        Breakpoint::Lg => Some(3),
    }
}

/// Default column counts: 2 / 4 / 6 / 10 / 12.
#[must_use]
pub fn default_cols() -> Responsive<i32> {
    Responsive::new(2)
        .at(Breakpoint::Xs, 4)
        .at(Breakpoint::Sm, 6)
        .at(Breakpoint::Md, 10)
        .at(Breakpoint::Lg, 12)
}

/// Layout to show at `bp`.
///
/// Returns the stored layout for `bp` when there is one. Otherwise starts
/// from the nearest stored layout at a wider tier, then the layout for
/// `last_bp`, then nothing, and fits it to the tier's column count.
pub fn find_or_generate_responsive_layout(
    layouts: &BTreeMap<Breakpoint, Vec<LayoutItem>>,
    bp: Breakpoint,
    last_bp: Breakpoint,
    cols: &Responsive<i32>,
    mode: CompactionMode,
) -> Vec<LayoutItem> {
    if let Some(layout) = layouts.get(&bp) {
        return layout.clone();
    }

    let source = layouts
        .range(bp..)
        .next()
        .map(|(_, layout)| layout)
        .or_else(|| layouts.get(&last_bp));
    let tier_cols = *cols.resolve(bp);

    debug!(
        breakpoint = %bp,
        cols = tier_cols,
        source_items = source.map_or(0, Vec::len),
        "generating responsive layout"
    );

    let corrected = correct_bounds(source.map_or(&[][..], Vec::as_slice), tier_cols);
    compact(&corrected, mode, tier_cols, false)
}
