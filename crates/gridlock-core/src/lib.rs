#![forbid(unsafe_code)]

//! Core: geometric primitives and the logging facade.
//!
//! # Role in gridlock
//! `gridlock-core` owns the two coordinate spaces the layout engine converts
//! between: integer grid rectangles and fractional pixel rectangles. It also
//! owns the logging facade so the engine can emit structured events without
//! forcing `tracing` on every consumer.
//!
//! # How it fits in the system
//! `gridlock-layout` builds collision detection, compaction and the move
//! engine on [`geometry::GridRect`], and hands [`geometry::PixelRect`] values to
//! whatever renders the grid.

pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};

pub use geometry::{GridRect, PixelRect, Spacing};
