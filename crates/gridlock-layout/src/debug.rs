#![forbid(unsafe_code)]

//! Move-cascade and compaction debugging utilities.
//!
//! Provides introspection into collision resolution:
//! - Recording of every displacement step in a move cascade
//! - Recording of compaction passes and which items they shifted
//! - Export of "who displaced whom" to Graphviz DOT format
//!
//! # Injection
//!
//! Nothing here is global. A [`LayoutDebugger`] is handed to the entry points
//! that accept one (or attached to a [`GridEngine`](crate::GridEngine)), and
//! recording is a no-op until it is explicitly enabled.
//!
//! # Usage
//!
//! ```
//! use gridlock_layout::{LayoutDebugger, LayoutItem, MoveOptions, move_element_traced};
//!
//! let debugger = LayoutDebugger::new();
//! debugger.set_enabled(true);
//!
//! let layout = vec![LayoutItem::new("a", 0, 0, 1, 1), LayoutItem::new("b", 0, 1, 1, 1)];
//! let _ = move_element_traced(&layout, "a", None, Some(1), MoveOptions::default(), Some(&debugger));
//!
//! for record in debugger.snapshot() {
//!     println!("{}", record.summary());
//! }
//! ```

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::CompactionMode;

/// Why an item changed position during a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeReason {
    /// The externally requested move.
    Requested,
    /// Slotted into free space before the item it collided with.
    SlotBefore,
    /// Pushed to one row below the item it collided with.
    BelowStationary,
    /// Nudged one unit along the compaction axis.
    Nudge,
    /// Moved past the far edge of a static item in one step.
    PastStatic,
    /// The mover took the displaced item's column (horizontal mode).
    WestSwap,
    /// Placed directly under the mover with compaction disabled.
    BelowMover,
}

impl CascadeReason {
    const fn label(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::SlotBefore => "slot-before",
            Self::BelowStationary => "below-stationary",
            Self::Nudge => "nudge",
            Self::PastStatic => "past-static",
            Self::WestSwap => "west-swap",
            Self::BelowMover => "below-mover",
        }
    }
}

/// How a move resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Guarded out: static, unknown target, or no change.
    Unchanged,
    /// A collision was prevented and the item reverted.
    Reverted,
    /// Overlap was allowed; nothing else moved.
    Overlapped,
    /// Collisions (if any) were resolved by displacement.
    Resolved,
}

/// One position change inside a cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// Recursion depth; the requested move is depth 0.
    pub depth: usize,
    /// Item that moved.
    pub id: String,
    /// Item whose collision caused the move, if any.
    pub displaced_by: Option<String>,
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub reason: CascadeReason,
}

/// A record of a single externally triggered move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Item the move was requested for.
    pub id: String,
    /// Requested target `(x, y)`; `None` keeps the current coordinate.
    pub target: (Option<i32>, Option<i32>),
    pub mode: CompactionMode,
    pub outcome: MoveOutcome,
    /// Every position change, in the order it happened.
    pub steps: Vec<CascadeStep>,
}

impl MoveRecord {
    /// Create an empty record for a move request.
    pub fn new(id: impl Into<String>, target: (Option<i32>, Option<i32>), mode: CompactionMode) -> Self {
        Self {
            id: id.into(),
            target,
            mode,
            outcome: MoveOutcome::Unchanged,
            steps: Vec::new(),
        }
    }

    /// Deepest recursion level reached.
    pub fn max_depth(&self) -> usize {
        self.steps.iter().map(|s| s.depth).max().unwrap_or(0)
    }

    /// Ids of items other than the requested one that moved, first move first.
    pub fn displaced_ids(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for step in &self.steps {
            if step.id != self.id && !seen.contains(&step.id.as_str()) {
                seen.push(&step.id);
            }
        }
        seen
    }

    /// Generate a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        let fmt_coord = |c: Option<i32>| c.map_or_else(|| "_".to_string(), |v| v.to_string());
        let _ = writeln!(
            s,
            "move {} -> ({}, {}) [{}]: {:?}",
            self.id,
            fmt_coord(self.target.0),
            fmt_coord(self.target.1),
            self.mode,
            self.outcome
        );
        for step in &self.steps {
            let indent = "  ".repeat(step.depth + 1);
            let _ = write!(
                s,
                "{indent}{} ({},{}) -> ({},{}) {}",
                step.id,
                step.from.0,
                step.from.1,
                step.to.0,
                step.to.1,
                step.reason.label()
            );
            if let Some(by) = &step.displaced_by {
                let _ = write!(s, " by {by}");
            }
            let _ = writeln!(s);
        }
        s
    }
}

/// A record of one compaction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionRecord {
    pub mode: CompactionMode,
    pub cols: i32,
    pub item_count: usize,
    /// Items whose position differs from the input, in input order.
    pub shifted: Vec<(String, (i32, i32), (i32, i32))>,
}

/// Layout cascade debugger.
///
/// Collects move and compaction records for introspection. Thread-safe via
/// internal synchronization; can be shared across the application.
#[derive(Debug)]
pub struct LayoutDebugger {
    enabled: AtomicBool,
    moves: Mutex<Vec<MoveRecord>>,
    compactions: Mutex<Vec<CompactionRecord>>,
}

impl LayoutDebugger {
    /// Create a new debugger wrapped in Arc (disabled by default).
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            enabled: AtomicBool::new(false),
            moves: Mutex::new(Vec::new()),
            compactions: Mutex::new(Vec::new()),
        })
    }

    /// Check if recording is enabled.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable recording.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Toggle recording on/off.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    /// Clear all recorded data.
    pub fn clear(&self) {
        if let Ok(mut moves) = self.moves.lock() {
            moves.clear();
        }
        if let Ok(mut compactions) = self.compactions.lock() {
            compactions.clear();
        }
    }

    /// Record a move cascade.
    pub fn record_move(&self, record: MoveRecord) {
        if !self.enabled() {
            return;
        }
        if let Ok(mut moves) = self.moves.lock() {
            moves.push(record);
        }
    }

    /// Record a compaction pass.
    pub fn record_compaction(&self, record: CompactionRecord) {
        if !self.enabled() {
            return;
        }
        if let Ok(mut compactions) = self.compactions.lock() {
            compactions.push(record);
        }
    }

    /// Get a snapshot of all move records.
    pub fn snapshot(&self) -> Vec<MoveRecord> {
        self.moves
            .lock()
            .ok()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Get a snapshot of all compaction records.
    pub fn snapshot_compactions(&self) -> Vec<CompactionRecord> {
        self.compactions
            .lock()
            .ok()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Moves that ended with a prevented collision.
    pub fn reverted(&self) -> Vec<MoveRecord> {
        self.snapshot()
            .into_iter()
            .filter(|r| r.outcome == MoveOutcome::Reverted)
            .collect()
    }

    /// Generate a summary report of everything recorded.
    pub fn report(&self) -> String {
        let moves = self.snapshot();
        let compactions = self.snapshot_compactions();

        let mut s = String::new();
        let _ = writeln!(
            s,
            "=== Layout Debug Report ({} moves, {} compactions) ===",
            moves.len(),
            compactions.len()
        );

        let reverted: Vec<_> = moves
            .iter()
            .filter(|r| r.outcome == MoveOutcome::Reverted)
            .collect();
        if !reverted.is_empty() {
            let _ = writeln!(s, "\n{} moves were REVERTED:", reverted.len());
            for r in &reverted {
                let _ = writeln!(s, "  - {}", r.id);
            }
        }

        let _ = writeln!(s, "\n--- Moves ---");
        for record in &moves {
            let _ = write!(s, "\n{}", record.summary());
        }

        if !compactions.is_empty() {
            let _ = writeln!(s, "\n--- Compactions ---");
            for record in &compactions {
                let _ = writeln!(
                    s,
                    "\n{} x{} cols, {} items, {} shifted",
                    record.mode,
                    record.cols,
                    record.item_count,
                    record.shifted.len()
                );
                for (id, from, to) in &record.shifted {
                    let _ = writeln!(s, "  {id} ({},{}) -> ({},{})", from.0, from.1, to.0, to.1);
                }
            }
        }

        s
    }

    /// Export displacement edges to Graphviz DOT format.
    ///
    /// Each moved item becomes a node; an edge `a -> b` means `a`'s collision
    /// displaced `b`.
    pub fn export_dot(&self) -> String {
        let moves = self.snapshot();

        let mut s = String::new();
        let _ = writeln!(s, "digraph LayoutCascade {{");
        let _ = writeln!(s, "  rankdir=LR;");
        let _ = writeln!(s, "  node [shape=box];");

        for (i, record) in moves.iter().enumerate() {
            let color = match record.outcome {
                MoveOutcome::Reverted => "red",
                MoveOutcome::Overlapped => "yellow",
                MoveOutcome::Resolved | MoveOutcome::Unchanged => "green",
            };

            // Node names are positional; ids only appear in quoted labels.
            let mut nodes: Vec<&str> = vec![record.id.as_str()];
            for step in &record.steps {
                for id in std::iter::once(step.id.as_str()).chain(step.displaced_by.as_deref()) {
                    if !nodes.contains(&id) {
                        nodes.push(id);
                    }
                }
            }
            let node = |id: &str| nodes.iter().position(|n| *n == id).unwrap_or(0);

            for (k, id) in nodes.iter().enumerate() {
                let color = if k == 0 { color } else { "gray" };
                let _ = writeln!(
                    s,
                    "  m{i}n{k} [label=\"{}\", color=\"{color}\"];",
                    escape_label(id)
                );
            }
            for step in &record.steps {
                if let Some(by) = &step.displaced_by {
                    let _ = writeln!(s, "  m{i}n{} -> m{i}n{};", node(by), node(&step.id));
                }
            }
        }

        let _ = writeln!(s, "}}");
        s
    }
}

fn escape_label(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(depth: usize, id: &str, by: Option<&str>, reason: CascadeReason) -> CascadeStep {
        CascadeStep {
            depth,
            id: id.to_string(),
            displaced_by: by.map(str::to_string),
            from: (0, 0),
            to: (0, 1),
            reason,
        }
    }

    fn sample_record() -> MoveRecord {
        let mut record = MoveRecord::new("a", (None, Some(0)), CompactionMode::Vertical);
        record.outcome = MoveOutcome::Resolved;
        record.steps = vec![
            step(0, "a", None, CascadeReason::Requested),
            step(1, "b", Some("a"), CascadeReason::SlotBefore),
            step(2, "c", Some("b"), CascadeReason::Nudge),
            step(3, "b", Some("c"), CascadeReason::Nudge),
        ];
        record
    }

    #[test]
    fn record_depth_and_displaced() {
        let record = sample_record();
        assert_eq!(record.max_depth(), 3);
        assert_eq!(record.displaced_ids(), ["b", "c"]);
    }

    #[test]
    fn record_summary() {
        let summary = sample_record().summary();
        assert!(summary.contains("move a -> (_, 0) [vertical]"));
        assert!(summary.contains("slot-before by a"));
        assert!(summary.contains("nudge by b"));
    }

    #[test]
    fn debugger_disabled_by_default() {
        let debugger = LayoutDebugger::new();
        assert!(!debugger.enabled());
        debugger.record_move(sample_record());
        assert!(debugger.snapshot().is_empty());
    }

    #[test]
    fn debugger_toggle() {
        let debugger = LayoutDebugger::new();
        assert!(debugger.toggle());
        assert!(debugger.enabled());
        assert!(!debugger.toggle());
        assert!(!debugger.enabled());
    }

    #[test]
    fn debugger_records_and_clears() {
        let debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        debugger.record_move(sample_record());
        debugger.record_compaction(CompactionRecord {
            mode: CompactionMode::Vertical,
            cols: 12,
            item_count: 3,
            shifted: vec![("c".to_string(), (0, 2), (0, 1))],
        });
        assert_eq!(debugger.snapshot().len(), 1);
        assert_eq!(debugger.snapshot_compactions().len(), 1);

        debugger.clear();
        assert!(debugger.snapshot().is_empty());
        assert!(debugger.snapshot_compactions().is_empty());
    }

    #[test]
    fn debugger_report_lists_reverted() {
        let debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        let mut reverted = MoveRecord::new("blocked", (Some(1), None), CompactionMode::None);
        reverted.outcome = MoveOutcome::Reverted;
        debugger.record_move(reverted);
        debugger.record_move(sample_record());

        assert_eq!(debugger.reverted().len(), 1);
        let report = debugger.report();
        assert!(report.contains("Layout Debug Report (2 moves, 0 compactions)"));
        assert!(report.contains("1 moves were REVERTED"));
        assert!(report.contains("  - blocked"));
    }

    #[test]
    fn debugger_export_dot_edges() {
        let debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        debugger.record_move(sample_record());

        let dot = debugger.export_dot();
        assert!(dot.contains("digraph LayoutCascade"));
        assert!(dot.contains("m0n0 [label=\"a\", color=\"green\"];"));
        assert!(dot.contains("m0n0 -> m0n1;"));
        assert!(dot.contains("m0n1 -> m0n2;"));
        assert!(dot.contains("m0n2 -> m0n1;"));
    }

    #[test]
    fn debugger_export_dot_quotes_ids() {
        let debugger = LayoutDebugger::new();
        debugger.set_enabled(true);
        let mut record = MoveRecord::new("item-1", (None, Some(0)), CompactionMode::Vertical);
        record.outcome = MoveOutcome::Resolved;
        record.steps = vec![
            step(0, "item-1", None, CascadeReason::Requested),
            step(1, "item 2", Some("item-1"), CascadeReason::SlotBefore),
            step(2, "say \"hi\"", Some("item 2"), CascadeReason::Nudge),
        ];
        debugger.record_move(record);

        let dot = debugger.export_dot();
        assert!(dot.contains("m0n0 [label=\"item-1\""));
        assert!(dot.contains("m0n1 [label=\"item 2\""));
        assert!(dot.contains("m0n2 [label=\"say \\\"hi\\\"\""));
        assert!(dot.contains("m0n0 -> m0n1;"));
        assert!(dot.contains("m0n1 -> m0n2;"));
        for line in dot.lines().filter(|l| l.contains(" -> ")) {
            let edge = line.trim().trim_end_matches(';');
            for name in edge.split(" -> ") {
                assert!(name.chars().all(|c| c.is_ascii_alphanumeric()), "{line}");
            }
        }
    }
}
