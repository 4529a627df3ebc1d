//! Cascading moves.
//!
//! Moving one item can displace the items it lands on, which can displace
//! others in turn. The cascade runs on an owned, index-addressed copy of the
//! layout. Each item is marked `moved` the first time the cascade touches it,
//! and marked items are never displaced again within the same move, which
//! bounds the recursion.

use std::borrow::Cow;

use gridlock_core::geometry::GridRect;
use gridlock_core::{debug, trace};

use crate::collision::{collides, index_of};
use crate::debug::{CascadeReason, CascadeStep, LayoutDebugger, MoveOutcome, MoveRecord};
use crate::error::LayoutError;
use crate::item::LayoutItem;
use crate::order::{compaction_order, sort_row_col};
use crate::CompactionMode;

/// Parameters for [`move_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOptions {
    /// The move comes straight from the user (drag), not from a cascade.
    ///
    /// Enables the "slot in before the collider" probe for the first level of
    /// displacement.
    pub is_user_action: bool,
    /// Refuse moves that would collide instead of displacing anything.
    pub prevent_collision: bool,
    pub mode: CompactionMode,
    pub cols: i32,
    /// Accept overlaps; nothing else is moved.
    pub allow_overlap: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            is_user_action: false,
            prevent_collision: false,
            mode: CompactionMode::Vertical,
            cols: 12,
            allow_overlap: false,
        }
    }
}

impl MoveOptions {
    /// Options for a direct user drag.
    #[must_use]
    pub fn user(mode: CompactionMode, cols: i32) -> Self {
        Self {
            is_user_action: true,
            mode,
            cols,
            ..Self::default()
        }
    }
}

/// Move the item `id` to `(x, y)` and resolve the collisions it causes.
///
/// `None` keeps the current coordinate on that axis. The input layout is
/// returned borrowed when nothing changes: the item is static and not
/// explicitly draggable, the target is the current position, or
/// `prevent_collision` refused a colliding move.
pub fn move_element<'a>(
    layout: &'a [LayoutItem],
    id: &str,
    x: Option<i32>,
    y: Option<i32>,
    options: MoveOptions,
) -> Result<Cow<'a, [LayoutItem]>, LayoutError> {
    move_element_traced(layout, id, x, y, options, None)
}

/// [`move_element`], recording the cascade to `debugger` when it is enabled.
pub fn move_element_traced<'a>(
    layout: &'a [LayoutItem],
    id: &str,
    x: Option<i32>,
    y: Option<i32>,
    options: MoveOptions,
    debugger: Option<&LayoutDebugger>,
) -> Result<Cow<'a, [LayoutItem]>, LayoutError> {
    let idx = index_of(layout, id).ok_or_else(|| LayoutError::UnknownItem { id: id.to_string() })?;

    let recording = debugger.is_some_and(LayoutDebugger::enabled);
    let mut record = recording.then(|| MoveRecord::new(id, (x, y), options.mode));

    let item = &layout[idx];
    let pinned = item.is_static && item.is_draggable != Some(true);
    let in_place = x.is_none_or(|x| x == item.x) && y.is_none_or(|y| y == item.y);
    if pinned || in_place {
        trace!(id, pinned, "move skipped");
        if let (Some(debugger), Some(record)) = (debugger, record) {
            debugger.record_move(record);
        }
        return Ok(Cow::Borrowed(layout));
    }

    let mut cascade = Cascade {
        items: layout.to_vec(),
        mode: options.mode,
        resort: false,
        record: record.as_mut(),
    };
    for item in &mut cascade.items {
        item.moved = false;
    }

    let request = Request {
        user: options.is_user_action,
        prevent_collision: options.prevent_collision,
        allow_overlap: options.allow_overlap,
    };
    let outcome = cascade.move_item(idx, x, y, request, None, 0);
    let resort = cascade.resort;
    let mut items = cascade.items;

    debug!(
        id,
        mode = %options.mode,
        cols = options.cols,
        outcome = ?outcome,
        "move resolved"
    );

    if let (Some(debugger), Some(mut record)) = (debugger, record) {
        record.outcome = outcome;
        debugger.record_move(record);
    }

    if outcome == MoveOutcome::Reverted {
        return Ok(Cow::Borrowed(layout));
    }

    for item in &mut items {
        item.moved = false;
    }
    if resort {
        sort_row_col(&mut items);
    }
    Ok(Cow::Owned(items))
}

/// Flags for one `move_item` call. Cascaded calls use [`Request::CASCADE`].
#[derive(Debug, Clone, Copy)]
struct Request {
    user: bool,
    prevent_collision: bool,
    allow_overlap: bool,
}

impl Request {
    const CASCADE: Self = Self {
        user: false,
        prevent_collision: false,
        allow_overlap: false,
    };
}

/// Working state of one externally triggered move.
struct Cascade<'r> {
    items: Vec<LayoutItem>,
    mode: CompactionMode,
    /// A `None`-mode branch reordered items; sort row-major at the end.
    resort: bool,
    record: Option<&'r mut MoveRecord>,
}

impl Cascade<'_> {
    fn move_item(
        &mut self,
        idx: usize,
        x: Option<i32>,
        y: Option<i32>,
        request: Request,
        cause: Option<(usize, CascadeReason)>,
        depth: usize,
    ) -> MoveOutcome {
        let item = &self.items[idx];
        if item.is_static && item.is_draggable != Some(true) {
            return MoveOutcome::Unchanged;
        }
        let (old_x, old_y) = (item.x, item.y);
        let (new_x, new_y) = (x.unwrap_or(old_x), y.unwrap_or(old_y));
        if (new_x, new_y) == (old_x, old_y) {
            return MoveOutcome::Unchanged;
        }

        let item = &mut self.items[idx];
        item.x = new_x;
        item.y = new_y;
        item.moved = true;

        let toward_origin = match self.mode {
            CompactionMode::Vertical => y.is_some() && new_y <= old_y,
            CompactionMode::Horizontal => x.is_some() && new_x <= old_x,
            CompactionMode::None => false,
        };
        let mut order = compaction_order(&self.items, self.mode);
        if toward_origin {
            order.reverse();
        }
        let collisions: Vec<usize> = order
            .into_iter()
            .filter(|&j| collides(&self.items[j], &self.items[idx]))
            .collect();

        if !collisions.is_empty() && request.allow_overlap {
            self.log_step(idx, (old_x, old_y), cause, depth);
            return MoveOutcome::Overlapped;
        }
        if !collisions.is_empty() && request.prevent_collision {
            let item = &mut self.items[idx];
            item.x = old_x;
            item.y = old_y;
            item.moved = false;
            trace!(id = %item.id, "move reverted, collision prevented");
            return MoveOutcome::Reverted;
        }

        self.log_step(idx, (old_x, old_y), cause, depth);

        let moving_up = self.mode == CompactionMode::None && y.is_some() && new_y < old_y;
        for j in collisions {
            if self.items[j].moved {
                continue;
            }
            if self.items[j].is_static {
                self.displace(j, idx, request.user, moving_up, depth);
            } else {
                self.displace(idx, j, request.user, moving_up, depth);
            }
        }
        MoveOutcome::Resolved
    }

    /// Move `to_move` out of `stationary`'s way.
    fn displace(
        &mut self,
        stationary: usize,
        to_move: usize,
        user: bool,
        moving_up: bool,
        depth: usize,
    ) {
        let next = depth + 1;
        if user {
            let probe = self.probe(stationary, to_move, moving_up);
            let hit = self.items.iter().position(|item| item.rect().overlaps(&probe));
            let Some(hit) = hit else {
                let (x, y) = match self.mode {
                    CompactionMode::Horizontal => (Some(probe.x), None),
                    CompactionMode::Vertical | CompactionMode::None => (None, Some(probe.y)),
                };
                let cause = Some((stationary, CascadeReason::SlotBefore));
                self.move_item(to_move, x, y, Request::CASCADE, cause, next);
                return;
            };

            let sta = &self.items[stationary];
            let hit_item = &self.items[hit];
            let north = hit_item.bottom() > sta.y;
            let west = sta.right() > hit_item.x;
            match self.mode {
                CompactionMode::Vertical if north => {
                    let y = sta.y.saturating_add(1);
                    let cause = Some((stationary, CascadeReason::BelowStationary));
                    self.move_item(to_move, None, Some(y), Request::CASCADE, cause, next);
                    return;
                }
                CompactionMode::None if north => {
                    self.resolve_without_compaction(stationary, to_move, moving_up, next);
                    return;
                }
                CompactionMode::Horizontal if west => {
                    let x = self.items[to_move].x;
                    let cause = Some((to_move, CascadeReason::WestSwap));
                    self.move_item(stationary, Some(x), None, Request::CASCADE, cause, next);
                    return;
                }
                _ => {}
            }
        }

        // A static obstacle never yields, so clear it in one step.
        let sta = &self.items[stationary];
        let mv = &self.items[to_move];
        let (reason, past) = if sta.is_static {
            (CascadeReason::PastStatic, Some(sta))
        } else {
            (CascadeReason::Nudge, None)
        };
        let cause = Some((stationary, reason));
        match self.mode {
            CompactionMode::Vertical => {
                let step = mv.y.saturating_add(1);
                let y = past.map_or(step, |sta| step.max(sta.bottom()));
                self.move_item(to_move, None, Some(y), Request::CASCADE, cause, next);
            }
            CompactionMode::Horizontal => {
                let step = mv.x.saturating_add(1);
                let x = past.map_or(step, |sta| step.max(sta.right()));
                self.move_item(to_move, Some(x), None, Request::CASCADE, cause, next);
            }
            CompactionMode::None => {}
        }
    }

    /// Rectangle `to_move` would occupy if it slotted in before `stationary`.
    fn probe(&self, stationary: usize, to_move: usize, moving_up: bool) -> GridRect {
        let sta = &self.items[stationary];
        let mv = &self.items[to_move];
        match self.mode {
            CompactionMode::Vertical => {
                GridRect::new(mv.x, sta.y.saturating_sub(mv.h).max(0), mv.w, mv.h)
            }
            CompactionMode::Horizontal => {
                GridRect::new(sta.x.saturating_sub(mv.w).max(0), mv.y, mv.w, mv.h)
            }
            CompactionMode::None if moving_up => {
                GridRect::new(mv.x, sta.y.saturating_sub(mv.h).max(0), mv.w, mv.h)
            }
            CompactionMode::None => mv.rect(),
        }
    }

    /// Collision branch used when compaction is disabled.
    ///
    /// Moving up drops `to_move` directly under `stationary` without cascading;
    /// moving down pushes it one row further. Both reorder items, so the
    /// output is re-sorted row-major.
    fn resolve_without_compaction(
        &mut self,
        stationary: usize,
        to_move: usize,
        moving_up: bool,
        depth: usize,
    ) {
        self.resort = true;
        if moving_up {
            let below = self.items[stationary].bottom();
            let mv = &mut self.items[to_move];
            let from = (mv.x, mv.y);
            mv.y = below;
            mv.moved = true;
            self.log_step(to_move, from, Some((stationary, CascadeReason::BelowMover)), depth);
        } else {
            let y = self.items[to_move].y.saturating_add(1);
            let cause = Some((stationary, CascadeReason::Nudge));
            self.move_item(to_move, None, Some(y), Request::CASCADE, cause, depth);
        }
    }

    fn log_step(
        &mut self,
        idx: usize,
        from: (i32, i32),
        cause: Option<(usize, CascadeReason)>,
        depth: usize,
    ) {
        let item = &self.items[idx];
        let to = (item.x, item.y);
        let displaced_by = cause.map(|(by, _)| self.items[by].id.clone());
        let reason = cause.map_or(CascadeReason::Requested, |(_, reason)| reason);

        trace!(
            id = %item.id,
            depth,
            from = ?from,
            to = ?to,
            by = ?displaced_by,
            reason = ?reason,
            "cascade step"
        );

        if let Some(record) = self.record.as_deref_mut() {
            record.steps.push(CascadeStep {
                depth,
                id: item.id.clone(),
                displaced_by,
                from,
                to,
                reason,
            });
        }
    }
}
