// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-shot timers for a drag session.
//!
//! There are two slots, each holding at most one deadline: a pending carousel
//! snap and the auto-scroll cooldown. Time is whatever millisecond clock the
//! host passes in; nothing here reads a clock or blocks.

/// Direction of a carousel snap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapDirection {
    /// Towards the previous column (pointer at the left edge).
    Previous,
    /// Towards the next column (pointer at the right edge).
    Next,
}

impl SnapDirection {
    /// The other direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Previous => Self::Next,
            Self::Next => Self::Previous,
        }
    }
}

/// What [`Scheduler::request_snap`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapRequest {
    /// Nothing was pending; the snap is now scheduled.
    Scheduled,
    /// A snap in the same direction is already pending; left as is.
    AlreadyPending,
    /// A snap in the opposite direction was cancelled in favor of this one.
    Replaced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingSnap {
    direction: SnapDirection,
    due: u64,
}

/// Named timer slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scheduler {
    snap_pending: Option<PendingSnap>,
    scroll_cooldown: Option<u64>,
}

impl Scheduler {
    /// Creates a scheduler with both slots empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a snap at `due` unless one in the same direction is pending.
    pub fn request_snap(&mut self, direction: SnapDirection, due: u64) -> SnapRequest {
        let outcome = match self.snap_pending {
            Some(pending) if pending.direction == direction.opposite() => SnapRequest::Replaced,
            Some(_) => return SnapRequest::AlreadyPending,
            None => SnapRequest::Scheduled,
        };
        self.snap_pending = Some(PendingSnap { direction, due });
        outcome
    }

    /// Direction of the pending snap, if any.
    #[must_use]
    pub fn pending_snap(&self) -> Option<SnapDirection> {
        self.snap_pending.map(|pending| pending.direction)
    }

    /// Fires the pending snap if it is due at `now`.
    pub fn take_due_snap(&mut self, now: u64) -> Option<SnapDirection> {
        let pending = self.snap_pending?;
        if now < pending.due {
            return None;
        }
        self.snap_pending = None;
        Some(pending.direction)
    }

    /// Starts the scroll cooldown, lasting until `until`.
    pub fn start_scroll_cooldown(&mut self, until: u64) {
        self.scroll_cooldown = Some(until);
    }

    /// Returns `true` while the scroll cooldown has not expired at `now`.
    #[must_use]
    pub fn scroll_cooling_down(&self, now: u64) -> bool {
        self.scroll_cooldown.is_some_and(|until| now < until)
    }

    /// Clears the scroll cooldown if it expired at `now`.
    pub fn expire(&mut self, now: u64) {
        if !self.scroll_cooling_down(now) {
            self.scroll_cooldown = None;
        }
    }

    /// Empties both slots.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
