// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking for a drag: movement deltas, total offset, and ghost tilt.
//!
//! ## Usage
//!
//! 1) Call [`PointerTrack::start`] with the press position and its timestamp.
//! 2) On each move, call [`PointerTrack::update`] to get the movement since the last one.
//! 3) Use [`PointerTrack::total_offset`] for the ghost offset and
//!    [`ghost_rotation`] for its tilt.
//! 4) Call [`PointerTrack::end`] when the gesture finishes.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use kanban_drag::pointer::PointerTrack;
//!
//! let mut track = PointerTrack::default();
//! track.start(Point::new(10.0, 20.0), 1_000);
//!
//! let step = track.update(Point::new(16.0, 20.0), 1_003).unwrap();
//! assert_eq!(step.delta.x, 6.0);
//! assert_eq!(step.elapsed_ms, 3);
//! assert_eq!(track.total_offset(Point::new(16.0, 20.0)).unwrap().x, 6.0);
//! ```

use kurbo::{Point, Vec2};

/// One pointer step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerStep {
    /// Movement since the previous position.
    pub delta: Vec2,
    /// Time since the previous position.
    pub elapsed_ms: u64,
}

impl PointerStep {
    /// Horizontal velocity in screen units per millisecond.
    ///
    /// Steps reported within the same millisecond count as one millisecond.
    #[must_use]
    pub fn velocity_x(&self) -> f64 {
        self.delta.x / self.elapsed_ms.max(1) as f64
    }
}

/// Tracks the pointer of the active drag.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTrack {
    /// Position of the press that started the drag.
    pub start_pos: Option<Point>,
    /// Last recorded position.
    pub last_pos: Option<Point>,
    last_time: u64,
}

impl PointerTrack {
    /// Starts tracking from the given press.
    pub fn start(&mut self, pos: Point, now: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.last_time = now;
    }

    /// Records a new position, returning the step since the last one.
    pub fn update(&mut self, pos: Point, now: u64) -> Option<PointerStep> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        let elapsed_ms = now.saturating_sub(self.last_time);
        self.last_time = now;
        Some(PointerStep {
            delta: pos - last,
            elapsed_ms,
        })
    }

    /// Offset of `pos` from the press position.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| pos - start)
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }
}

/// Ghost tilt in degrees for a pointer step.
///
/// Proportional to horizontal velocity and clamped to `±max_degrees`, so the
/// ghost leans into fast horizontal motion and settles when the pointer stops.
#[must_use]
pub fn ghost_rotation(step: PointerStep, gain: f64, max_degrees: f64) -> f64 {
    let max = max_degrees.abs();
    (step.velocity_x() * gain).clamp(-max, max)
}
