// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for a drag session.

/// How the host lays columns out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    /// Several columns side by side in a horizontally snapping carousel.
    #[default]
    Carousel,
    /// One column fills the width; the carousel does not scroll by hand.
    FullWidth,
}

/// Which column a drag starts in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnPolicy {
    /// The column whose rectangle contains the press, in every display mode.
    #[default]
    PointerHitTest,
    /// The carousel's currently centered column, wherever the press landed.
    CarouselCurrent,
}

/// Configuration of a [`DragSession`](crate::DragSession).
///
/// Distances are in the same absolute screen units the host measures in;
/// durations are milliseconds on the clock the host passes to event handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Column layout of the host.
    pub display_mode: DisplayMode,
    /// How the starting column is resolved.
    pub column_policy: ColumnPolicy,
    /// Distance from a column's top or bottom edge that triggers auto-scroll.
    pub scroll_threshold: f64,
    /// Scroll distance per auto-scroll step.
    pub scroll_step: f64,
    /// Minimum time between two auto-scroll steps.
    pub scroll_cooldown_ms: u64,
    /// Distance from the left or right screen edge that requests a carousel snap.
    pub snap_edge_margin: f64,
    /// Delay between entering the edge margin and the snap.
    pub snap_delay_ms: u64,
    /// Largest ghost tilt, in degrees, either way.
    pub max_ghost_rotation: f64,
    /// Degrees of ghost tilt per unit of horizontal velocity (screen units per ms).
    pub ghost_rotation_gain: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::default(),
            column_policy: ColumnPolicy::default(),
            scroll_threshold: 100.0,
            scroll_step: 40.0,
            scroll_cooldown_ms: 50,
            snap_edge_margin: 40.0,
            snap_delay_ms: 500,
            max_ghost_rotation: 3.0,
            ghost_rotation_gain: 2.0,
        }
    }
}

impl DragConfig {
    /// Sets the display mode.
    #[must_use]
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    /// Sets the starting-column policy.
    #[must_use]
    pub fn with_column_policy(mut self, policy: ColumnPolicy) -> Self {
        self.column_policy = policy;
        self
    }

    /// Sets the auto-scroll edge threshold.
    #[must_use]
    pub fn with_scroll_threshold(mut self, threshold: f64) -> Self {
        self.scroll_threshold = threshold;
        self
    }

    /// Sets the auto-scroll step and cooldown.
    #[must_use]
    pub fn with_scroll_step(mut self, step: f64, cooldown_ms: u64) -> Self {
        self.scroll_step = step;
        self.scroll_cooldown_ms = cooldown_ms;
        self
    }

    /// Sets the carousel snap edge margin and delay.
    #[must_use]
    pub fn with_snap(mut self, edge_margin: f64, delay_ms: u64) -> Self {
        self.snap_edge_margin = edge_margin;
        self.snap_delay_ms = delay_ms;
        self
    }

    /// Sets the ghost tilt limit and gain.
    #[must_use]
    pub fn with_ghost_rotation(mut self, max_degrees: f64, gain: f64) -> Self {
        self.max_ghost_rotation = max_degrees;
        self.ghost_rotation_gain = gain;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_chain() {
        let config = DragConfig::default()
            .with_display_mode(DisplayMode::FullWidth)
            .with_column_policy(ColumnPolicy::CarouselCurrent)
            .with_scroll_threshold(80.0)
            .with_scroll_step(25.0, 16)
            .with_snap(30.0, 250)
            .with_ghost_rotation(5.0, 1.0);

        assert_eq!(config.display_mode, DisplayMode::FullWidth);
        assert_eq!(config.column_policy, ColumnPolicy::CarouselCurrent);
        assert_eq!(config.scroll_threshold, 80.0);
        assert_eq!((config.scroll_step, config.scroll_cooldown_ms), (25.0, 16));
        assert_eq!((config.snap_edge_margin, config.snap_delay_ms), (30.0, 250));
        assert_eq!((config.max_ghost_rotation, config.ghost_rotation_gain), (5.0, 1.0));
    }
}
