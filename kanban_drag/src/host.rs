// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outbound side of a drag session.

use alloc::string::String;
use core::fmt;

use kurbo::{Rect, Vec2};

use kanban_board::{Card, CardId, Column, Measurer};

use crate::scheduler::SnapDirection;

/// A failure reported by the host while carrying out a command.
///
/// The session logs these and carries on; they never leave a gesture handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostError {
    message: String,
}

impl HostError {
    /// Creates an error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host error: {}", self.message)
    }
}

impl core::error::Error for HostError {}

/// Visual state of the dragged card's ghost.
#[derive(Clone, Debug, PartialEq)]
pub struct Ghost {
    /// The card being dragged.
    pub card: CardId,
    /// Where the card was when the drag started.
    pub origin: Rect,
    /// Pointer offset from the press position.
    pub offset: Vec2,
    /// Tilt in degrees.
    pub rotation: f64,
}

/// Summary of a finished drag, handed to [`BoardHost::drag_ended`].
#[derive(Clone, Debug, PartialEq)]
pub struct DragEnded {
    /// Column the card was picked up from.
    pub source: Column,
    /// Column the card was dropped in.
    pub destination: Column,
    /// The card, as it now sits in `destination`.
    pub card: Card,
    /// Its index in `destination`'s list.
    pub index: usize,
}

/// Commands a [`DragSession`](crate::DragSession) sends to its host.
///
/// Measurement requests come through the [`Measurer`] supertrait; the host
/// answers them later with [`DragSession::on_measured`](crate::DragSession::on_measured).
/// Everything but [`drag_ended`](Self::drag_ended) has a no-op default.
pub trait BoardHost: Measurer {
    /// A card was tapped outside of a drag.
    fn card_pressed(&mut self, card: &Card) -> Result<(), HostError> {
        let _ = card;
        Ok(())
    }

    /// A drag finished. Called exactly once per drag that resolved its columns.
    fn drag_ended(&mut self, ended: &DragEnded) -> Result<(), HostError>;

    /// Scroll a column's list to `offset`.
    fn scroll_column_to(&mut self, column: &Column, offset: f64) -> Result<(), HostError> {
        let _ = (column, offset);
        Ok(())
    }

    /// Snap the column carousel one column over.
    fn snap_carousel(&mut self, direction: SnapDirection) -> Result<(), HostError> {
        let _ = direction;
        Ok(())
    }

    /// The ghost moved or tilted; `None` once the drag is over.
    fn ghost_changed(&mut self, ghost: Option<&Ghost>) -> Result<(), HostError> {
        let _ = ghost;
        Ok(())
    }
}
