// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kanban_board::BoardError;

use crate::host::HostError;

/// Errors from [`DragSession`](crate::DragSession) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragError {
    /// A board mutation could not resolve its references.
    Board(BoardError),
    /// The host failed to carry out a command.
    Host(HostError),
    /// The operation needs an active drag.
    NotDragging,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board(err) => write!(f, "board: {err}"),
            Self::Host(err) => err.fmt(f),
            Self::NotDragging => f.write_str("no drag in progress"),
        }
    }
}

impl core::error::Error for DragError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Board(err) => Some(err),
            Self::Host(err) => Some(err),
            Self::NotDragging => None,
        }
    }
}

impl From<BoardError> for DragError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

impl From<HostError> for DragError {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}
