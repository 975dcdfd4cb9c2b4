// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::model::{CardId, ColumnId};

/// Errors returned by [`BoardState`](crate::BoardState) mutations.
///
/// These describe references that could not be resolved. Callers driving a
/// drag treat all of them as "skip this tick" rather than as failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// No column with this id is on the board.
    UnknownColumn(ColumnId),
    /// No card with this id is on the board.
    UnknownCard(CardId),
    /// The card exists but is not in the named column's list.
    CardNotInColumn {
        /// The card that was looked up.
        card: CardId,
        /// The column whose list was searched.
        column: ColumnId,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColumn(column) => write!(f, "column `{column}` is not on the board"),
            Self::UnknownCard(card) => write!(f, "card `{card}` is not on the board"),
            Self::CardNotInColumn { card, column } => {
                write!(f, "card `{card}` is not in column `{column}`")
            }
        }
    }
}

impl core::error::Error for BoardError {}
