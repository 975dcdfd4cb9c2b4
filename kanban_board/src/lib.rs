// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=kanban_board --heading-base-level=0

//! Kanban Board: board state, layout tracking, and hit testing for card boards.
//!
//! This crate is the data half of a draggable multi-column card board. It owns
//! the ordered card lists and the measured geometry of every card and column,
//! and answers "what is under this point?" for a drag controller such as
//! `kanban_drag`.
//!
//! - [`BoardState`]: columns and their ordered card lists, with the two drag
//!   mutations ([`BoardState::move_to_column`] and
//!   [`BoardState::reorder_within_column`]) and a [`revision`](BoardState::revision)
//!   counter that bumps on every change.
//! - [`LayoutTracker`]: a side table of measured rectangles plus
//!   rendered/visible flags. Measurement is asynchronous: the tracker asks a
//!   [`Measurer`] and the host answers later via [`LayoutTracker::on_measured`].
//! - [`hit`]: pure functions resolving the column and card under a point.
//!
//! It does **not** render anything or hold references to views. The host
//! attaches one view per [`ItemKey`] and reports its absolute rectangle.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use kanban_board::{hit, BoardState, Card, CardId, Column, ColumnId, ItemKey, LayoutTracker};
//!
//! let mut board = BoardState::new();
//! board.load(
//!     [Column::new("new", "New", 1), Column::new("done", "Done", 2)],
//!     [Card::new("c1", "new", "Write docs"), Card::new("c2", "new", "Ship")],
//! );
//!
//! // Host measurements.
//! let mut layout = LayoutTracker::new();
//! let measured = [
//!     (ItemKey::Column(ColumnId::new("new")), Rect::new(10.0, 50.0, 210.0, 650.0)),
//!     (ItemKey::Column(ColumnId::new("done")), Rect::new(220.0, 50.0, 420.0, 650.0)),
//!     (ItemKey::Card(CardId::new("c1")), Rect::new(20.0, 100.0, 200.0, 160.0)),
//!     (ItemKey::Card(CardId::new("c2")), Rect::new(20.0, 170.0, 200.0, 230.0)),
//! ];
//! for (key, rect) in measured {
//!     layout.on_measured(&mut board, &key, Some(rect));
//! }
//!
//! let column = hit::find_column(&board, &layout, 300.0).unwrap();
//! assert_eq!(column.id().as_str(), "done");
//!
//! let card = hit::find_card_in_column(&ColumnId::new("new"), &board, &layout, 190.0).unwrap();
//! assert_eq!(card.id().as_str(), "c2");
//!
//! board
//!     .move_to_column(&CardId::new("c2"), &ColumnId::new("new"), &ColumnId::new("done"))
//!     .unwrap();
//! assert_eq!(board.cards(&ColumnId::new("done"))[0].id().as_str(), "c2");
//! ```
//!
//! ## Staleness
//!
//! Every mutation invalidates the cards whose rectangles it shifts. Hit
//! testing skips invalidated cards until their next measurement arrives, and a
//! drag controller can use [`BoardState::has_invalidated`] to hold off further
//! moves in a column until its layout has settled.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
pub mod hit;
mod layout;
mod model;
mod state;

pub use error::BoardError;
pub use layout::{Geometry, ItemFlags, LayoutTracker, Measurer, is_non_degenerate};
pub use model::{Card, CardId, Column, ColumnId, ItemKey, Tag};
pub use state::{BoardState, LoadReport};
