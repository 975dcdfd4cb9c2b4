// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=kanban_drag --heading-base-level=0

//! Kanban Drag: the drag-and-reorder controller for card boards.
//!
//! A [`DragSession`] owns a [`kanban_board::BoardState`] and its
//! [`kanban_board::LayoutTracker`], consumes gesture and layout events from a
//! host, and sends commands back through a [`BoardHost`]:
//!
//! - long press → [`DragSession::on_drag_start`] hides the card and starts a ghost;
//! - pointer move → [`DragSession::on_gesture_event`] moves the card across
//!   columns or within its column, schedules carousel snaps near the screen
//!   edges, and auto-scrolls the column near its top or bottom;
//! - release → [`DragSession::on_drag_end`] shows the card again and reports
//!   the drop exactly once.
//!
//! Each mutation invalidates the cards it shifts. Further moves into that
//! column wait ([`MoveOutcome::NotReady`]) until the host has laid the board
//! out again ([`DragSession::after_layout`]) and answered the resulting
//! measurement requests ([`DragSession::on_measured`]).
//!
//! Time is never read from a clock: handlers take the host's millisecond
//! timestamp, and [`DragSession::tick`] fires the [`Scheduler`]'s due timers.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use kanban_board::{Card, CardId, Column, ColumnId, ItemKey, Measurer};
//! use kanban_drag::{BoardHost, DragConfig, DragEnded, DragSession, HostError, MoveOutcome};
//!
//! #[derive(Default)]
//! struct Host {
//!     drops: Vec<DragEnded>,
//! }
//!
//! impl Measurer for Host {
//!     fn measure(&mut self, _key: &ItemKey) {}
//! }
//!
//! impl BoardHost for Host {
//!     fn drag_ended(&mut self, ended: &DragEnded) -> Result<(), HostError> {
//!         self.drops.push(ended.clone());
//!         Ok(())
//!     }
//! }
//!
//! let mut session = DragSession::new(Host::default(), DragConfig::default());
//! session.load(
//!     [Column::new("todo", "To do", 1), Column::new("done", "Done", 2)],
//!     [Card::new("c1", "todo", "Write docs")],
//! );
//! let measured = [
//!     (ItemKey::Column(ColumnId::new("todo")), Rect::new(10.0, 50.0, 200.0, 650.0)),
//!     (ItemKey::Column(ColumnId::new("done")), Rect::new(210.0, 50.0, 410.0, 650.0)),
//!     (ItemKey::Card(CardId::new("c1")), Rect::new(10.0, 200.0, 190.0, 260.0)),
//! ];
//! for (key, rect) in &measured {
//!     session.on_measured(key, Some(*rect));
//! }
//!
//! assert!(session.on_drag_start(Point::new(100.0, 220.0), 0));
//! let outcome = session.on_gesture_event(Point::new(300.0, 300.0), 16);
//! assert!(matches!(outcome, Some(MoveOutcome::MovedToColumn { .. })));
//!
//! let drop = session.on_drag_end().unwrap();
//! assert_eq!(drop.destination.id().as_str(), "done");
//! assert_eq!(session.host().drops.len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod auto_scroll;
mod config;
mod error;
mod host;
pub mod pointer;
pub mod scheduler;
mod session;

pub use config::{ColumnPolicy, DisplayMode, DragConfig};
pub use error::DragError;
pub use host::{BoardHost, DragEnded, Ghost, HostError};
pub use scheduler::{Scheduler, SnapDirection, SnapRequest};
pub use session::{DragSession, MoveOutcome};
