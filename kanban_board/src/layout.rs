// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout tracker: last known on-screen rectangles and visibility per item.
//!
//! ## Usage
//!
//! 1) After any board mutation, call [`LayoutTracker::remeasure`] with a [`Measurer`];
//!    it asks the host to measure each affected item.
//! 2) When the host answers, call [`LayoutTracker::on_measured`] with the rectangle
//!    (or `None` if the item is currently not laid out). This clears the card's
//!    invalidated flag.
//! 3) Hit testing reads [`LayoutTracker::card`] / [`LayoutTracker::column`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Rect;
//! use kanban_board::{BoardState, Card, CardId, Column, ItemKey, LayoutTracker};
//!
//! let mut board = BoardState::new();
//! board.load([Column::new("a", "A", 0)], [Card::new("c1", "a", "One")]);
//!
//! let mut layout = LayoutTracker::new();
//! let mut requested = Vec::new();
//! layout.remeasure(&mut board, None, &mut |key: &ItemKey| requested.push(key.clone()));
//! assert_eq!(requested.len(), 2);
//!
//! let key = ItemKey::Card(CardId::new("c1"));
//! layout.on_measured(&mut board, &key, Some(Rect::new(10.0, 20.0, 110.0, 80.0)));
//! assert!(layout.card(&CardId::new("c1")).is_rendered_and_visible());
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::model::{CardId, ColumnId, ItemKey};
use crate::state::BoardState;

bitflags::bitflags! {
    /// Per-item layout flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Measured with a non-degenerate rectangle and currently shown.
        const RENDERED_VISIBLE = 0b0000_0001;
        /// The host has no view for this item, so it cannot be measured.
        const DETACHED         = 0b0000_0010;
    }
}

/// Last known geometry of a card or column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Absolute on-screen rectangle from the most recent measurement.
    pub rect: Option<Rect>,
    /// Visibility and attachment flags.
    pub flags: ItemFlags,
}

impl Geometry {
    /// Returns `true` once a non-degenerate measurement has been seen.
    #[must_use]
    pub fn is_rendered_and_visible(&self) -> bool {
        self.flags.contains(ItemFlags::RENDERED_VISIBLE)
    }

    /// The rectangle, but only for rendered and visible items.
    #[must_use]
    pub fn visible_rect(&self) -> Option<Rect> {
        self.rect.filter(|_| self.is_rendered_and_visible())
    }
}

/// Issues measurement requests to the host.
///
/// Answers arrive later through [`LayoutTracker::on_measured`].
pub trait Measurer {
    /// Requests a fresh measurement of one item.
    fn measure(&mut self, key: &ItemKey);
}

impl<F: FnMut(&ItemKey)> Measurer for F {
    fn measure(&mut self, key: &ItemKey) {
        self(key);
    }
}

/// Returns `true` when all of `x`, `y`, width and height are non-zero.
#[must_use]
pub fn is_non_degenerate(rect: Rect) -> bool {
    rect.x0 != 0.0 && rect.y0 != 0.0 && rect.width() != 0.0 && rect.height() != 0.0
}

fn is_fully_degenerate(rect: Rect) -> bool {
    rect.x0 == 0.0 && rect.y0 == 0.0 && rect.width() == 0.0 && rect.height() == 0.0
}

/// Side table of measured geometry, keyed by card and column id.
///
/// Items the tracker has never heard about report a default [`Geometry`]:
/// no rectangle, not visible, attached.
#[derive(Clone, Debug, Default)]
pub struct LayoutTracker {
    cards: HashMap<CardId, Geometry>,
    columns: HashMap<ColumnId, Geometry>,
}

impl LayoutTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry of a card.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Geometry {
        self.cards.get(id).copied().unwrap_or_default()
    }

    /// Geometry of a column.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Geometry {
        self.columns.get(id).copied().unwrap_or_default()
    }

    /// Geometry of any item.
    #[must_use]
    pub fn geometry(&self, key: &ItemKey) -> Geometry {
        match key {
            ItemKey::Card(id) => self.card(id),
            ItemKey::Column(id) => self.column(id),
        }
    }

    fn entry(&mut self, key: &ItemKey) -> &mut Geometry {
        match key {
            ItemKey::Card(id) => self.cards.entry(id.clone()).or_default(),
            ItemKey::Column(id) => self.columns.entry(id.clone()).or_default(),
        }
    }

    /// Records whether the host currently has a view for an item.
    ///
    /// Detaching clears the rectangle right away.
    pub fn set_attached(&mut self, key: &ItemKey, attached: bool) {
        let geometry = self.entry(key);
        geometry.flags.set(ItemFlags::DETACHED, !attached);
        if !attached {
            geometry.rect = None;
        }
    }

    /// Applies a measurement answer from the host.
    ///
    /// `None` means the item is not laid out right now; its rectangle is dropped
    /// and the visibility flag is left as it was. Visibility turns on only
    /// when a degenerate item becomes non-degenerate and turns off only when a
    /// visible item collapses to an all-zero rectangle. Either way the card's
    /// invalidated flag is cleared: this was the fresh measurement it waited for.
    pub fn on_measured(&mut self, board: &mut BoardState, key: &ItemKey, rect: Option<Rect>) {
        let known = match key {
            ItemKey::Card(id) => board.contains_card(id),
            ItemKey::Column(id) => board.column(id).is_some(),
        };
        if !known {
            tracing::trace!(?key, "ignoring measurement of item no longer on the board");
            return;
        }

        let geometry = self.entry(key);
        geometry.rect = rect;
        if let Some(rect) = rect {
            let visible = geometry.is_rendered_and_visible();
            if !visible && is_non_degenerate(rect) {
                geometry.flags.insert(ItemFlags::RENDERED_VISIBLE);
            } else if visible && is_fully_degenerate(rect) {
                geometry.flags.remove(ItemFlags::RENDERED_VISIBLE);
            }
        }
        tracing::trace!(?key, ?rect, "measured");

        if let ItemKey::Card(id) = key {
            board.clear_invalidated(id);
        }
    }

    /// Requests fresh measurements for one column and its cards, or for the whole board.
    ///
    /// Detached items cannot be measured; they are resolved immediately as
    /// "not laid out". Returns the number of requests issued.
    pub fn remeasure(
        &mut self,
        board: &mut BoardState,
        column: Option<&ColumnId>,
        measurer: &mut impl Measurer,
    ) -> usize {
        let scope: Vec<ColumnId> = match column {
            Some(id) => board
                .column(id)
                .map(|c| c.id().clone())
                .into_iter()
                .collect(),
            None => board.column_ids().to_vec(),
        };

        let mut keys = Vec::new();
        for column in scope {
            keys.extend(
                board
                    .cards(&column)
                    .iter()
                    .map(|card| ItemKey::Card(card.id().clone())),
            );
            keys.push(ItemKey::Column(column));
        }

        let mut issued = 0;
        for key in keys {
            if self.geometry(&key).flags.contains(ItemFlags::DETACHED) {
                self.on_measured(board, &key, None);
            } else {
                measurer.measure(&key);
                issued += 1;
            }
        }
        tracing::trace!(issued, "remeasure requested");
        issued
    }

    /// Applies the host list's viewability report for a column.
    ///
    /// The column is remeasured, then each of its cards is marked visible
    /// exactly when it appears in `visible`.
    pub fn set_visible_cards(
        &mut self,
        board: &mut BoardState,
        column: &ColumnId,
        visible: &[CardId],
        measurer: &mut impl Measurer,
    ) {
        if board.column(column).is_none() {
            return;
        }
        self.remeasure(board, Some(column), measurer);

        for card in board.cards(column) {
            let shown = visible.contains(card.id());
            self.cards
                .entry(card.id().clone())
                .or_default()
                .flags
                .set(ItemFlags::RENDERED_VISIBLE, shown);
        }
    }

    /// Drops geometry of items that are no longer on the board.
    pub fn forget_missing(&mut self, board: &BoardState) {
        self.cards.retain(|id, _| board.contains_card(id));
        self.columns.retain(|id, _| board.column(id).is_some());
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Card, Column};

    fn board() -> BoardState {
        let mut board = BoardState::new();
        board.load(
            [Column::new("a", "A", 0), Column::new("b", "B", 0)],
            [
                Card::new("c1", "a", "one"),
                Card::new("c2", "a", "two"),
                Card::new("c3", "b", "three"),
            ],
        );
        board
    }

    fn card(id: &str) -> ItemKey {
        ItemKey::Card(CardId::new(id))
    }

    #[test]
    fn non_degenerate_needs_every_component() {
        assert!(is_non_degenerate(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!is_non_degenerate(Rect::new(0.0, 1.0, 2.0, 2.0)));
        assert!(!is_non_degenerate(Rect::new(1.0, 1.0, 1.0, 2.0)));
        assert!(is_fully_degenerate(Rect::ZERO));
        assert!(!is_fully_degenerate(Rect::new(0.0, 0.0, 0.0, 5.0)));
    }

    #[test]
    fn visibility_turns_on_only_from_degenerate() {
        let mut board = board();
        let mut layout = LayoutTracker::new();

        layout.on_measured(&mut board, &card("c1"), Some(Rect::new(0.0, 10.0, 100.0, 60.0)));
        assert!(!layout.card(&CardId::new("c1")).is_rendered_and_visible());

        layout.on_measured(&mut board, &card("c1"), Some(Rect::new(5.0, 10.0, 100.0, 60.0)));
        assert!(layout.card(&CardId::new("c1")).is_rendered_and_visible());

        // A single zero component while visible does not hide.
        layout.on_measured(&mut board, &card("c1"), Some(Rect::new(0.0, 10.0, 100.0, 60.0)));
        assert!(layout.card(&CardId::new("c1")).is_rendered_and_visible());

        layout.on_measured(&mut board, &card("c1"), Some(Rect::ZERO));
        let geometry = layout.card(&CardId::new("c1"));
        assert!(!geometry.is_rendered_and_visible());
        assert_eq!(geometry.rect, Some(Rect::ZERO));
        assert_eq!(geometry.visible_rect(), None);
    }

    #[test]
    fn missing_view_keeps_the_visibility_flag() {
        let mut board = board();
        let mut layout = LayoutTracker::new();
        layout.on_measured(&mut board, &card("c1"), Some(Rect::new(5.0, 10.0, 100.0, 60.0)));

        layout.on_measured(&mut board, &card("c1"), None);
        let geometry = layout.card(&CardId::new("c1"));
        assert!(geometry.is_rendered_and_visible());
        assert_eq!(geometry.visible_rect(), None);

        // Coming back with one zero component is still visible.
        let rect = Rect::new(0.0, 10.0, 100.0, 60.0);
        layout.on_measured(&mut board, &card("c1"), Some(rect));
        assert_eq!(layout.card(&CardId::new("c1")).visible_rect(), Some(rect));
    }

    #[test]
    fn measurement_clears_invalidated() {
        let mut board = board();
        let mut layout = LayoutTracker::new();
        board.invalidate_column(&ColumnId::new("a")).unwrap();

        layout.on_measured(&mut board, &card("c1"), Some(Rect::new(5.0, 10.0, 100.0, 60.0)));
        assert!(!board.card(&CardId::new("c1")).unwrap().is_invalidated());
        assert!(board.card(&CardId::new("c2")).unwrap().is_invalidated());

        layout.on_measured(&mut board, &card("c2"), None);
        assert!(!board.has_invalidated(&ColumnId::new("a")));
    }

    #[test]
    fn remeasure_scopes_to_one_column() {
        let mut board = board();
        let mut layout = LayoutTracker::new();
        let mut requested = Vec::new();

        let issued = layout.remeasure(&mut board, Some(&ColumnId::new("a")), &mut |key: &ItemKey| {
            requested.push(key.clone());
        });

        assert_eq!(issued, 3);
        assert_eq!(
            requested,
            [card("c1"), card("c2"), ItemKey::Column(ColumnId::new("a"))]
        );
    }

    #[test]
    fn remeasure_resolves_detached_items_immediately() {
        let mut board = board();
        let mut layout = LayoutTracker::new();
        layout.on_measured(&mut board, &card("c3"), Some(Rect::new(5.0, 5.0, 50.0, 50.0)));
        layout.set_attached(&card("c3"), false);
        board.invalidate_card(&CardId::new("c3")).unwrap();

        let mut requested = Vec::new();
        let issued = layout.remeasure(&mut board, None, &mut |key: &ItemKey| {
            requested.push(key.clone());
        });

        assert_eq!(issued, 4);
        assert!(!requested.contains(&card("c3")));
        assert_eq!(layout.card(&CardId::new("c3")).rect, None);
        assert!(!board.has_invalidated(&ColumnId::new("b")));
    }

    #[test]
    fn visible_cards_follow_membership() {
        let mut board = board();
        let mut layout = LayoutTracker::new();
        let mut ignore = |_: &ItemKey| {};

        layout.set_visible_cards(
            &mut board,
            &ColumnId::new("a"),
            &[CardId::new("c2")],
            &mut ignore,
        );
        assert!(!layout.card(&CardId::new("c1")).is_rendered_and_visible());
        assert!(layout.card(&CardId::new("c2")).is_rendered_and_visible());
    }

    #[test]
    fn measurements_for_unknown_items_are_ignored() {
        let mut board = board();
        let mut layout = LayoutTracker::new();
        layout.on_measured(&mut board, &card("ghost"), Some(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert_eq!(layout.card(&CardId::new("ghost")), Geometry::default());
    }

    #[test]
    fn forget_missing_prunes_removed_items() {
        let mut board = board();
        let mut layout = LayoutTracker::new();
        layout.on_measured(&mut board, &card("c1"), Some(Rect::new(1.0, 1.0, 2.0, 2.0)));
        board.load([Column::new("a", "A", 0)], []);
        layout.forget_missing(&board);
        assert_eq!(layout.card(&CardId::new("c1")), Geometry::default());
    }
}
