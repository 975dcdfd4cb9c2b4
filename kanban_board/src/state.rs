// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The board state store: columns and their ordered card lists.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::error::BoardError;
use crate::model::{Card, CardId, Column, ColumnId};

/// Counts from a [`BoardState::load`] or [`BoardState::refresh`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Cards placed into a column list.
    pub accepted: usize,
    /// Cards dropped because their column is not on the board.
    pub orphaned: usize,
    /// Cards dropped because their id was empty or already taken.
    pub rejected_ids: usize,
}

impl LoadReport {
    /// Total number of cards that did not make it onto the board.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.orphaned + self.rejected_ids
    }
}

/// Authoritative mapping from columns to their ordered card lists.
///
/// Invariants:
/// - every column has a (possibly empty) card list;
/// - every card's [`column_id`](Card::column_id) names the list that holds it;
/// - card ids are unique and non-empty.
///
/// [`revision`](Self::revision) increases on every change to the lists or to
/// a card's flags, so consumers can detect a new snapshot by comparing two
/// integers.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    columns: HashMap<ColumnId, Column>,
    /// Column ids in the order they were first supplied.
    column_order: Vec<ColumnId>,
    column_cards: HashMap<ColumnId, Vec<Card>>,
    revision: u64,
}

impl BoardState {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole board.
    ///
    /// Duplicate column ids keep the last column supplied. Cards are appended to
    /// their column's list in input order; cards naming an unknown column, and
    /// cards with an empty or repeated id, are dropped and logged.
    pub fn load(
        &mut self,
        columns: impl IntoIterator<Item = Column>,
        cards: impl IntoIterator<Item = Card>,
    ) -> LoadReport {
        self.set_columns(columns);
        let report = self.assign_cards(cards);
        self.bump();
        tracing::debug!(
            columns = self.column_order.len(),
            accepted = report.accepted,
            dropped = report.dropped(),
            "board loaded"
        );
        report
    }

    /// Patches the board, keeping whatever is not supplied.
    ///
    /// With only `columns`, existing card lists are carried over untouched so
    /// in-flight drag mutations survive; lists of removed columns are dropped
    /// and new columns start empty. With only `cards`, the lists are rebuilt
    /// against the current columns.
    pub fn refresh(
        &mut self,
        columns: Option<Vec<Column>>,
        cards: Option<Vec<Card>>,
    ) -> LoadReport {
        if columns.is_none() && cards.is_none() {
            return LoadReport::default();
        }

        let mut report = LoadReport::default();
        if let Some(columns) = columns {
            self.set_columns(columns);
            if cards.is_none() {
                report = self.retain_lists();
            }
        }
        if let Some(cards) = cards {
            report = self.assign_cards(cards);
        }
        self.bump();
        tracing::debug!(
            accepted = report.accepted,
            dropped = report.dropped(),
            "board refreshed"
        );
        report
    }

    /// Monotonic change counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if the board has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.column_order.is_empty()
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.column_cards.values().map(Vec::len).sum()
    }

    /// Looks up a column.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    /// Iterates columns in the order they were supplied.
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    /// Column ids in the order they were supplied.
    #[must_use]
    pub fn column_ids(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// The ordered card list of a column; empty if the column is unknown.
    #[must_use]
    pub fn cards(&self, column: &ColumnId) -> &[Card] {
        self.column_cards.get(column).map_or(&[], Vec::as_slice)
    }

    /// Looks up a card anywhere on the board.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.column_cards
            .values()
            .flat_map(|cards| cards.iter())
            .find(|card| card.id() == id)
    }

    /// Returns `true` if the card is on the board.
    #[must_use]
    pub fn contains_card(&self, id: &CardId) -> bool {
        self.card(id).is_some()
    }

    /// The column currently owning a card.
    #[must_use]
    pub fn column_of(&self, card: &CardId) -> Option<&ColumnId> {
        self.card(card).map(Card::column_id)
    }

    /// Position of a card within its column's list.
    #[must_use]
    pub fn index_of(&self, column: &ColumnId, card: &CardId) -> Option<usize> {
        self.cards(column).iter().position(|c| c.id() == card)
    }

    /// Returns `true` if any card in the column is waiting for a fresh measurement.
    #[must_use]
    pub fn has_invalidated(&self, column: &ColumnId) -> bool {
        self.cards(column).iter().any(Card::is_invalidated)
    }

    /// Moves a card from `from` to the end of `to`.
    ///
    /// The card is removed from `from`'s list, appended to `to`'s list, takes
    /// `to` as its column, and is invalidated. Returns `Ok(false)` without
    /// touching anything when `from == to`.
    pub fn move_to_column(
        &mut self,
        card: &CardId,
        from: &ColumnId,
        to: &ColumnId,
    ) -> Result<bool, BoardError> {
        if from == to {
            return Ok(false);
        }
        if !self.column_cards.contains_key(to) {
            return Err(BoardError::UnknownColumn(to.clone()));
        }

        let source = self
            .column_cards
            .get_mut(from)
            .ok_or_else(|| BoardError::UnknownColumn(from.clone()))?;
        let index = source
            .iter()
            .position(|c| c.id() == card)
            .ok_or_else(|| BoardError::CardNotInColumn {
                card: card.clone(),
                column: from.clone(),
            })?;
        let mut moved = source.remove(index);
        moved.set_column_id(to.clone());
        moved.set_invalidated(true);

        // Presence checked above.
        if let Some(target) = self.column_cards.get_mut(to) {
            target.push(moved);
        }
        self.bump();
        Ok(true)
    }

    /// Moves a card to `target_index` within its column.
    ///
    /// The index is interpreted against the list after the card has been
    /// removed, so the card lands before whatever element currently sits at
    /// `target_index`; indices past the end append. Every card in the column
    /// is invalidated since all of their rectangles shift.
    pub fn reorder_within_column(
        &mut self,
        column: &ColumnId,
        card: &CardId,
        target_index: usize,
    ) -> Result<(), BoardError> {
        let cards = self
            .column_cards
            .get_mut(column)
            .ok_or_else(|| BoardError::UnknownColumn(column.clone()))?;
        let index = cards
            .iter()
            .position(|c| c.id() == card)
            .ok_or_else(|| BoardError::CardNotInColumn {
                card: card.clone(),
                column: column.clone(),
            })?;

        let moved = cards.remove(index);
        let target_index = target_index.min(cards.len());
        cards.insert(target_index, moved);
        for card in cards.iter_mut() {
            card.set_invalidated(true);
        }
        self.bump();
        Ok(())
    }

    /// Shows or hides a card behind the drag ghost.
    pub fn set_hidden(&mut self, card: &CardId, hidden: bool) -> Result<(), BoardError> {
        let entry = self
            .card_mut(card)
            .ok_or_else(|| BoardError::UnknownCard(card.clone()))?;
        if entry.is_hidden() != hidden {
            entry.set_hidden(hidden);
            self.bump();
        }
        Ok(())
    }

    /// Marks a single card as waiting for a fresh measurement.
    pub fn invalidate_card(&mut self, card: &CardId) -> Result<(), BoardError> {
        self.card_mut(card)
            .ok_or_else(|| BoardError::UnknownCard(card.clone()))?
            .set_invalidated(true);
        Ok(())
    }

    /// Marks every card in a column as waiting for a fresh measurement.
    pub fn invalidate_column(&mut self, column: &ColumnId) -> Result<(), BoardError> {
        let cards = self
            .column_cards
            .get_mut(column)
            .ok_or_else(|| BoardError::UnknownColumn(column.clone()))?;
        for card in cards.iter_mut() {
            card.set_invalidated(true);
        }
        Ok(())
    }

    /// Sets a column's authoritative scroll offset.
    pub fn set_scroll_offset(&mut self, column: &ColumnId, offset: f64) -> Result<(), BoardError> {
        self.columns
            .get_mut(column)
            .ok_or_else(|| BoardError::UnknownColumn(column.clone()))?
            .set_scroll_offset(offset);
        Ok(())
    }

    /// Records the height of a column's scrollable content.
    pub fn set_content_height(
        &mut self,
        column: &ColumnId,
        height: f64,
    ) -> Result<(), BoardError> {
        self.columns
            .get_mut(column)
            .ok_or_else(|| BoardError::UnknownColumn(column.clone()))?
            .set_content_height(height);
        Ok(())
    }

    /// Clears the invalidated flag after a measurement completes.
    ///
    /// Geometry is independent of list order, so this does not bump the revision.
    pub(crate) fn clear_invalidated(&mut self, card: &CardId) {
        if let Some(entry) = self.card_mut(card) {
            entry.set_invalidated(false);
        }
    }

    fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.column_cards
            .values_mut()
            .flat_map(|cards| cards.iter_mut())
            .find(|card| card.id() == id)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn set_columns(&mut self, columns: impl IntoIterator<Item = Column>) {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for column in columns {
            let id = column.id().clone();
            if map.insert(id.clone(), column).is_none() {
                order.push(id);
            }
        }
        self.columns = map;
        self.column_order = order;
    }

    fn empty_lists(&self) -> HashMap<ColumnId, Vec<Card>> {
        self.column_order
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect()
    }

    fn assign_cards(&mut self, cards: impl IntoIterator<Item = Card>) -> LoadReport {
        let mut lists = self.empty_lists();
        let mut seen = HashSet::new();
        let mut report = LoadReport::default();

        for card in cards {
            if card.id().is_empty() || seen.contains(card.id()) {
                tracing::warn!(card = %card.id(), "dropping card with empty or duplicate id");
                report.rejected_ids += 1;
                continue;
            }
            let Some(list) = lists.get_mut(card.column_id()) else {
                tracing::warn!(
                    card = %card.id(),
                    column = %card.column_id(),
                    "dropping card for unknown column"
                );
                report.orphaned += 1;
                continue;
            };
            seen.insert(card.id().clone());
            list.push(card);
            report.accepted += 1;
        }

        self.column_cards = lists;
        report
    }

    fn retain_lists(&mut self) -> LoadReport {
        let mut lists = self.empty_lists();
        let mut report = LoadReport::default();

        for (column, cards) in self.column_cards.drain() {
            match lists.get_mut(&column) {
                Some(list) => {
                    report.accepted += cards.len();
                    *list = cards;
                }
                None => {
                    if !cards.is_empty() {
                        tracing::warn!(
                            column = %column,
                            cards = cards.len(),
                            "dropping cards of removed column"
                        );
                    }
                    report.orphaned += cards.len();
                }
            }
        }

        self.column_cards = lists;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn id(s: &str) -> ColumnId {
        ColumnId::new(s)
    }

    fn cid(s: &str) -> CardId {
        CardId::new(s)
    }

    fn ids<'a>(board: &'a BoardState, column: &str) -> Vec<&'a str> {
        board.cards(&id(column)).iter().map(|c| c.id().as_str()).collect()
    }

    fn sample() -> BoardState {
        let mut board = BoardState::new();
        board.load(
            [
                Column::new("new", "New", 1),
                Column::new("inProgress", "In Progress", 2),
                Column::new("ready", "Ready", 3),
            ],
            [
                Card::new("c1", "new", "1st Card"),
                Card::new("c2", "new", "2nd Card"),
                Card::new("c3", "inProgress", "3rd Card"),
            ],
        );
        board
    }

    #[test]
    fn load_assigns_cards_in_input_order() {
        let board = sample();
        assert_eq!(ids(&board, "new"), ["c1", "c2"]);
        assert_eq!(ids(&board, "inProgress"), ["c3"]);
        assert!(board.cards(&id("ready")).is_empty());
        assert_eq!(board.card_count(), 3);
        assert_eq!(board.revision(), 1);
    }

    #[test]
    fn load_drops_orphans_and_bad_ids() {
        let mut board = BoardState::new();
        let report = board.load(
            [Column::new("a", "A", 0)],
            [
                Card::new("x", "a", "ok"),
                Card::new("y", "missing", "orphan"),
                Card::new("", "a", "no id"),
                Card::new("x", "a", "duplicate"),
            ],
        );
        assert_eq!(
            report,
            LoadReport {
                accepted: 1,
                orphaned: 1,
                rejected_ids: 2
            }
        );
        assert_eq!(report.dropped(), 3);
        assert_eq!(ids(&board, "a"), ["x"]);
        assert_eq!(board.card(&cid("x")).map(|c| c.title.as_str()), Some("ok"));
    }

    #[test]
    fn load_keeps_last_duplicate_column_at_first_position() {
        let mut board = BoardState::new();
        board.load(
            [
                Column::new("a", "First", 0),
                Column::new("b", "B", 0),
                Column::new("a", "Second", 0),
            ],
            [],
        );
        assert_eq!(board.column_ids(), [id("a"), id("b")]);
        assert_eq!(board.column(&id("a")).map(|c| c.title.as_str()), Some("Second"));
    }

    #[test]
    fn refresh_columns_only_keeps_lists() {
        let mut board = sample();
        board
            .move_to_column(&cid("c1"), &id("new"), &id("ready"))
            .unwrap();

        let report = board.refresh(
            Some(vec![
                Column::new("new", "New", 1),
                Column::new("ready", "Ready", 3),
                Column::new("done", "Done", 4),
            ]),
            None,
        );

        assert_eq!(ids(&board, "ready"), ["c1"]);
        assert_eq!(ids(&board, "new"), ["c2"]);
        assert!(board.cards(&id("done")).is_empty());
        assert!(board.column(&id("inProgress")).is_none());
        assert_eq!(report.orphaned, 1);
        assert!(board.card(&cid("c1")).unwrap().is_invalidated());
    }

    #[test]
    fn refresh_cards_only_keeps_columns() {
        let mut board = sample();
        let report = board.refresh(None, Some(vec![Card::new("c9", "ready", "fresh")]));
        assert_eq!(report.accepted, 1);
        assert_eq!(board.column_ids().len(), 3);
        assert_eq!(ids(&board, "ready"), ["c9"]);
        assert!(board.cards(&id("new")).is_empty());
    }

    #[test]
    fn refresh_with_nothing_is_a_no_op() {
        let mut board = sample();
        let revision = board.revision();
        assert_eq!(board.refresh(None, None), LoadReport::default());
        assert_eq!(board.revision(), revision);
    }

    #[test]
    fn move_to_column_appends_and_invalidates() {
        let mut board = sample();
        let moved = board
            .move_to_column(&cid("c1"), &id("new"), &id("inProgress"))
            .unwrap();
        assert!(moved);
        assert_eq!(ids(&board, "new"), ["c2"]);
        assert_eq!(ids(&board, "inProgress"), ["c3", "c1"]);

        let card = board.card(&cid("c1")).unwrap();
        assert_eq!(card.column_id(), &id("inProgress"));
        assert!(card.is_invalidated());
        assert!(!board.card(&cid("c3")).unwrap().is_invalidated());
    }

    #[test]
    fn move_to_same_column_is_a_no_op() {
        let mut board = sample();
        let revision = board.revision();
        assert_eq!(board.move_to_column(&cid("c1"), &id("new"), &id("new")), Ok(false));
        assert_eq!(board.revision(), revision);
        assert!(!board.card(&cid("c1")).unwrap().is_invalidated());
    }

    #[test]
    fn move_to_unknown_column_leaves_source_intact() {
        let mut board = sample();
        let err = board
            .move_to_column(&cid("c1"), &id("new"), &id("nope"))
            .unwrap_err();
        assert_eq!(err, BoardError::UnknownColumn(id("nope")));
        assert_eq!(ids(&board, "new"), ["c1", "c2"]);
    }

    #[test]
    fn move_card_from_wrong_column_errors() {
        let mut board = sample();
        let err = board
            .move_to_column(&cid("c3"), &id("new"), &id("ready"))
            .unwrap_err();
        assert_eq!(
            err,
            BoardError::CardNotInColumn {
                card: cid("c3"),
                column: id("new")
            }
        );
    }

    #[test]
    fn reorder_inserts_against_list_after_removal() {
        let mut board = BoardState::new();
        board.load(
            [Column::new("a", "A", 0)],
            ["1", "2", "3", "4"].map(|c| Card::new(c, "a", c)),
        );

        // Moving down: lands after the element that was at the target index.
        board.reorder_within_column(&id("a"), &cid("1"), 2).unwrap();
        assert_eq!(ids(&board, "a"), ["2", "3", "1", "4"]);

        // Moving up: lands before it.
        board.reorder_within_column(&id("a"), &cid("4"), 0).unwrap();
        assert_eq!(ids(&board, "a"), ["4", "2", "3", "1"]);

        // Past the end appends.
        board.reorder_within_column(&id("a"), &cid("4"), 99).unwrap();
        assert_eq!(ids(&board, "a"), ["2", "3", "1", "4"]);

        assert!(board.cards(&id("a")).iter().all(Card::is_invalidated));
    }

    #[test]
    fn set_hidden_bumps_revision_only_on_change() {
        let mut board = sample();
        let revision = board.revision();
        board.set_hidden(&cid("c2"), true).unwrap();
        assert!(board.card(&cid("c2")).unwrap().is_hidden());
        assert_eq!(board.revision(), revision + 1);
        board.set_hidden(&cid("c2"), true).unwrap();
        assert_eq!(board.revision(), revision + 1);
        assert_eq!(
            board.set_hidden(&cid("zz"), true),
            Err(BoardError::UnknownCard(cid("zz")))
        );
    }

    #[test]
    fn scroll_fields_live_on_the_column() {
        let mut board = sample();
        board.set_scroll_offset(&id("new"), 120.0).unwrap();
        board.set_content_height(&id("new"), 900.0).unwrap();
        let column = board.column(&id("new")).unwrap();
        assert_eq!(column.scroll_offset(), 120.0);
        assert_eq!(column.content_height(), 900.0);
        assert!(board.set_scroll_offset(&id("zz"), 1.0).is_err());
    }

    #[test]
    fn invalidate_and_clear() {
        let mut board = sample();
        board.invalidate_column(&id("new")).unwrap();
        assert!(board.has_invalidated(&id("new")));
        board.clear_invalidated(&cid("c1"));
        assert!(board.has_invalidated(&id("new")));
        board.clear_invalidated(&cid("c2"));
        assert!(!board.has_invalidated(&id("new")));
        board.invalidate_card(&cid("c3")).unwrap();
        assert!(board.has_invalidated(&id("inProgress")));
    }
}
