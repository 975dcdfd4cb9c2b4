// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `kanban_board` crate.
//!
//! These exercise the store invariants across arbitrary inputs, plus the hit
//! testing path against a measured board.

use kanban_board::{
    BoardState, Card, CardId, Column, ColumnId, ItemKey, LayoutTracker, hit,
};
use kurbo::Rect;
use proptest::prelude::*;

const COLUMNS: [&str; 3] = ["new", "inProgress", "ready"];

fn columns() -> Vec<Column> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(i, id)| Column::new(*id, *id, i as i64))
        .collect()
}

/// Cards with ids `c0..cN`, each naming one of the known columns or "missing".
fn arb_cards() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(0_usize..4, 0..24).prop_map(|slots| {
        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                let column = COLUMNS.get(slot).copied().unwrap_or("missing");
                Card::new(format!("c{i}"), column, format!("Card {i}"))
            })
            .collect()
    })
}

fn sorted_ids(board: &BoardState, column: &ColumnId) -> Vec<String> {
    let mut ids: Vec<String> = board
        .cards(column)
        .iter()
        .map(|c| c.id().as_str().to_owned())
        .collect();
    ids.sort();
    ids
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn load_places_each_accepted_card_exactly_once(cards in arb_cards()) {
        let mut board = BoardState::new();
        let expected_orphans = cards.iter().filter(|c| c.column_id().as_str() == "missing").count();
        let report = board.load(columns(), cards.clone());

        prop_assert_eq!(report.orphaned, expected_orphans);
        prop_assert_eq!(report.accepted + report.dropped(), cards.len());
        prop_assert_eq!(board.card_count(), report.accepted);

        for id in board.column_ids() {
            for card in board.cards(id) {
                prop_assert_eq!(card.column_id(), id);
                let occurrences = board
                    .column_ids()
                    .iter()
                    .flat_map(|c| board.cards(c))
                    .filter(|other| other.id() == card.id())
                    .count();
                prop_assert_eq!(occurrences, 1);
            }
        }
        prop_assert!(board.column(&ColumnId::new("missing")).is_none());
        prop_assert_eq!(board.column_ids().len(), COLUMNS.len());
    }

    #[test]
    fn reorder_only_changes_order(cards in arb_cards(), pick in any::<prop::sample::Index>(), target in 0_usize..30) {
        let mut board = BoardState::new();
        board.load(columns(), cards);
        let column = ColumnId::new("new");
        let list = board.cards(&column);
        prop_assume!(!list.is_empty());

        let card = list[pick.index(list.len())].id().clone();
        let before = sorted_ids(&board, &column);
        let len = board.cards(&column).len();

        board.reorder_within_column(&column, &card, target).unwrap();

        prop_assert_eq!(board.cards(&column).len(), len);
        prop_assert_eq!(sorted_ids(&board, &column), before);
        prop_assert_eq!(board.index_of(&column, &card), Some(target.min(len - 1)));
    }

    #[test]
    fn cross_column_move_appends(cards in arb_cards(), pick in any::<prop::sample::Index>()) {
        let mut board = BoardState::new();
        board.load(columns(), cards);
        let from = ColumnId::new("new");
        let to = ColumnId::new("ready");
        let list = board.cards(&from);
        prop_assume!(!list.is_empty());
        let card = list[pick.index(list.len())].id().clone();
        let total = board.card_count();

        prop_assert_eq!(board.move_to_column(&card, &from, &to), Ok(true));

        prop_assert!(board.index_of(&from, &card).is_none());
        prop_assert_eq!(board.cards(&to).last().map(Card::id), Some(&card));
        prop_assert_eq!(board.column_of(&card), Some(&to));
        prop_assert_eq!(board.card_count(), total);
    }
}

fn measure(board: &mut BoardState, layout: &mut LayoutTracker, key: ItemKey, rect: Rect) {
    layout.on_measured(board, &key, Some(rect));
}

#[test]
fn hit_testing_skips_invalidated_and_hidden_columns() {
    let mut board = BoardState::new();
    board.load(
        columns(),
        [
            Card::new("c1", "new", "one"),
            Card::new("c2", "new", "two"),
        ],
    );
    let mut layout = LayoutTracker::new();
    let col = |s: &str| ItemKey::Column(ColumnId::new(s));
    let card = |s: &str| ItemKey::Card(CardId::new(s));

    measure(&mut board, &mut layout, col("new"), Rect::new(10.0, 50.0, 210.0, 650.0));
    measure(&mut board, &mut layout, col("inProgress"), Rect::new(220.0, 50.0, 420.0, 650.0));
    measure(&mut board, &mut layout, card("c1"), Rect::new(20.0, 100.0, 200.0, 160.0));
    measure(&mut board, &mut layout, card("c2"), Rect::new(20.0, 160.0, 200.0, 220.0));

    // "ready" was never measured, so nothing resolves over it.
    assert!(hit::find_column(&board, &layout, 500.0).is_none());
    // Edges are inclusive.
    assert_eq!(
        hit::find_column(&board, &layout, 210.0).map(|c| c.id().as_str()),
        Some("new")
    );

    let new = ColumnId::new("new");
    assert_eq!(
        hit::find_card_in_column(&new, &board, &layout, 170.0).map(|c| c.id().as_str()),
        Some("c2")
    );

    board.invalidate_card(&CardId::new("c2")).unwrap();
    let visible: Vec<_> = hit::visible_cards(&board, &layout, &new)
        .into_iter()
        .map(|p| p.item.id().as_str())
        .collect();
    assert_eq!(visible, ["c1"]);

    // Only c1 remains; 170 is below its top, so it clamps to it.
    assert_eq!(
        hit::find_card_in_column(&new, &board, &layout, 170.0).map(|c| c.id().as_str()),
        Some("c1")
    );
}

#[test]
fn empty_column_has_no_card_under_pointer() {
    let mut board = BoardState::new();
    board.load(columns(), []);
    let layout = LayoutTracker::new();
    assert!(hit::find_card_in_column(&ColumnId::new("ready"), &board, &layout, 100.0).is_none());
}
