// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing: resolve the column and card under a pointer.
//!
//! Only items that are rendered and visible take part, and cards waiting for a
//! fresh measurement are left out since their rectangles are stale.
//! [`card_at_position`] is the resolver used while dragging; it is written so
//! that a probe taller or shorter than its target does not flicker between two
//! neighbors while crossing a boundary.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::layout::LayoutTracker;
use crate::model::{Card, Column, ColumnId};
use crate::state::BoardState;

/// An item paired with the rectangle it was last measured at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placed<T> {
    /// The item.
    pub item: T,
    /// Its absolute on-screen rectangle.
    pub rect: Rect,
}

/// Rendered and visible columns, in board order.
#[must_use]
pub fn visible_columns<'a>(
    board: &'a BoardState,
    layout: &LayoutTracker,
) -> Vec<Placed<&'a Column>> {
    board
        .columns()
        .filter_map(|column| {
            layout
                .column(column.id())
                .visible_rect()
                .map(|rect| Placed { item: column, rect })
        })
        .collect()
}

/// Rendered, visible, and freshly measured cards of a column, in list order.
#[must_use]
pub fn visible_cards<'a>(
    board: &'a BoardState,
    layout: &LayoutTracker,
    column: &ColumnId,
) -> Vec<Placed<&'a Card>> {
    board
        .cards(column)
        .iter()
        .filter(|card| !card.is_invalidated())
        .filter_map(|card| {
            layout
                .card(card.id())
                .visible_rect()
                .map(|rect| Placed { item: card, rect })
        })
        .collect()
}

/// The first visible column whose horizontal extent contains `x` (edges inclusive).
#[must_use]
pub fn find_column<'a>(
    board: &'a BoardState,
    layout: &LayoutTracker,
    x: f64,
) -> Option<&'a Column> {
    visible_columns(board, layout)
        .into_iter()
        .find(|placed| placed.rect.x0 <= x && x <= placed.rect.x1)
        .map(|placed| placed.item)
}

/// The visible card of `column` at vertical coordinate `y`.
///
/// The probe is as tall as the first visible card, with its top at `y`.
#[must_use]
pub fn find_card_in_column<'a>(
    column: &ColumnId,
    board: &'a BoardState,
    layout: &LayoutTracker,
    y: f64,
) -> Option<&'a Card> {
    let items = visible_cards(board, layout, column);
    let template = items.first()?.rect;
    let probe = Rect::from_origin_size((template.x0, y), template.size());
    card_at_position(&items, y, probe)
}

/// Resolves which of an ordered list of items a probe at `y` is over.
///
/// For each item the probe may capture a band of its height:
/// - if the two heights differ by more than the item's own height, the whole item;
/// - otherwise, when `y` is above the probe's top, the item minus `height_diff` at
///   its bottom;
/// - otherwise the item minus `height_diff` at its top.
///
/// Band edges are exclusive. The first item whose band contains `y` wins. If
/// none does, `y` at or above the first item's top clamps to the first item and
/// `y` at or below the last item's top clamps to the last one.
#[must_use]
pub fn card_at_position<T: Copy>(items: &[Placed<T>], y: f64, probe: Rect) -> Option<T> {
    let first = items.first()?;
    let last = items.last()?;

    if let Some(hit) = items.iter().find(|placed| within_band(y, probe, placed.rect)) {
        return Some(hit.item);
    }
    if y <= first.rect.y0 {
        return Some(first.item);
    }
    if y >= last.rect.y0 {
        return Some(last.item);
    }
    None
}

fn within_band(y: f64, probe: Rect, item: Rect) -> bool {
    let height_diff = (probe.height() - item.height()).abs();
    let (top, bottom) = if height_diff > item.height() {
        (item.y0, item.y1)
    } else if y < probe.y0 {
        (item.y0, item.y1 - height_diff)
    } else {
        (item.y0 + height_diff, item.y1)
    };
    y > top && y < bottom
}
