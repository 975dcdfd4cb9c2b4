// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the headless board demos.
//!
//! [`ScriptedHost`] stands in for a UI toolkit: it lays columns out left to
//! right and cards top to bottom in list order, answers measurement requests
//! when [`settle`] is called, and logs every command the session sends.

use kanban_board::{BoardState, Card, CardId, Column, ColumnId, ItemKey, Measurer, Tag};
use kanban_drag::{BoardHost, DragEnded, DragSession, Ghost, HostError, SnapDirection};
use kurbo::Rect;

/// Horizontal pitch of the column carousel.
pub const COLUMN_PITCH: f64 = 220.0;
/// Vertical pitch of cards in a column.
pub const CARD_PITCH: f64 = 90.0;

/// A host that answers measurements from list positions and logs commands.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pending: Vec<ItemKey>,
    /// Drops reported by the session, in order.
    pub drops: Vec<DragEnded>,
}

impl Measurer for ScriptedHost {
    fn measure(&mut self, key: &ItemKey) {
        self.pending.push(key.clone());
    }
}

impl BoardHost for ScriptedHost {
    fn card_pressed(&mut self, card: &Card) -> Result<(), HostError> {
        tracing::info!(title = %card.title, "card pressed");
        Ok(())
    }

    fn drag_ended(&mut self, ended: &DragEnded) -> Result<(), HostError> {
        tracing::info!(
            item = %ended.card.title,
            from = %ended.source.id(),
            to = %ended.destination.id(),
            index = ended.index,
            "card finished dragging"
        );
        self.drops.push(ended.clone());
        Ok(())
    }

    fn scroll_column_to(&mut self, column: &Column, offset: f64) -> Result<(), HostError> {
        tracing::info!(column = %column.id(), offset, "scroll column");
        Ok(())
    }

    fn snap_carousel(&mut self, direction: SnapDirection) -> Result<(), HostError> {
        tracing::info!(?direction, "snap carousel");
        Ok(())
    }

    fn ghost_changed(&mut self, ghost: Option<&Ghost>) -> Result<(), HostError> {
        match ghost {
            Some(ghost) => tracing::trace!(
                card = %ghost.card,
                dx = ghost.offset.x,
                dy = ghost.offset.y,
                rotation = ghost.rotation,
                "ghost"
            ),
            None => tracing::trace!("ghost released"),
        }
        Ok(())
    }
}

/// Where the scripted layout puts an item, or `None` if it is not on the board.
#[must_use]
pub fn layout_rect(board: &BoardState, key: &ItemKey) -> Option<Rect> {
    match key {
        ItemKey::Column(id) => {
            let i = board.column_ids().iter().position(|c| c == id)?;
            let x0 = 20.0 + COLUMN_PITCH * i as f64;
            Some(Rect::new(x0, 80.0, x0 + 200.0, 780.0))
        }
        ItemKey::Card(id) => {
            let column = board.column_of(id)?;
            let i = board.column_ids().iter().position(|c| c == column)?;
            let row = board.index_of(column, id)?;
            let x0 = 30.0 + COLUMN_PITCH * i as f64;
            let y0 = 120.0 + CARD_PITCH * row as f64;
            Some(Rect::new(x0, y0, x0 + 180.0, y0 + 80.0))
        }
    }
}

/// Center of a card's scripted rectangle.
#[must_use]
pub fn card_center(board: &BoardState, card: &str) -> Option<kurbo::Point> {
    layout_rect(board, &ItemKey::Card(CardId::new(card))).map(|rect| rect.center())
}

/// Center of a column's scripted rectangle.
#[must_use]
pub fn column_center(board: &BoardState, column: &str) -> Option<kurbo::Point> {
    layout_rect(board, &ItemKey::Column(ColumnId::new(column))).map(|rect| rect.center())
}

/// Lays the board out and answers every outstanding measurement request.
pub fn settle(session: &mut DragSession<ScriptedHost>) -> usize {
    session.after_layout();
    let pending = core::mem::take(&mut session.host_mut().pending);
    let answered = pending.len();
    for key in pending {
        let rect = layout_rect(session.board(), &key);
        session.on_measured(&key, rect);
    }
    answered
}

/// The three-column sample board.
#[must_use]
pub fn sample_board() -> (Vec<Column>, Vec<Card>) {
    let tag = |text: &str, background: &str| Tag {
        text: text.to_owned(),
        background_color: background.to_owned(),
        text_color: "#000000".to_owned(),
    };
    let columns = vec![
        Column::new("new", "New", 1),
        Column::new("inProgress", "In Progress", 2),
        Column::new("ready", "Ready", 3),
    ];
    let cards = vec![
        Card::new("card1", "new", "1st Card")
            .with_subtitle("Example card")
            .with_description("test description")
            .with_tags([tag("Tag1", "#00FF00")])
            .with_sort_order(1),
        Card::new("card2", "new", "2nd Card")
            .with_subtitle("Example card")
            .with_description("test description")
            .with_tags([tag("Tag2", "#FFA500")])
            .with_sort_order(2),
        Card::new("card3", "inProgress", "3rd Card")
            .with_subtitle("Example card")
            .with_description("test description")
            .with_sort_order(1),
    ];
    (columns, cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_drag::DragConfig;

    #[test]
    fn sample_board_settles_into_view() {
        let mut session = DragSession::new(ScriptedHost::default(), DragConfig::default());
        let (columns, cards) = sample_board();
        session.load(columns, cards);
        assert_eq!(settle(&mut session), 6);

        let board = session.board();
        let center = card_center(board, "card2").unwrap();
        let card = kanban_board::hit::find_card_in_column(
            &ColumnId::new("new"),
            board,
            session.layout(),
            center.y,
        )
        .unwrap();
        assert_eq!(card.id().as_str(), "card2");
        assert!(column_center(board, "missing").is_none());
    }
}
