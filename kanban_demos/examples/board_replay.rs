// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless replay of a sample board.
//!
//! Loads three columns, drags a card across columns and another within its
//! column, presses a card, and logs every command the session sends.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p kanban_demos --example board_replay`

use kanban_board::CardId;
use kanban_demos::{ScriptedHost, card_center, column_center, sample_board, settle};
use kanban_drag::{DragConfig, DragSession};
use kurbo::Point;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let mut session = DragSession::new(ScriptedHost::default(), DragConfig::default());
    let (columns, cards) = sample_board();
    let report = session.load(columns, cards);
    tracing::info!(accepted = report.accepted, dropped = report.dropped(), "loaded");
    settle(&mut session);

    let mut now = 0_u64;

    // card1 from "new" into "inProgress", below card3.
    let Some(press) = card_center(session.board(), "card1") else {
        return;
    };
    let Some(target) = column_center(session.board(), "inProgress") else {
        return;
    };
    session.on_drag_start(press, now);
    step(&mut session, &mut now, Point::new(press.x + 60.0, press.y));
    step(&mut session, &mut now, target);
    session.on_drag_end();

    // card1 back up over card3 within "inProgress".
    let Some(press) = card_center(session.board(), "card1") else {
        return;
    };
    let Some(over) = card_center(session.board(), "card3") else {
        return;
    };
    session.on_drag_start(press, now);
    step(&mut session, &mut now, over);
    session.on_drag_end();

    session.on_card_press(&CardId::new("card2"));
    session.on_card_press(&CardId::new("card3"));

    for column in session.board().columns() {
        let titles: Vec<&str> = session
            .board()
            .cards(column.id())
            .iter()
            .map(|card| card.title.as_str())
            .collect();
        tracing::info!(column = %column.id(), ?titles, "final order");
    }
    tracing::info!(drops = session.host().drops.len(), "done");
}

fn step(session: &mut DragSession<ScriptedHost>, now: &mut u64, to: Point) {
    *now += 16;
    let outcome = session.on_gesture_event(to, *now);
    tracing::info!(?outcome, x = to.x, y = to.y, "move");
    settle(session);
}
