// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session controller.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use kanban_board::{
    BoardError, BoardState, Card, CardId, Column, ColumnId, ItemKey, LayoutTracker, LoadReport,
    hit,
};

use crate::auto_scroll::{next_scroll_offset, scrolling_direction, should_scroll};
use crate::config::{ColumnPolicy, DisplayMode, DragConfig};
use crate::error::DragError;
use crate::host::{BoardHost, DragEnded, Ghost};
use crate::pointer::{PointerTrack, ghost_rotation};
use crate::scheduler::{Scheduler, SnapDirection, SnapRequest};

/// Result of one drag move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The card was appended to another column.
    MovedToColumn {
        /// Column it left.
        from: ColumnId,
        /// Column it joined.
        to: ColumnId,
    },
    /// The card moved within its column.
    Reordered {
        /// The column.
        column: ColumnId,
        /// The card's new index.
        index: usize,
    },
    /// The target column is waiting for fresh measurements; try again next move.
    NotReady,
    /// No column or no card under the pointer.
    NoTarget,
    /// The pointer is over the dragged card itself.
    Unchanged,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum Remeasure {
    #[default]
    Nothing,
    Columns(SmallVec<[ColumnId; 2]>),
    Everything,
}

impl Remeasure {
    fn add(&mut self, column: &ColumnId) {
        match self {
            Self::Nothing => {
                let mut ids = SmallVec::new();
                ids.push(column.clone());
                *self = Self::Columns(ids);
            }
            Self::Columns(ids) => {
                if !ids.contains(column) {
                    ids.push(column.clone());
                }
            }
            Self::Everything => {}
        }
    }
}

#[derive(Clone, Debug)]
struct ActiveDrag {
    card: CardId,
    source: ColumnId,
    origin: Rect,
    offset: Vec2,
    rotation: f64,
}

/// Drives a drag from long press to drop.
///
/// The session owns the [`BoardState`] and [`LayoutTracker`] and talks to the
/// host through a [`BoardHost`]. All inbound events take the host's
/// millisecond clock where timing matters; nothing here blocks or spawns.
///
/// Gesture handlers never fail: host errors and unresolved references are
/// logged and the gesture carries on, and [`on_drag_end`](Self::on_drag_end)
/// always returns the session to idle.
#[derive(Debug)]
pub struct DragSession<H> {
    board: BoardState,
    layout: LayoutTracker,
    host: H,
    config: DragConfig,
    timers: Scheduler,
    pointer: PointerTrack,
    active: Option<ActiveDrag>,
    carousel_current: Option<ColumnId>,
    viewport: Option<Rect>,
    pending: Remeasure,
}

impl<H: BoardHost> DragSession<H> {
    /// Creates an idle session over an empty board.
    pub fn new(host: H, config: DragConfig) -> Self {
        Self {
            board: BoardState::new(),
            layout: LayoutTracker::new(),
            host,
            config,
            timers: Scheduler::new(),
            pointer: PointerTrack::default(),
            active: None,
            carousel_current: None,
            viewport: None,
            pending: Remeasure::Nothing,
        }
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Measured geometry.
    #[must_use]
    pub fn layout(&self) -> &LayoutTracker {
        &self.layout
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the session, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Timer slots.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.timers
    }

    /// Returns `true` between a successful drag start and the drag end.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The card being dragged.
    #[must_use]
    pub fn dragged_card(&self) -> Option<&CardId> {
        self.active.as_ref().map(|active| &active.card)
    }

    /// Current ghost state, while dragging.
    #[must_use]
    pub fn ghost(&self) -> Option<Ghost> {
        self.active.as_ref().map(|active| Ghost {
            card: active.card.clone(),
            origin: active.origin,
            offset: active.offset,
            rotation: active.rotation,
        })
    }

    /// The column the carousel is centered on.
    #[must_use]
    pub fn carousel_current(&self) -> Option<&ColumnId> {
        self.carousel_current.as_ref()
    }

    /// Returns `true` when mutations are waiting for [`after_layout`](Self::after_layout).
    #[must_use]
    pub fn has_pending_remeasure(&self) -> bool {
        self.pending != Remeasure::Nothing
    }

    /// Replaces the board. See [`BoardState::load`].
    ///
    /// A card being dragged stays hidden if it is still on the board; if it
    /// is gone, the drag carries on and its end reports no drop.
    pub fn load(
        &mut self,
        columns: impl IntoIterator<Item = Column>,
        cards: impl IntoIterator<Item = Card>,
    ) -> LoadReport {
        let report = self.board.load(columns, cards);
        self.board_replaced();
        report
    }

    /// Patches the board. See [`BoardState::refresh`].
    pub fn refresh(&mut self, columns: Option<Vec<Column>>, cards: Option<Vec<Card>>) -> LoadReport {
        let changed = columns.is_some() || cards.is_some();
        let report = self.board.refresh(columns, cards);
        if changed {
            self.board_replaced();
        }
        report
    }

    fn board_replaced(&mut self) {
        self.layout.forget_missing(&self.board);
        if let Some(active) = &self.active
            && let Err(err) = self.board.set_hidden(&active.card, true)
        {
            tracing::debug!(%err, "dragged card left the board");
        }
        let current_known = self
            .carousel_current
            .as_ref()
            .is_some_and(|id| self.board.column(id).is_some());
        if !current_known {
            self.carousel_current = self.board.column_ids().first().cloned();
        }
        self.pending = Remeasure::Everything;
    }

    /// Applies a measurement answer. See [`LayoutTracker::on_measured`].
    pub fn on_measured(&mut self, key: &ItemKey, rect: Option<Rect>) {
        self.layout.on_measured(&mut self.board, key, rect);
    }

    /// Records whether the host has a view for an item.
    pub fn set_attached(&mut self, key: &ItemKey, attached: bool) {
        self.layout.set_attached(key, attached);
    }

    /// A column's list reported which cards are on screen.
    pub fn on_visible_cards(&mut self, column: &ColumnId, visible: &[CardId]) {
        self.layout
            .set_visible_cards(&mut self.board, column, visible, &mut self.host);
    }

    /// A column's list finished scrolling to `offset`; everything is remeasured.
    pub fn on_column_scrolled(&mut self, column: &ColumnId, offset: f64) {
        if let Err(err) = self.board.set_scroll_offset(column, offset) {
            tracing::debug!(%err, "scroll report ignored");
            return;
        }
        self.remeasure(None);
    }

    /// A column's scrollable content changed height.
    pub fn on_content_size(&mut self, column: &ColumnId, height: f64) {
        if let Err(err) = self.board.set_content_height(column, height) {
            tracing::debug!(%err, "content size report ignored");
        }
    }

    /// The carousel came to rest on `column`; everything is remeasured.
    pub fn on_carousel_settled(&mut self, column: &ColumnId) {
        if self.board.column(column).is_none() {
            tracing::debug!(%column, "carousel settled on unknown column");
            return;
        }
        self.carousel_current = Some(column.clone());
        self.remeasure(None);
    }

    /// Sets the screen rectangle used for edge snapping.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
    }

    /// Requests measurements now, for one column or the whole board.
    pub fn remeasure(&mut self, column: Option<&ColumnId>) -> usize {
        self.layout
            .remeasure(&mut self.board, column, &mut self.host)
    }

    /// Runs the remeasurement queued by drag mutations.
    ///
    /// Call once the host has laid out the board's new order.
    pub fn after_layout(&mut self) -> usize {
        match core::mem::take(&mut self.pending) {
            Remeasure::Nothing => 0,
            Remeasure::Everything => self.remeasure(None),
            Remeasure::Columns(ids) => {
                let mut issued = 0;
                for id in &ids {
                    issued += self.remeasure(Some(id));
                }
                issued
            }
        }
    }

    /// Fires due timers.
    pub fn tick(&mut self, now: u64) {
        self.timers.expire(now);
        let Some(direction) = self.timers.take_due_snap(now) else {
            return;
        };
        if self.active.is_none() {
            return;
        }
        tracing::debug!(?direction, "carousel snap");
        if let Err(err) = self.host.snap_carousel(direction) {
            tracing::warn!(%err, "carousel snap failed");
        }
    }

    /// A tap on a card outside of a drag.
    ///
    /// Ignored while dragging, and in carousel mode unless the card is in the
    /// centered column.
    pub fn on_card_press(&mut self, card: &CardId) {
        if self.active.is_some() {
            tracing::debug!(%card, "press ignored while dragging");
            return;
        }
        let Some(card) = self.board.card(card) else {
            return;
        };
        if self.config.display_mode == DisplayMode::Carousel
            && self.carousel_current.as_ref() != Some(card.column_id())
        {
            tracing::debug!(card = %card.id(), "press outside the centered column");
            return;
        }
        if let Err(err) = self.host.card_pressed(card) {
            tracing::warn!(%err, "card press failed");
        }
    }

    /// Long press at `point`. Returns `true` when a drag started.
    pub fn on_drag_start(&mut self, point: Point, now: u64) -> bool {
        if self.active.is_some() {
            tracing::debug!("drag already in progress");
            return false;
        }
        let Some(source) = self.start_column(point) else {
            tracing::debug!(?point, "no column under drag start");
            return false;
        };
        let Some(card) = hit::find_card_in_column(&source, &self.board, &self.layout, point.y)
            .map(|card| card.id().clone())
        else {
            tracing::debug!(%source, "no card under drag start");
            return false;
        };
        let Some(origin) = self.layout.card(&card).rect else {
            return false;
        };
        if let Err(err) = self.board.set_hidden(&card, true) {
            tracing::debug!(%err, "drag start aborted");
            return false;
        }

        tracing::debug!(%card, %source, "drag started");
        self.pointer.start(point, now);
        self.active = Some(ActiveDrag {
            card,
            source,
            origin,
            offset: Vec2::ZERO,
            rotation: 0.0,
        });
        self.publish_ghost();
        true
    }

    fn start_column(&self, point: Point) -> Option<ColumnId> {
        match self.config.column_policy {
            ColumnPolicy::PointerHitTest => {
                hit::find_column(&self.board, &self.layout, point.x).map(|c| c.id().clone())
            }
            ColumnPolicy::CarouselCurrent => self
                .carousel_current
                .clone()
                .filter(|id| self.board.column(id).is_some()),
        }
    }

    /// Pointer moved to `point` during a drag.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn on_gesture_event(&mut self, point: Point, now: u64) -> Option<MoveOutcome> {
        self.active.as_ref()?;
        self.tick(now);

        if let Some(step) = self.pointer.update(point, now) {
            let offset = self.pointer.total_offset(point).unwrap_or_default();
            let rotation = ghost_rotation(
                step,
                self.config.ghost_rotation_gain,
                self.config.max_ghost_rotation,
            );
            if let Some(active) = self.active.as_mut() {
                active.offset = offset;
                active.rotation = rotation;
            }
            self.publish_ghost();
        }
        self.request_edge_snap(point, now);

        let Some(target) =
            hit::find_column(&self.board, &self.layout, point.x).map(|c| c.id().clone())
        else {
            return Some(MoveOutcome::NoTarget);
        };
        let outcome = match self.move_card(&target, point) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(%err, "move skipped");
                MoveOutcome::NoTarget
            }
        };
        self.auto_scroll(&target, point.y, now);
        Some(outcome)
    }

    fn request_edge_snap(&mut self, point: Point, now: u64) {
        let Some(viewport) = self.viewport else {
            return;
        };
        let margin = self.config.snap_edge_margin;
        let direction = if point.x < viewport.x0 + margin {
            SnapDirection::Previous
        } else if point.x > viewport.x1 - margin {
            SnapDirection::Next
        } else {
            return;
        };
        let due = now.saturating_add(self.config.snap_delay_ms);
        let request = self.timers.request_snap(direction, due);
        if request != SnapRequest::AlreadyPending {
            tracing::debug!(?direction, ?request, due, "carousel snap scheduled");
        }
    }

    /// Applies one drag step against `target`, the column under `pointer`.
    ///
    /// A different column appends the card there. The same column reorders
    /// the card to the index of the card under the pointer. Nothing moves
    /// while `target` has cards waiting for fresh measurements.
    pub fn move_card(&mut self, target: &ColumnId, pointer: Point) -> Result<MoveOutcome, DragError> {
        let active = self.active.as_ref().ok_or(DragError::NotDragging)?;
        let card = active.card.clone();
        let origin = active.origin;

        let from = self
            .board
            .column_of(&card)
            .cloned()
            .ok_or_else(|| BoardError::UnknownCard(card.clone()))?;
        if self.board.column(target).is_none() {
            return Err(BoardError::UnknownColumn(target.clone()).into());
        }
        if self.board.has_invalidated(target) {
            tracing::debug!(%target, "target column not measured yet");
            return Ok(MoveOutcome::NotReady);
        }

        if from != *target {
            self.board.move_to_column(&card, &from, target)?;
            self.pending.add(&from);
            self.pending.add(target);
            tracing::debug!(%card, %from, to = %target, "card moved to column");
            return Ok(MoveOutcome::MovedToColumn {
                from,
                to: target.clone(),
            });
        }

        let dragged = self.layout.card(&card).rect.unwrap_or(origin);
        let items = hit::visible_cards(&self.board, &self.layout, target);
        let Some(hovered) = hit::card_at_position(&items, pointer.y, dragged) else {
            return Ok(MoveOutcome::NoTarget);
        };
        if hovered.id() == &card {
            return Ok(MoveOutcome::Unchanged);
        }
        let hovered = hovered.id().clone();
        let index = self
            .board
            .index_of(target, &hovered)
            .ok_or_else(|| BoardError::CardNotInColumn {
                card: hovered.clone(),
                column: target.clone(),
            })?;

        self.board.reorder_within_column(target, &card, index)?;
        self.pending.add(target);
        tracing::debug!(%card, column = %target, index, "card reordered");
        Ok(MoveOutcome::Reordered {
            column: target.clone(),
            index,
        })
    }

    fn auto_scroll(&mut self, column: &ColumnId, pointer_y: f64, now: u64) {
        let Some(state) = self.board.column(column) else {
            return;
        };
        let rect = self.layout.column(column).rect;
        let Some(direction) = scrolling_direction(rect, pointer_y, self.config.scroll_threshold)
        else {
            return;
        };
        if !should_scroll(direction, state) {
            return;
        }
        if let Err(err) = self.scroll(column, direction.offset, now) {
            tracing::warn!(%err, "auto-scroll failed");
        }
    }

    /// Scrolls `column` one step in direction `offset` (`-1` up, `1` down).
    ///
    /// Returns `Ok(false)` without doing anything when no drag is in progress
    /// or the previous step's cooldown has not run out.
    pub fn scroll(&mut self, column: &ColumnId, offset: i8, now: u64) -> Result<bool, DragError> {
        if self.active.is_none() || self.timers.scroll_cooling_down(now) {
            return Ok(false);
        }
        let state = self
            .board
            .column(column)
            .ok_or_else(|| BoardError::UnknownColumn(column.clone()))?;
        let next = next_scroll_offset(state, offset, self.config.scroll_step);
        self.board.set_scroll_offset(column, next)?;
        self.timers
            .start_scroll_cooldown(now.saturating_add(self.config.scroll_cooldown_ms));

        if let Some(state) = self.board.column(column) {
            self.host.scroll_column_to(state, next)?;
        }
        Ok(true)
    }

    /// The drag gesture ended or was cancelled.
    ///
    /// Always leaves the session idle. Returns the drop that was reported to
    /// the host, or `None` when there was no drag or its card or columns no
    /// longer resolve.
    pub fn on_drag_end(&mut self) -> Option<DragEnded> {
        self.timers.clear();
        self.pointer.end();
        let Some(active) = self.active.take() else {
            tracing::debug!("drag end without a drag");
            return None;
        };

        if let Err(err) = self.board.set_hidden(&active.card, false) {
            tracing::debug!(%err, "dragged card no longer on the board");
        }
        if let Err(err) = self.host.ghost_changed(None) {
            tracing::warn!(%err, "ghost reset failed");
        }

        let Some(ended) = self.resolve_drop(&active) else {
            tracing::debug!(card = %active.card, "drop did not resolve");
            return None;
        };
        tracing::debug!(
            card = %active.card,
            source = %ended.source.id(),
            destination = %ended.destination.id(),
            index = ended.index,
            "drag ended"
        );
        if let Err(err) = self.host.drag_ended(&ended) {
            tracing::warn!(%err, "drag end notification failed");
        }
        Some(ended)
    }

    fn resolve_drop(&self, active: &ActiveDrag) -> Option<DragEnded> {
        let card = self.board.card(&active.card)?;
        let destination = self.board.column(card.column_id())?;
        let source = self.board.column(&active.source)?;
        let index = self.board.index_of(destination.id(), card.id())?;
        Some(DragEnded {
            source: source.clone(),
            destination: destination.clone(),
            card: card.clone(),
            index,
        })
    }

    fn publish_ghost(&mut self) {
        let ghost = self.ghost();
        if let Err(err) = self.host.ghost_changed(ghost.as_ref()) {
            tracing::warn!(%err, "ghost update failed");
        }
    }
}
