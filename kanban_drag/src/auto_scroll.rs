// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-scroll of a column while a card is dragged near its top or bottom edge.
//!
//! The decision is split in two pure steps: [`scrolling_direction`] looks at
//! the pointer against the column rectangle, and [`should_scroll`] checks
//! that the column has room to move that way. The throttled scroll itself is
//! issued by the session, which owns the cooldown timer.

use kurbo::Rect;

use kanban_board::Column;

/// Which edge band the pointer is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollDirection {
    /// `-1` to scroll up, `1` to scroll down, `0` for neither.
    pub offset: i8,
    /// Whether the pointer is in any edge band.
    pub scrolling: bool,
}

/// Edge band the pointer at `pointer_y` falls into for a column at `column_rect`.
///
/// A band extends `threshold` on both sides of an edge, bounds exclusive.
/// When the column is short enough that both bands contain the pointer, the
/// bottom band wins. Returns `None` when the column has no rectangle.
#[must_use]
pub fn scrolling_direction(
    column_rect: Option<Rect>,
    pointer_y: f64,
    threshold: f64,
) -> Option<ScrollDirection> {
    let rect = column_rect?;
    let near = |edge: f64| pointer_y > edge - threshold && pointer_y < edge + threshold;
    let upper = near(rect.y0);
    let lower = near(rect.y1);

    let offset = if lower {
        1
    } else if upper {
        -1
    } else {
        0
    };
    Some(ScrollDirection {
        offset,
        scrolling: upper || lower,
    })
}

/// Whether `column` can scroll in `direction`.
#[must_use]
pub fn should_scroll(direction: ScrollDirection, column: &Column) -> bool {
    if !direction.scrolling {
        return false;
    }
    match direction.offset {
        o if o < 0 => column.scroll_offset() > 0.0,
        o if o > 0 => column.scroll_offset() < column.content_height(),
        _ => false,
    }
}

/// Scroll offset after one step of `step` in direction `offset`.
///
/// The result stays within `0..=content_height`.
#[must_use]
pub fn next_scroll_offset(column: &Column, offset: i8, step: f64) -> f64 {
    let target = column.scroll_offset() + step * f64::from(offset);
    target.clamp(0.0, column.content_height().max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMN: Rect = Rect::new(0.0, 100.0, 200.0, 700.0);

    fn direction(y: f64) -> ScrollDirection {
        scrolling_direction(Some(COLUMN), y, 100.0).unwrap()
    }

    #[test]
    fn bands_around_each_edge() {
        assert_eq!(direction(150.0).offset, -1);
        assert_eq!(direction(50.0).offset, -1);
        assert_eq!(direction(650.0).offset, 1);
        assert_eq!(direction(750.0).offset, 1);
        assert_eq!(direction(400.0), ScrollDirection::default());
    }

    #[test]
    fn band_bounds_are_exclusive() {
        assert!(!direction(200.0).scrolling);
        assert!(!direction(0.0).scrolling);
        assert!(!direction(600.0).scrolling);
        assert!(!direction(800.0).scrolling);
        assert!(direction(199.0).scrolling);
    }

    #[test]
    fn bottom_wins_on_short_columns() {
        let short = Rect::new(0.0, 100.0, 200.0, 250.0);
        let dir = scrolling_direction(Some(short), 175.0, 100.0).unwrap();
        assert_eq!(dir.offset, 1);
        assert!(dir.scrolling);
    }

    #[test]
    fn no_rect_means_no_direction() {
        assert_eq!(scrolling_direction(None, 150.0, 100.0), None);
    }

    #[test]
    fn scrolling_needs_room() {
        let mut board = kanban_board::BoardState::new();
        board.load([Column::new("a", "A", 0)], []);
        let id = kanban_board::ColumnId::new("a");
        board.set_content_height(&id, 300.0).unwrap();

        let up = ScrollDirection {
            offset: -1,
            scrolling: true,
        };
        let down = ScrollDirection {
            offset: 1,
            scrolling: true,
        };
        let column = board.column(&id).unwrap();
        assert!(!should_scroll(up, column));
        assert!(should_scroll(down, column));
        assert!(!should_scroll(ScrollDirection::default(), column));

        board.set_scroll_offset(&id, 300.0).unwrap();
        let column = board.column(&id).unwrap();
        assert!(should_scroll(up, column));
        assert!(!should_scroll(down, column));
        assert_eq!(next_scroll_offset(column, 1, 40.0), 300.0);
        assert_eq!(next_scroll_offset(column, -1, 40.0), 260.0);
    }
}
