// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-data board model: identifiers, cards, columns, and layout keys.

use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

/// Identifier of a card.
///
/// Card identifiers must be unique across the whole board and non-empty.
/// [`BoardState::load`](crate::BoardState::load) drops cards that violate either rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardId(String);

/// Identifier of a column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            /// Creates an identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns `true` if the identifier is the empty string.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $ty {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $ty {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(CardId);
string_id!(ColumnId);

/// Key of a measurable item in the [`LayoutTracker`](crate::LayoutTracker) side table.
///
/// Hosts attach one measurable view per key; the board itself never holds a
/// reference to a view.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// A column container.
    Column(ColumnId),
    /// A card inside a column list.
    Card(CardId),
}

impl From<CardId> for ItemKey {
    fn from(id: CardId) -> Self {
        Self::Card(id)
    }
}

impl From<ColumnId> for ItemKey {
    fn from(id: ColumnId) -> Self {
        Self::Column(id)
    }
}

/// A small colored label shown on a card. Opaque to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// Label text.
    pub text: String,
    /// Chip background color, in whatever notation the host renders.
    pub background_color: String,
    /// Label text color.
    pub text_color: String,
}

/// A draggable unit of content owned by exactly one column at a time.
///
/// Display fields are public and opaque to the board. The fields the board
/// and drag controller own (`column_id`, `hidden`, `invalidated`) are only
/// changed through [`BoardState`](crate::BoardState).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    id: CardId,
    column_id: ColumnId,
    /// Title line.
    pub title: String,
    /// Subtitle line.
    pub subtitle: String,
    /// Optional body text.
    pub description: Option<String>,
    /// Tag chips.
    pub tags: Vec<Tag>,
    /// Opaque handle to the host's domain object.
    pub item: Option<u64>,
    /// Host-defined sort key. The board orders by list position, not by this value.
    pub sort_order: i32,
    #[cfg_attr(feature = "serde", serde(skip))]
    hidden: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    invalidated: bool,
}

impl Card {
    /// Creates a card in `column_id` with the given title and empty display fields.
    pub fn new(
        id: impl Into<CardId>,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            title: title.into(),
            subtitle: String::new(),
            description: None,
            tags: Vec::new(),
            item: None,
            sort_order: 0,
            hidden: false,
            invalidated: false,
        }
    }

    /// Sets the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the tag chips.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the opaque host item handle.
    #[must_use]
    pub fn with_item(mut self, item: u64) -> Self {
        self.item = Some(item);
        self
    }

    /// Sets the host sort key.
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// The card's identifier.
    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// The column that currently owns this card.
    #[must_use]
    pub fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    /// `true` while the card is represented by the floating drag ghost.
    ///
    /// Hosts render a hidden card with zero opacity so the list keeps a gap.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// `true` between a mutation affecting this card and its next measurement.
    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub(crate) fn set_column_id(&mut self, column_id: ColumnId) {
        self.column_id = column_id;
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn set_invalidated(&mut self, invalidated: bool) {
        self.invalidated = invalidated;
    }
}

/// A named, ordered bucket of cards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    id: ColumnId,
    /// Header title.
    pub title: String,
    /// Opaque host value.
    pub value: i64,
    #[cfg_attr(feature = "serde", serde(skip))]
    scroll_offset: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    content_height: f64,
}

impl Column {
    /// Creates a column scrolled to the top with no content.
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>, value: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            value,
            scroll_offset: 0.0,
            content_height: 0.0,
        }
    }

    /// The column's identifier.
    #[must_use]
    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Vertical scroll position of the column's card list.
    ///
    /// This value is authoritative; the host list view follows it.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Total height of the column's scrollable content.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    pub(crate) fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    pub(crate) fn set_content_height(&mut self, height: f64) {
        self.content_height = height;
    }
}
