//! Client-side view state as an explicit reducer.
//!
//! The view holds the last fetched board snapshot; server-acknowledged
//! mutations are folded in as events. Events are only produced after a
//! request succeeds, so a failed call leaves the view exactly as it was.

use crate::domain::{BoardDetail, Card, CardId, ColumnDetail, ColumnId};

/// Events applied to the board view after server acknowledgment
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// A fresh snapshot replaces the whole view
    BoardLoaded(BoardDetail),
    /// A new column was created; it is appended after the existing ones
    ColumnAdded(ColumnDetail),
    /// A new card was created in the given column
    CardAdded { column_id: ColumnId, card: Card },
    /// A card was relocated to another column. The card is appended at
    /// the target's visual end; its ordinal is not consulted, since it
    /// carries the old rank and may collide with its new siblings.
    CardMoved {
        card_id: CardId,
        target_column_id: ColumnId,
    },
}

/// Reducer over the last fetched board snapshot
#[derive(Debug, Default, Clone)]
pub struct BoardView {
    board: Option<BoardDetail>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, if a board has been loaded
    pub fn board(&self) -> Option<&BoardDetail> {
        self.board.as_ref()
    }

    /// Folds one acknowledged event into the view. Events referencing
    /// unknown columns or cards are ignored.
    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::BoardLoaded(detail) => {
                self.board = Some(detail);
            }
            ViewEvent::ColumnAdded(column) => {
                if let Some(board) = self.board.as_mut() {
                    board.columns.push(column);
                }
            }
            ViewEvent::CardAdded { column_id, card } => {
                if let Some(board) = self.board.as_mut() {
                    if let Some(column) = board
                        .columns
                        .iter_mut()
                        .find(|detail| detail.column.id == column_id)
                    {
                        column.cards.push(card);
                    }
                }
            }
            ViewEvent::CardMoved {
                card_id,
                target_column_id,
            } => {
                let Some(board) = self.board.as_mut() else {
                    return;
                };

                let Some(source_idx) = board
                    .columns
                    .iter()
                    .position(|detail| detail.cards.iter().any(|card| card.id == card_id))
                else {
                    return;
                };

                // Both same-column moves and unknown targets leave the
                // view untouched.
                if board.columns[source_idx].column.id == target_column_id {
                    return;
                }
                let Some(target_idx) = board
                    .columns
                    .iter()
                    .position(|detail| detail.column.id == target_column_id)
                else {
                    return;
                };

                let Some(card_idx) = board.columns[source_idx]
                    .cards
                    .iter()
                    .position(|card| card.id == card_id)
                else {
                    return;
                };
                let mut card = board.columns[source_idx].cards.remove(card_idx);
                card.column_id = target_column_id;
                board.columns[target_idx].cards.push(card);
            }
        }
    }
}
