use crate::{
    auth::User,
    domain::{Board, BoardId, Card, CardId, Column, ColumnId},
    error::{CorkboardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory storage backend. Semantics match [`FileStorage`]: typed
/// not-found errors, parent-existence checks on save, listings in
/// (creation time, id) order. Used as the test seam for the HTTP layer
/// and as a storage option for embedders.
///
/// [`FileStorage`]: crate::storage::file_storage::FileStorage
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    boards: HashMap<BoardId, Board>,
    columns: HashMap<ColumnId, Column>,
    cards: HashMap<CardId, Card>,
    users: HashMap<String, User>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_creation<T, K>(mut items: Vec<T>, key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, K)) -> Vec<T>
where
    K: Ord,
{
    items.sort_by(|a, b| key(a).cmp(&key(b)));
    items
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        let mut tables = self.inner.write().await;
        tables.boards.insert(board.id.clone(), board.clone());
        Ok(())
    }

    async fn load_board(&self, id: &BoardId) -> Result<Board> {
        let tables = self.inner.read().await;
        tables
            .boards
            .get(id)
            .cloned()
            .ok_or_else(|| CorkboardError::BoardNotFound(id.to_string()))
    }

    async fn list_boards(&self) -> Result<Vec<Board>> {
        let tables = self.inner.read().await;
        Ok(sorted_by_creation(
            tables.boards.values().cloned().collect(),
            |board| (board.created_at, board.id.as_str().to_string()),
        ))
    }

    async fn save_column(&self, column: &Column) -> Result<()> {
        let mut tables = self.inner.write().await;
        if !tables.boards.contains_key(&column.board_id) {
            return Err(CorkboardError::BoardNotFound(column.board_id.to_string()));
        }
        tables.columns.insert(column.id.clone(), column.clone());
        Ok(())
    }

    async fn load_column(&self, id: &ColumnId) -> Result<Column> {
        let tables = self.inner.read().await;
        tables
            .columns
            .get(id)
            .cloned()
            .ok_or_else(|| CorkboardError::ColumnNotFound(id.to_string()))
    }

    async fn list_columns(&self, board_id: &BoardId) -> Result<Vec<Column>> {
        let tables = self.inner.read().await;
        Ok(sorted_by_creation(
            tables
                .columns
                .values()
                .filter(|column| &column.board_id == board_id)
                .cloned()
                .collect(),
            |column| (column.created_at, column.id.as_str().to_string()),
        ))
    }

    async fn save_card(&self, card: &Card) -> Result<()> {
        let mut tables = self.inner.write().await;
        if !tables.columns.contains_key(&card.column_id) {
            return Err(CorkboardError::ColumnNotFound(card.column_id.to_string()));
        }
        tables.cards.insert(card.id.clone(), card.clone());
        Ok(())
    }

    async fn load_card(&self, id: &CardId) -> Result<Card> {
        let tables = self.inner.read().await;
        tables
            .cards
            .get(id)
            .cloned()
            .ok_or_else(|| CorkboardError::CardNotFound(id.to_string()))
    }

    async fn list_cards(&self, column_id: &ColumnId) -> Result<Vec<Card>> {
        let tables = self.inner.read().await;
        Ok(sorted_by_creation(
            tables
                .cards
                .values()
                .filter(|card| &card.column_id == column_id)
                .cloned()
                .collect(),
            |card| (card.created_at, card.id.as_str().to_string()),
        ))
    }

    async fn find_user(&self, identifier: &str) -> Result<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.email == identifier || user.username == identifier)
            .cloned())
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        let mut tables = self.inner.write().await;
        tables
            .users
            .insert(user.id.as_str().to_string(), user.clone());
        Ok(())
    }
}
