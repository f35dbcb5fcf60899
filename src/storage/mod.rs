use crate::{
    auth::User,
    domain::{
        ordering, Board, BoardDetail, BoardId, Card, CardId, Column, ColumnDetail, ColumnId,
    },
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;

pub mod memory;

/// Storage trait for boards, columns, cards and users.
///
/// Listings return siblings in stable store order (creation time, then
/// id); display ordering by ordinal is applied on top by the callers.
/// `save_column` and `save_card` verify the parent exists, standing in
/// for the relational foreign keys of a database-backed store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves a board
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Loads a board by id
    async fn load_board(&self, id: &BoardId) -> Result<Board>;

    /// Lists all boards
    async fn list_boards(&self) -> Result<Vec<Board>>;

    /// Saves a column; fails when its board does not exist
    async fn save_column(&self, column: &Column) -> Result<()>;

    /// Loads a column by id
    async fn load_column(&self, id: &ColumnId) -> Result<Column>;

    /// Lists the columns of a board
    async fn list_columns(&self, board_id: &BoardId) -> Result<Vec<Column>>;

    /// Saves a card; fails when its column does not exist
    async fn save_card(&self, card: &Card) -> Result<()>;

    /// Loads a card by id
    async fn load_card(&self, id: &CardId) -> Result<Card>;

    /// Lists the cards of a column
    async fn list_cards(&self, column_id: &ColumnId) -> Result<Vec<Card>>;

    /// Finds a user by email or username
    async fn find_user(&self, identifier: &str) -> Result<Option<User>>;

    /// Saves a user
    async fn save_user(&self, user: &User) -> Result<()>;
}

/// Loads a board with its columns and cards nested, everything sorted
/// ascending by ordinal for display.
pub async fn load_board_detail(storage: &dyn Storage, id: &BoardId) -> Result<BoardDetail> {
    let board = storage.load_board(id).await?;
    let mut columns = Vec::new();

    for column in storage.list_columns(&board.id).await? {
        let mut cards = storage.list_cards(&column.id).await?;
        ordering::sort_ascending(&mut cards);
        columns.push(ColumnDetail { column, cards });
    }

    ordering::sort_ascending(&mut columns);
    Ok(BoardDetail { board, columns })
}

/// Loads every board in detail form
pub async fn list_board_details(storage: &dyn Storage) -> Result<Vec<BoardDetail>> {
    let boards = storage.list_boards().await?;
    let mut details = Vec::with_capacity(boards.len());

    for board in boards {
        details.push(load_board_detail(storage, &board.id).await?);
    }

    Ok(details)
}
