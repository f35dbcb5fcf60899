use crate::domain::card::Card;
use crate::domain::ordering::Ordered;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(String);

impl BoardId {
    /// Creates a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for BoardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ColumnId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-level container of columns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new board with the given title
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::new(),
            title,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ordered container of cards within a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub order: i64,
    pub board_id: BoardId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Creates a new column at the given ordinal
    pub fn new(title: String, order: i64, board_id: BoardId) -> Self {
        let now = Utc::now();
        Self {
            id: ColumnId::new(),
            title,
            order,
            board_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Sets the display ordinal. The value is taken as-is: collisions with
    /// sibling columns are allowed and resolve to stable store order.
    pub fn set_order(&mut self, order: i64) {
        self.order = order;
        self.updated_at = Utc::now();
    }
}

impl Ordered for Column {
    fn sort_order(&self) -> i64 {
        self.order
    }
}

/// Column titles seeded into every new board, in display order
pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Builds the default columns for a freshly created board, at orders 0..2
pub fn default_columns(board_id: &BoardId) -> Vec<Column> {
    DEFAULT_COLUMN_TITLES
        .iter()
        .enumerate()
        .map(|(order, title)| Column::new((*title).to_string(), order as i64, board_id.clone()))
        .collect()
}

/// A column together with its cards, sorted for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDetail {
    #[serde(flatten)]
    pub column: Column,
    pub cards: Vec<Card>,
}

impl Ordered for ColumnDetail {
    fn sort_order(&self) -> i64 {
        self.column.order
    }
}

/// A board together with its columns and cards, sorted for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<ColumnDetail>,
}
