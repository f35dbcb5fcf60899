pub mod board;
pub mod card;
pub mod ordering;

pub use board::{
    default_columns, Board, BoardDetail, BoardId, Column, ColumnDetail, ColumnId,
    DEFAULT_COLUMN_TITLES,
};
pub use card::{Card, CardId, Comment, CommentId, Priority};
pub use ordering::{next_order, sort_ascending, Ordered};
