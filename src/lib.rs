//! # Corkboard
//!
//! Kanban board service: boards containing ordered columns containing
//! ordered cards with metadata (due date, assignee, priority, comments).
//!
//! The crate provides the domain model and ordering rules, a pluggable
//! async storage layer, password/JWT login, the REST API surface, and a
//! view-state reducer for clients reconciling optimistic updates.

pub mod api;
pub mod auth;
pub mod domain;
pub mod error;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardDetail, BoardId, Column, ColumnDetail, ColumnId},
    card::{Card, CardId, Comment, CommentId, Priority},
};
pub use error::{CorkboardError, Result};
pub use storage::Storage;
