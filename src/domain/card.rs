use crate::domain::board::ColumnId;
use crate::domain::ordering::Ordered;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a comment. Client-generated ids are accepted
/// as-is, so the inner value is an arbitrary string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(String);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for CommentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Card priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A comment on a card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(content: String, author: String) -> Self {
        Self {
            id: CommentId::new(),
            content,
            author,
            created_at: Utc::now(),
        }
    }
}

/// A unit of work belonging to exactly one column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub content: String,
    pub order: i64,
    pub column_id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a new card at the given ordinal within a column
    pub fn new(content: String, order: i64, column_id: ColumnId) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::new(),
            content,
            order,
            column_id,
            due_date: None,
            assigned_to: None,
            priority: None,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the content
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Sets the display ordinal. Taken as-is, collisions allowed.
    pub fn set_order(&mut self, order: i64) {
        self.order = order;
        self.updated_at = Utc::now();
    }

    /// Relocates the card to another column. The `order` is deliberately
    /// left untouched: the card carries its old numeric rank into the new
    /// column and is not re-ranked among its new siblings.
    pub fn move_to_column(&mut self, column_id: ColumnId) {
        self.column_id = column_id;
        self.updated_at = Utc::now();
    }

    /// Sets the due date
    pub fn set_due_date(&mut self, due_date: DateTime<Utc>) {
        self.due_date = Some(due_date);
        self.updated_at = Utc::now();
    }

    /// Sets the assignee
    pub fn set_assigned_to(&mut self, assigned_to: String) {
        self.assigned_to = Some(assigned_to);
        self.updated_at = Utc::now();
    }

    /// Sets the priority
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = Some(priority);
        self.updated_at = Utc::now();
    }

    /// Replaces the comment list wholesale. Comments are not persisted
    /// individually: each card update carries the full array.
    pub fn replace_comments(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
        self.updated_at = Utc::now();
    }
}

impl Ordered for Card {
    fn sort_order(&self) -> i64 {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let column_id = ColumnId::new();
        let card = Card::new("Write docs".to_string(), 0, column_id.clone());

        assert_eq!(card.content, "Write docs");
        assert_eq!(card.order, 0);
        assert_eq!(card.column_id, column_id);
        assert!(card.due_date.is_none());
        assert!(card.assigned_to.is_none());
        assert!(card.priority.is_none());
        assert!(card.comments.is_empty());
    }

    #[test]
    fn test_move_to_column_keeps_order() {
        let mut card = Card::new("Task".to_string(), 5, ColumnId::new());
        let target = ColumnId::new();

        card.move_to_column(target.clone());

        assert_eq!(card.column_id, target);
        assert_eq!(card.order, 5);
    }

    #[test]
    fn test_setters_update_updated_at() {
        let mut card = Card::new("Task".to_string(), 0, ColumnId::new());
        let initial = card.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        card.set_content("Renamed".to_string());

        assert!(card.updated_at > initial);
    }

    #[test]
    fn test_replace_comments_is_wholesale() {
        let mut card = Card::new("Task".to_string(), 0, ColumnId::new());
        card.replace_comments(vec![
            Comment::new("first".to_string(), "ann".to_string()),
            Comment::new("second".to_string(), "bob".to_string()),
        ]);
        assert_eq!(card.comments.len(), 2);

        card.replace_comments(vec![Comment::new("only".to_string(), "ann".to_string())]);
        assert_eq!(card.comments.len(), 1);
        assert_eq!(card.comments[0].content, "only");
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"low\"");
        assert_eq!(
            serde_json::to_string(&Priority::Medium).unwrap(),
            "\"medium\""
        );
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");

        let parsed: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, Priority::High);
    }

    #[test]
    fn test_card_serialization_omits_empty_metadata() {
        let card = Card::new("Task".to_string(), 0, ColumnId::new());
        let json = serde_json::to_string(&card).unwrap();

        assert!(!json.contains("dueDate"));
        assert!(!json.contains("assignedTo"));
        assert!(!json.contains("priority"));
        assert!(json.contains("columnId"));
    }

    #[test]
    fn test_card_deserialization_without_metadata_fields() {
        let old_json = r#"{
            "id": "card-1",
            "content": "Legacy card",
            "order": 2,
            "columnId": "col-1",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let card: Card = serde_json::from_str(old_json).unwrap();
        assert_eq!(card.order, 2);
        assert!(card.due_date.is_none());
        assert!(card.comments.is_empty());
    }

    #[test]
    fn test_card_with_metadata_round_trips() {
        let mut card = Card::new("Task".to_string(), 0, ColumnId::new());
        card.set_due_date(Utc::now());
        card.set_assigned_to("ann".to_string());
        card.set_priority(Priority::High);
        card.replace_comments(vec![Comment::new("note".to_string(), "bob".to_string())]);

        let json = serde_json::to_string(&card).unwrap();
        let parsed: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.due_date, card.due_date);
        assert_eq!(parsed.assigned_to, card.assigned_to);
        assert_eq!(parsed.priority, Some(Priority::High));
        assert_eq!(parsed.comments.len(), 1);
    }
}
