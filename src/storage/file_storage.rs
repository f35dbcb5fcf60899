use crate::{
    auth::User,
    domain::{Board, BoardId, Card, CardId, Column, ColumnId},
    error::{CorkboardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: one pretty-printed JSON document per entity,
/// grouped into a directory per entity kind.
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const BOARDS_DIR: &'static str = "boards";
    const COLUMNS_DIR: &'static str = "columns";
    const CARDS_DIR: &'static str = "cards";
    const USERS_DIR: &'static str = "users";

    /// Creates a new FileStorage rooted at the given data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_dir.as_ref().to_path_buf(),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    fn columns_dir(&self) -> PathBuf {
        self.root_path.join(Self::COLUMNS_DIR)
    }

    fn cards_dir(&self) -> PathBuf {
        self.root_path.join(Self::CARDS_DIR)
    }

    fn users_dir(&self) -> PathBuf {
        self.root_path.join(Self::USERS_DIR)
    }

    fn entity_file(dir: &Path, id: &str) -> PathBuf {
        dir.join(format!("{}.json", id))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn write_entity<T: Serialize>(&self, dir: &Path, id: &str, entity: &T) -> Result<()> {
        self.ensure_directory_exists(dir).await?;
        let json = serde_json::to_string_pretty(entity)?;
        fs::write(Self::entity_file(dir, id), json).await?;
        Ok(())
    }

    async fn read_entity<T: DeserializeOwned>(&self, dir: &Path, id: &str) -> Result<Option<T>> {
        let file_path = Self::entity_file(dir, id);
        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    async fn read_all<T: DeserializeOwned>(&self, dir: &Path) -> Result<Vec<T>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(dir).await?;
        let mut items = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                let contents = fs::read_to_string(&path).await?;
                items.push(serde_json::from_str(&contents)?);
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.boards_dir()).await?;
        self.ensure_directory_exists(&self.columns_dir()).await?;
        self.ensure_directory_exists(&self.cards_dir()).await?;
        self.ensure_directory_exists(&self.users_dir()).await?;
        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.write_entity(&self.boards_dir(), board.id.as_str(), board)
            .await
    }

    async fn load_board(&self, id: &BoardId) -> Result<Board> {
        self.read_entity(&self.boards_dir(), id.as_str())
            .await?
            .ok_or_else(|| CorkboardError::BoardNotFound(id.to_string()))
    }

    async fn list_boards(&self) -> Result<Vec<Board>> {
        let mut boards: Vec<Board> = self.read_all(&self.boards_dir()).await?;
        boards.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(boards)
    }

    async fn save_column(&self, column: &Column) -> Result<()> {
        // Foreign-key stand-in: the owning board must exist.
        self.load_board(&column.board_id).await?;
        self.write_entity(&self.columns_dir(), column.id.as_str(), column)
            .await
    }

    async fn load_column(&self, id: &ColumnId) -> Result<Column> {
        self.read_entity(&self.columns_dir(), id.as_str())
            .await?
            .ok_or_else(|| CorkboardError::ColumnNotFound(id.to_string()))
    }

    async fn list_columns(&self, board_id: &BoardId) -> Result<Vec<Column>> {
        let mut columns: Vec<Column> = self
            .read_all::<Column>(&self.columns_dir())
            .await?
            .into_iter()
            .filter(|column| &column.board_id == board_id)
            .collect();
        columns.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(columns)
    }

    async fn save_card(&self, card: &Card) -> Result<()> {
        // Foreign-key stand-in: the owning column must exist.
        self.load_column(&card.column_id).await?;
        self.write_entity(&self.cards_dir(), card.id.as_str(), card)
            .await
    }

    async fn load_card(&self, id: &CardId) -> Result<Card> {
        self.read_entity(&self.cards_dir(), id.as_str())
            .await?
            .ok_or_else(|| CorkboardError::CardNotFound(id.to_string()))
    }

    async fn list_cards(&self, column_id: &ColumnId) -> Result<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .read_all::<Card>(&self.cards_dir())
            .await?
            .into_iter()
            .filter(|card| &card.column_id == column_id)
            .collect();
        cards.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(cards)
    }

    async fn find_user(&self, identifier: &str) -> Result<Option<User>> {
        let users: Vec<User> = self.read_all(&self.users_dir()).await?;
        Ok(users
            .into_iter()
            .find(|user| user.email == identifier || user.username == identifier))
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.write_entity(&self.users_dir(), user.id.as_str(), user)
            .await
    }
}
