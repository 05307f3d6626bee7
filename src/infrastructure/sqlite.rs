// src/infrastructure/sqlite.rs
use crate::application::FlashcardRepository;
use crate::domain::{DomainError, Flashcard};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, instrument};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS flashcards (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    question    TEXT    NOT NULL,
    answer      TEXT    NOT NULL,
    category    TEXT,
    created_at  INTEGER NOT NULL,
    updated_at  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_flashcards_category ON flashcards (category);
";

const COLUMNS: &str = "id, question, answer, category, created_at, updated_at";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SqliteFlashcardRepository {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteFlashcardRepository {
    /// Open (or create) the database file at `path` and apply the schema
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = PathBuf::from(path.as_ref());
        debug!(?path, "Opening flashcard database");

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .context("Failed to set busy timeout")?;

        let repo = Self::from_connection(conn, Some(path.clone()))?;
        info!(?path, "Successfully opened flashcard database");
        Ok(repo)
    }

    /// Private in-memory database, gone when the repository is dropped
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Failed to apply flashcard schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file backing this repository; `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::StorageFailure(format!("Connection lock poisoned: {}", e)))
    }

    fn query_list(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Flashcard>, DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let cards = stmt
            .query_map(params, flashcard_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::StorageFailure(e.to_string())
    }
}

fn flashcard_from_row(row: &Row<'_>) -> rusqlite::Result<Flashcard> {
    Ok(Flashcard {
        id: Some(row.get("id")?),
        question: row.get("question")?,
        answer: row.get("answer")?,
        category: row.get("category")?,
        created_at: timestamp(row.get("created_at")?),
        updated_at: timestamp(row.get("updated_at")?),
    })
}

fn timestamp(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl FlashcardRepository for SqliteFlashcardRepository {
    #[instrument(level = "debug", skip(self))]
    fn find_all(&self) -> Result<Vec<Flashcard>, DomainError> {
        self.query_list(
            &format!("SELECT {COLUMNS} FROM flashcards ORDER BY id"),
            params![],
        )
    }

    #[instrument(level = "debug", skip(self))]
    fn find_by_id(&self, id: i64) -> Result<Option<Flashcard>, DomainError> {
        let conn = self.conn()?;
        let card = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM flashcards WHERE id = ?1"),
                params![id],
                flashcard_from_row,
            )
            .optional()?;
        Ok(card)
    }

    #[instrument(level = "debug", skip(self))]
    fn find_by_category(&self, category: &str) -> Result<Vec<Flashcard>, DomainError> {
        self.query_list(
            &format!("SELECT {COLUMNS} FROM flashcards WHERE category = ?1 ORDER BY id"),
            params![category],
        )
    }

    #[instrument(level = "debug", skip(self, card))]
    fn create(&self, card: &Flashcard) -> Result<Flashcard, DomainError> {
        let now = now_millis();
        let conn = self.conn()?;
        let stored = conn.query_row(
            &format!(
                "INSERT INTO flashcards (question, answer, category, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?4) RETURNING {COLUMNS}"
            ),
            params![card.question, card.answer, card.category, now],
            flashcard_from_row,
        )?;

        info!(id = stored.id, "Created flashcard");
        Ok(stored)
    }

    #[instrument(level = "debug", skip(self, card))]
    fn update(&self, id: i64, card: &Flashcard) -> Result<Option<Flashcard>, DomainError> {
        let now = now_millis();
        let conn = self.conn()?;
        // MAX keeps updated_at >= created_at should the clock step backwards
        let updated = conn
            .query_row(
                &format!(
                    "UPDATE flashcards \
                     SET question = ?1, answer = ?2, category = ?3, updated_at = MAX(created_at, ?4) \
                     WHERE id = ?5 RETURNING {COLUMNS}"
                ),
                params![card.question, card.answer, card.category, now, id],
                flashcard_from_row,
            )
            .optional()?;

        match &updated {
            Some(_) => info!(id, "Updated flashcard"),
            None => debug!(id, "Flashcard not found for update"),
        }
        Ok(updated)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;

        if removed == 0 {
            debug!(id, "Flashcard not found for deletion");
            return Ok(false);
        }
        info!(id, "Deleted flashcard");
        Ok(true)
    }
}
