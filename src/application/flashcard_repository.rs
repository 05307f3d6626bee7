// src/application/flashcard_repository.rs
use crate::domain::{DomainError, Flashcard};

/// Storage contract for flashcards.
///
/// Missing records are ordinary outcomes: lookups and updates return `None`,
/// deletes return `false`. Errors are reserved for storage failures.
pub trait FlashcardRepository: Send + Sync {
    /// All records in insertion order
    fn find_all(&self) -> Result<Vec<Flashcard>, DomainError>;

    fn find_by_id(&self, id: i64) -> Result<Option<Flashcard>, DomainError>;

    /// Records whose category equals `category` exactly (case-sensitive)
    fn find_by_category(&self, category: &str) -> Result<Vec<Flashcard>, DomainError>;

    /// Persist a new record. Any `id` or timestamps on `card` are ignored;
    /// the stored record is returned with them assigned.
    fn create(&self, card: &Flashcard) -> Result<Flashcard, DomainError>;

    /// Overwrite question, answer and category of an existing record and
    /// refresh `updated_at`. Returns `None` without writing if `id` is absent.
    fn update(&self, id: i64, card: &Flashcard) -> Result<Option<Flashcard>, DomainError>;

    /// Remove a record. Returns whether a row was deleted.
    fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
