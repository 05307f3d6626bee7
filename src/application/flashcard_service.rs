// src/application/flashcard_service.rs
use crate::application::FlashcardRepository;
use crate::domain::{DomainError, Flashcard};
use tracing::debug;

/// Use cases behind the flashcard resource.
///
/// Request bodies are validated here so an invalid record never reaches the
/// repository, and absent records become `DomainError::NotFound`.
pub struct FlashcardService<R: FlashcardRepository> {
    repository: R,
}

impl<R: FlashcardRepository> FlashcardService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn list_flashcards(&self) -> Result<Vec<Flashcard>, DomainError> {
        self.repository.find_all()
    }

    pub fn get_flashcard(&self, id: i64) -> Result<Flashcard, DomainError> {
        self.repository
            .find_by_id(id)?
            .ok_or(DomainError::NotFound(id))
    }

    pub fn create_flashcard(&self, card: &Flashcard) -> Result<Flashcard, DomainError> {
        let card = card.normalized();
        card.validate()?;
        self.repository.create(&card)
    }

    pub fn update_flashcard(&self, id: i64, card: &Flashcard) -> Result<Flashcard, DomainError> {
        let card = card.normalized();
        card.validate()?;
        self.repository
            .update(id, &card)?
            .ok_or(DomainError::NotFound(id))
    }

    pub fn delete_flashcard(&self, id: i64) -> Result<(), DomainError> {
        if self.repository.delete(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound(id))
        }
    }

    /// Search by exact category; a missing or empty category is a bad request
    pub fn search_by_category(&self, category: Option<&str>) -> Result<Vec<Flashcard>, DomainError> {
        let category = match category {
            Some(c) if !c.is_empty() => c,
            _ => {
                debug!("Rejecting search without category");
                return Err(DomainError::BadRequest(
                    "Category query parameter is required.".to_string(),
                ));
            }
        };
        self.repository.find_by_category(category)
    }
}
