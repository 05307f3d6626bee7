// src/util/testing.rs

use anyhow::Result;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::FlashcardRepository;
use crate::domain::{DomainError, Flashcard};

/// Shared in-memory repository for testing code that depends on FlashcardRepository
///
/// Records live in an ordered map keyed by id, so listing returns insertion order
/// as long as ids are handed out increasingly.
///
/// # Examples
///
/// ```
/// use flashcards::util::testing::MockFlashcardRepository;
/// use flashcards::application::FlashcardRepository;
/// use flashcards::domain::Flashcard;
///
/// let mock = MockFlashcardRepository::builder()
///     .with_flashcard(Flashcard {
///         id: Some(1),
///         ..Flashcard::new("Question", "Answer")
///     })
///     .build();
/// assert!(mock.find_by_id(1).unwrap().is_some());
/// ```
pub struct MockFlashcardRepository {
    cards: Mutex<BTreeMap<i64, Flashcard>>,
    next_id: Mutex<i64>,
    failure: Option<String>,
    write_calls: AtomicUsize,
}

impl MockFlashcardRepository {
    pub fn builder() -> MockFlashcardRepositoryBuilder {
        MockFlashcardRepositoryBuilder::new()
    }

    /// Number of create/update/delete calls that reached the repository
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        match &self.failure {
            Some(msg) => Err(DomainError::StorageFailure(msg.clone())),
            None => Ok(()),
        }
    }

    fn cards(&self) -> std::sync::MutexGuard<'_, BTreeMap<i64, Flashcard>> {
        self.cards.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FlashcardRepository for MockFlashcardRepository {
    fn find_all(&self) -> Result<Vec<Flashcard>, DomainError> {
        self.check_failure()?;
        Ok(self.cards().values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Flashcard>, DomainError> {
        self.check_failure()?;
        Ok(self.cards().get(&id).cloned())
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Flashcard>, DomainError> {
        self.check_failure()?;
        Ok(self
            .cards()
            .values()
            .filter(|c| c.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    fn create(&self, card: &Flashcard) -> Result<Flashcard, DomainError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut next_id = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
        let id = *next_id;
        *next_id += 1;

        let now = Utc::now();
        let stored = Flashcard {
            id: Some(id),
            question: card.question.clone(),
            answer: card.answer.clone(),
            category: card.category.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.cards().insert(id, stored.clone());
        Ok(stored)
    }

    fn update(&self, id: i64, card: &Flashcard) -> Result<Option<Flashcard>, DomainError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut cards = self.cards();
        Ok(cards.get_mut(&id).map(|existing| {
            existing.question = card.question.clone();
            existing.answer = card.answer.clone();
            existing.category = card.category.clone();
            existing.updated_at = Some(Utc::now());
            existing.clone()
        }))
    }

    fn delete(&self, id: i64) -> Result<bool, DomainError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.cards().remove(&id).is_some())
    }
}

/// Builder for MockFlashcardRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockFlashcardRepositoryBuilder {
    cards: BTreeMap<i64, Flashcard>,
    failure: Option<String>,
}

impl MockFlashcardRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            cards: BTreeMap::new(),
            failure: None,
        }
    }

    /// Add a stored flashcard; cards without an id are numbered after the existing ones
    pub fn with_flashcard(mut self, mut card: Flashcard) -> Self {
        let id = card
            .id
            .unwrap_or_else(|| self.cards.keys().next_back().map_or(1, |last| last + 1));
        card.id = Some(id);
        let now = Utc::now();
        card.created_at.get_or_insert(now);
        card.updated_at.get_or_insert(now);
        self.cards.insert(id, card);
        self
    }

    /// Make every operation fail with StorageFailure
    pub fn with_storage_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn build(self) -> MockFlashcardRepository {
        let next_id = self.cards.keys().next_back().map_or(1, |last| last + 1);
        MockFlashcardRepository {
            cards: Mutex::new(self.cards),
            next_id: Mutex::new(next_id),
            failure: self.failure,
            write_calls: AtomicUsize::new(0),
        }
    }
}

impl Default for MockFlashcardRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "tower", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
