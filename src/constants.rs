// src/constants.rs
//
// Application-wide limits and defaults. Each constant is documented with its
// purpose and usage context.

/// Maximum length of a flashcard question, in characters.
///
/// Used in: `domain/flashcard.rs`
pub const MAX_QUESTION_LEN: usize = 255;

/// Maximum length of a flashcard answer, in characters.
///
/// Used in: `domain/flashcard.rs`
pub const MAX_ANSWER_LEN: usize = 255;

/// Maximum length of a flashcard category, in characters.
///
/// Used in: `domain/flashcard.rs`
pub const MAX_CATEGORY_LEN: usize = 100;

/// Collection path of the flashcard resource. `Location` headers and the
/// OpenAPI document are derived from it.
///
/// Used in: `ports/http.rs`, `ports/openapi.rs`
pub const FLASHCARDS_PATH: &str = "/flashcards";

/// Address the HTTP server binds to when neither the config file nor the
/// command line names one.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// SQLite database file used when no path is configured. Relative paths resolve
/// against the working directory.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_DATABASE_PATH: &str = "flashcards.db";
