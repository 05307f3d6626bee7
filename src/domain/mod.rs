// src/domain/mod.rs
pub mod error;
pub mod flashcard;

pub use error::DomainError;
pub use flashcard::Flashcard;
