// src/application/mod.rs
pub mod flashcard_repository;
pub mod flashcard_service;

pub use flashcard_repository::FlashcardRepository;
pub use flashcard_service::FlashcardService;
