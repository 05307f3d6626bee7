// src/domain/flashcard.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ANSWER_LEN, MAX_CATEGORY_LEN, MAX_QUESTION_LEN};
use crate::domain::DomainError;

/// A question/answer pair, optionally filed under a category.
///
/// The same type carries request bodies and stored records: `id` and both
/// timestamps are assigned by storage and ignored when a client sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Copy of this card with an empty category treated as uncategorized
    pub fn normalized(&self) -> Self {
        Self {
            category: self.category.clone().filter(|c| !c.is_empty()),
            ..self.clone()
        }
    }

    /// Check field lengths and blankness before the record may reach storage.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("Question", &self.question, MAX_QUESTION_LEN)?;
        require_text("Answer", &self.answer, MAX_ANSWER_LEN)?;

        if let Some(category) = &self.category {
            if category.chars().count() > MAX_CATEGORY_LEN {
                return Err(DomainError::BadRequest(format!(
                    "Category cannot exceed {} characters",
                    MAX_CATEGORY_LEN
                )));
            }
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::BadRequest(format!("{} cannot be blank", field)));
    }
    if value.chars().count() > max {
        return Err(DomainError::BadRequest(format!(
            "{} cannot exceed {} characters",
            field, max
        )));
    }
    Ok(())
}
