/// Messages exchanged between the popup, background and content contexts

use crate::error::ClipperError;
use crate::flashcard::{Flashcard, PageMetadata};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Message {
    SaveHighlight { text: String },
    ExtractContent { deck_name: String, card_count: usize },
    OpenOptionsPage,
}

/// Reply to `extractContent`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExtractResponse {
    Success {
        flashcards: Vec<Flashcard>,
        metadata: PageMetadata,
    },
    Failure {
        error: String,
    },
}

impl ExtractResponse {
    pub fn from_result(result: Result<(Vec<Flashcard>, PageMetadata), ClipperError>) -> Self {
        match result {
            Ok((flashcards, metadata)) => ExtractResponse::Success { flashcards, metadata },
            Err(e) => ExtractResponse::Failure {
                error: e.to_string(),
            },
        }
    }

    /// Turn a reply back into cards, treating an `{error}` reply as a failure
    pub fn into_flashcards(self) -> Result<Vec<Flashcard>, ClipperError> {
        match self {
            ExtractResponse::Success { flashcards, .. } if !flashcards.is_empty() => Ok(flashcards),
            ExtractResponse::Success { .. } => Err(ClipperError::NoFlashcards),
            ExtractResponse::Failure { error } => Err(ClipperError::Messaging(error)),
        }
    }
}
