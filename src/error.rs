/// Error taxonomy shared by every extension context
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipperError {
    #[error("OpenAI API key not found. Please set it in the extension settings.")]
    MissingApiKey,

    #[error("No active tab found")]
    NoActiveTab,

    #[error("Messaging failed: {0}")]
    Messaging(String),

    #[error("No content could be extracted from the page")]
    NoContent,

    #[error("No suitable sentences found in the content")]
    NoSuitableSentences,

    #[error("No flashcards could be generated")]
    NoFlashcards,

    #[error("OpenAI API error: {0}")]
    UpstreamApi(String),

    #[error("Cannot connect to Anki: {0}")]
    BridgeUnreachable(String),

    #[error("Anki reported an error: {0}")]
    BridgeReported(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClipperError>;
