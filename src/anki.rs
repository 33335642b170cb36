/// Export to Anki through the AnkiConnect add-on

use crate::config::{ANKI_CONNECT_URL, ANKI_CONNECT_VERSION, NOTE_MODEL, NOTE_TAG};
use crate::error::{ClipperError, Result};
use crate::flashcard::Flashcard;
use crate::text::deck_name;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NoteFields {
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Back")]
    pub back: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub deck_name: String,
    pub model_name: String,
    pub fields: NoteFields,
    pub tags: Vec<String>,
}

impl Note {
    pub fn from_flashcard(deck: &str, card: &Flashcard) -> Note {
        Note {
            deck_name: deck.to_string(),
            model_name: NOTE_MODEL.to_string(),
            fields: NoteFields {
                front: card.front.clone(),
                back: card.back.clone(),
            },
            tags: vec![NOTE_TAG.to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The bridge's own `error` field wins over any result
    pub fn into_result(self) -> Result<Option<T>> {
        match self.error {
            Some(error) => Err(ClipperError::BridgeReported(error)),
            None => Ok(self.result),
        }
    }
}

/// Outcome of one export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub deck: String,
    pub added: usize,
    /// Notes Anki refused, e.g. duplicates
    pub rejected: usize,
}

/// The AnkiConnect actions export needs
#[allow(async_fn_in_trait)]
pub trait NoteBridge {
    async fn version(&self) -> Result<u32>;
    async fn deck_names(&self) -> Result<Vec<String>>;
    async fn create_deck(&self, deck: &str) -> Result<()>;
    /// One entry per note: the new note id, or None if Anki refused it
    async fn add_notes(&self, notes: &[Note]) -> Result<Vec<Option<u64>>>;
}

pub struct AnkiConnect {
    http: Client,
    endpoint: String,
}

impl AnkiConnect {
    pub fn new() -> Self {
        AnkiConnect {
            http: Client::new(),
            endpoint: ANKI_CONNECT_URL.to_string(),
        }
    }

    async fn make_request<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Option<Value>,
    ) -> Result<ApiResponse<T>> {
        let mut body = serde_json::Map::new();
        body.insert("action".to_string(), Value::String(action.to_string()));
        body.insert("version".to_string(), Value::Number(ANKI_CONNECT_VERSION.into()));

        if let Some(params) = params {
            body.insert("params".to_string(), params);
        }

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClipperError::BridgeUnreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClipperError::BridgeUnreachable(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClipperError::BridgeUnreachable(format!("unreadable reply: {}", e)))
    }
}

impl Default for AnkiConnect {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteBridge for AnkiConnect {
    async fn version(&self) -> Result<u32> {
        let response: ApiResponse<u32> = self.make_request("version", None).await?;
        Ok(response.into_result()?.unwrap_or_default())
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        let response: ApiResponse<Vec<String>> = self.make_request("deckNames", None).await?;
        Ok(response.into_result()?.unwrap_or_default())
    }

    async fn create_deck(&self, deck: &str) -> Result<()> {
        let response: ApiResponse<u64> = self
            .make_request("createDeck", Some(json!({ "deck": deck })))
            .await?;
        response.into_result().map(|_| ())
    }

    async fn add_notes(&self, notes: &[Note]) -> Result<Vec<Option<u64>>> {
        let response: ApiResponse<Vec<Option<u64>>> = self
            .make_request("addNotes", Some(json!({ "notes": notes })))
            .await?;
        Ok(response.into_result()?.unwrap_or_default())
    }
}

/// Push a page's cards into a deck named after the page
///
/// Never touches local storage; the caller passes in the cards to send.
pub async fn export_flashcards<B: NoteBridge>(
    bridge: &B,
    page_title: Option<&str>,
    cards: &[Flashcard],
) -> Result<ExportReport> {
    let version = bridge.version().await.map_err(|e| match e {
        ClipperError::BridgeUnreachable(_) => e,
        other => ClipperError::BridgeUnreachable(other.to_string()),
    })?;
    log::debug!("AnkiConnect version {}", version);

    let deck = deck_name(page_title);
    if !bridge.deck_names().await?.iter().any(|d| d == &deck) {
        bridge.create_deck(&deck).await?;
        log::info!("Created deck {}", deck);
    }

    let notes: Vec<Note> = cards.iter().map(|c| Note::from_flashcard(&deck, c)).collect();
    let ids = bridge.add_notes(&notes).await?;

    let added = ids.iter().filter(|id| id.is_some()).count();
    let report = ExportReport {
        deck,
        added,
        rejected: notes.len().saturating_sub(added),
    };
    log::info!("Anki response: {:?}", report);
    Ok(report)
}
