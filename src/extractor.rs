/// Flashcard generation for the content script

use crate::completion::CompletionApi;
use crate::error::{ClipperError, Result};
use crate::flashcard::{Flashcard, PageContent, PageMetadata};
use crate::settings::SettingsStore;
use crate::storage::{HighlightStore, KeyValueStore};
use crate::text::candidate_sentences;

/// One card per candidate sentence, strictly in order
///
/// The first failing request aborts the whole run: cards made before it
/// are discarded along with it.
pub async fn generate_flashcards<C: CompletionApi>(
    api: &C,
    text: &str,
    card_count: usize,
) -> Result<Vec<Flashcard>> {
    log::info!("Processing text of length: {}", text.len());

    let sentences = candidate_sentences(text, card_count);
    if sentences.is_empty() {
        return Err(ClipperError::NoSuitableSentences);
    }
    log::info!("Found {} suitable sentences", sentences.len());

    let mut flashcards = Vec::with_capacity(sentences.len());
    for sentence in &sentences {
        let card = api.flashcard_for(sentence).await.inspect_err(|e| {
            log::error!("Error generating flashcard: {}", e);
        })?;
        flashcards.push(card);
        log::debug!("Successfully generated flashcard: {}", flashcards.len());
    }

    if flashcards.is_empty() {
        return Err(ClipperError::NoFlashcards);
    }
    Ok(flashcards)
}

/// Handle `extractContent` for an already-read page
///
/// `connect` builds the completion client once the API key is known, so a
/// missing key fails before any client exists.
pub async fn extract<K, C, F>(
    page: &PageContent,
    card_count: usize,
    settings: &SettingsStore<K>,
    connect: F,
) -> Result<(Vec<Flashcard>, PageMetadata)>
where
    K: KeyValueStore,
    C: CompletionApi,
    F: FnOnce(String) -> C,
{
    if page.text.trim().is_empty() {
        return Err(ClipperError::NoContent);
    }
    log::info!("Extracted content length: {}", page.text.len());

    let api_key = settings.require_api_key().await?;
    let api = connect(api_key);

    let flashcards = generate_flashcards(&api, &page.text, card_count).await?;
    Ok((flashcards, page.metadata()))
}

/// Handle `saveHighlight`: one card from the selection, appended to the
/// highlight list
pub async fn capture_highlight<S, L, C, F>(
    selection: &str,
    settings: &SettingsStore<S>,
    highlights: &HighlightStore<L>,
    connect: F,
) -> Result<Option<Flashcard>>
where
    S: KeyValueStore,
    L: KeyValueStore,
    C: CompletionApi,
    F: FnOnce(String) -> C,
{
    let selection = selection.trim();
    if selection.is_empty() {
        log::debug!("Ignoring empty selection");
        return Ok(None);
    }

    let api = connect(settings.require_api_key().await?);
    let card = api.flashcard_for(selection).await?;
    highlights.push(card.clone()).await?;
    log::info!("Saved highlight as flashcard");
    Ok(Some(card))
}
