/// Popup operations: generate, delete, regenerate, export

use crate::anki::{ExportReport, NoteBridge, export_flashcards};
use crate::browser::Browser;
use crate::config::DEFAULT_DECK;
use crate::error::{ClipperError, Result};
use crate::flashcard::{Flashcard, TabInfo};
use crate::messages::{ExtractResponse, Message};
use crate::settings::SettingsStore;
use crate::storage::{FlashcardStore, HighlightStore, KeyValueStore};

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    Generated(Vec<Flashcard>),
    /// No key stored; the settings page was opened instead
    NeedsApiKey,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Exported(ExportReport),
    NothingToExport,
}

/// A tab we can key storage by and message
struct ActiveTab {
    id: i32,
    url: String,
    info: TabInfo,
}

/// Everything the popup does, independent of how it is rendered
pub struct Popup<B, L, S> {
    browser: B,
    cards: FlashcardStore<L>,
    highlights: HighlightStore<L>,
    settings: SettingsStore<S>,
}

impl<B, L, S> Popup<B, L, S>
where
    B: Browser,
    L: KeyValueStore + Clone,
    S: KeyValueStore,
{
    pub fn new(browser: B, local: L, sync: S) -> Self {
        Popup {
            browser,
            cards: FlashcardStore::new(local.clone()),
            highlights: HighlightStore::new(local),
            settings: SettingsStore::new(sync),
        }
    }

    async fn active_tab(&self) -> Result<ActiveTab> {
        let info = self
            .browser
            .active_tab()
            .await?
            .ok_or(ClipperError::NoActiveTab)?;

        match (info.id, info.url.clone()) {
            (Some(id), Some(url)) => Ok(ActiveTab { id, url, info }),
            _ => Err(ClipperError::NoActiveTab),
        }
    }

    /// Ask the tab's content script for `card_count` cards
    async fn request_cards(&self, tab: &ActiveTab, card_count: usize) -> Result<Vec<Flashcard>> {
        if !tab.info.is_scriptable() {
            return Err(ClipperError::Messaging(format!(
                "cannot run on {}",
                tab.url
            )));
        }

        let message = Message::ExtractContent {
            deck_name: tab.info.display_title().unwrap_or(DEFAULT_DECK).to_string(),
            card_count,
        };
        log::info!("Sending message with card count: {}", card_count);

        let reply = self.browser.send_to_tab(tab.id, &message).await?;
        let response: ExtractResponse = serde_json::from_value(reply)
            .map_err(|e| ClipperError::Messaging(format!("unexpected reply: {}", e)))?;
        response.into_flashcards()
    }

    /// Cards already stored for the active tab
    pub async fn open(&self) -> Result<Vec<Flashcard>> {
        let tab = self.active_tab().await?;
        Ok(self.cards.load(&tab.url).await?.unwrap_or_default())
    }

    pub async fn generate(&self, card_count: usize) -> Result<GenerateOutcome> {
        if !self.settings.has_api_key().await? {
            log::warn!("No API key set; opening settings");
            self.browser.open_options_page().await?;
            return Ok(GenerateOutcome::NeedsApiKey);
        }

        let tab = self.active_tab().await?;
        let cards = self.request_cards(&tab, card_count).await?;
        log::info!("Generated {} flashcards", cards.len());

        self.cards.replace(&tab.url, cards.clone()).await?;
        Ok(GenerateOutcome::Generated(cards))
    }

    pub async fn delete(&self, index: usize) -> Result<Vec<Flashcard>> {
        let tab = self.active_tab().await?;
        self.cards.delete_card(&tab.url, index).await
    }

    /// Replace one card with a freshly generated one
    ///
    /// A missing index is a no-op. On failure nothing is written.
    pub async fn regenerate(&self, index: usize) -> Result<Vec<Flashcard>> {
        let tab = self.active_tab().await?;
        let current = self.cards.load(&tab.url).await?.unwrap_or_default();
        if index >= current.len() {
            return Ok(current);
        }

        let card = self
            .request_cards(&tab, 1)
            .await?
            .into_iter()
            .next()
            .ok_or(ClipperError::NoFlashcards)?;

        self.cards.replace_card(&tab.url, index, card).await
    }

    pub async fn export<N: NoteBridge>(&self, bridge: &N) -> Result<ExportOutcome> {
        let tab = self.active_tab().await?;
        let cards = self.cards.load(&tab.url).await?.unwrap_or_default();
        if cards.is_empty() {
            return Ok(ExportOutcome::NothingToExport);
        }

        let report = export_flashcards(bridge, tab.info.display_title(), &cards).await?;
        Ok(ExportOutcome::Exported(report))
    }

    /// Cards captured from highlighted selections on any page
    pub async fn saved_highlights(&self) -> Result<Vec<Flashcard>> {
        self.highlights.all().await
    }

    pub async fn clear_highlights(&self) -> Result<()> {
        self.highlights.clear().await?;
        log::info!("Cleared saved highlights");
        Ok(())
    }

    pub async fn open_settings(&self) -> Result<()> {
        self.browser.open_options_page().await
    }
}
