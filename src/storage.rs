/// Storage serialization utilities for chrome.storage

use crate::config::{HIGHLIGHTS_KEY, URL_FLASHCARDS_KEY};
use crate::error::Result;
use crate::flashcard::Flashcard;
use futures::lock::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An async key-value area (chrome.storage.local / chrome.storage.sync)
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Missing keys come back as `None`
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Root structure stored under `urlFlashcards`: page URL -> ordered cards
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct UrlFlashcards {
    sets: BTreeMap<String, Vec<Flashcard>>,
}

impl UrlFlashcards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&[Flashcard]> {
        self.sets.get(url).map(Vec::as_slice)
    }

    /// Overwrite the whole set for a URL
    pub fn replace(&mut self, url: &str, cards: Vec<Flashcard>) {
        self.sets.insert(url.to_string(), cards);
    }

    pub fn remove_card(&mut self, url: &str, index: usize) -> bool {
        match self.sets.get_mut(url) {
            Some(cards) if index < cards.len() => {
                cards.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn replace_card(&mut self, url: &str, index: usize, card: Flashcard) -> bool {
        self.sets
            .get_mut(url)
            .and_then(|cards| cards.get_mut(index))
            .map(|slot| *slot = card)
            .is_some()
    }
}

/// Per-URL flashcard sets with a single writer per context.
///
/// Every mutation holds `write_lock` across its read-merge-write, so edits
/// made from one popup never interleave. Separate contexts each have their
/// own lock and can still overwrite one another (last writer wins).
pub struct FlashcardStore<K> {
    backend: K,
    write_lock: Mutex<()>,
}

impl<K: KeyValueStore> FlashcardStore<K> {
    pub fn new(backend: K) -> Self {
        FlashcardStore {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<UrlFlashcards> {
        match self.backend.get(URL_FLASHCARDS_KEY).await? {
            Some(Value::Null) | None => Ok(UrlFlashcards::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    async fn write_all(&self, data: &UrlFlashcards) -> Result<()> {
        self.backend
            .set(URL_FLASHCARDS_KEY, serde_json::to_value(data)?)
            .await
    }

    pub async fn load(&self, url: &str) -> Result<Option<Vec<Flashcard>>> {
        Ok(self.read_all().await?.get(url).map(<[Flashcard]>::to_vec))
    }

    pub async fn replace(&self, url: &str, cards: Vec<Flashcard>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.read_all().await?;
        data.replace(url, cards);
        self.write_all(&data).await?;
        log::info!("Flashcards saved for URL: {}", url);
        Ok(())
    }

    /// Remove one card and return the set as stored afterwards
    pub async fn delete_card(&self, url: &str, index: usize) -> Result<Vec<Flashcard>> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.read_all().await?;
        if data.remove_card(url, index) {
            self.write_all(&data).await?;
        } else {
            log::warn!("No flashcard at index {} for {}", index, url);
        }
        Ok(data.get(url).map(<[Flashcard]>::to_vec).unwrap_or_default())
    }

    /// Swap one card in place and return the set as stored afterwards
    pub async fn replace_card(
        &self,
        url: &str,
        index: usize,
        card: Flashcard,
    ) -> Result<Vec<Flashcard>> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.read_all().await?;
        if data.replace_card(url, index, card) {
            self.write_all(&data).await?;
        } else {
            log::warn!("No flashcard at index {} for {}", index, url);
        }
        Ok(data.get(url).map(<[Flashcard]>::to_vec).unwrap_or_default())
    }
}

/// The flat `flashcards` list that highlight captures are appended to
pub struct HighlightStore<K> {
    backend: K,
    write_lock: Mutex<()>,
}

impl<K: KeyValueStore> HighlightStore<K> {
    pub fn new(backend: K) -> Self {
        HighlightStore {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn all(&self) -> Result<Vec<Flashcard>> {
        match self.backend.get(HIGHLIGHTS_KEY).await? {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn push(&self, card: Flashcard) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut cards = self.all().await?;
        cards.push(card);
        self.backend
            .set(HIGHLIGHTS_KEY, serde_json::to_value(&cards)?)
            .await
    }

    pub async fn clear(&self) -> Result<()> {
        self.backend.remove(HIGHLIGHTS_KEY).await
    }
}
