/// In-memory stand-ins for browser storage, messaging, and both HTTP services

use crate::anki::{Note, NoteBridge};
use crate::browser::{Browser, ContextMenu};
use crate::completion::CompletionApi;
use crate::error::{ClipperError, Result};
use crate::flashcard::{Flashcard, TabInfo};
use crate::messages::Message;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::poll_fn;
use std::rc::Rc;
use std::task::Poll;

/// Return Pending once so concurrent futures interleave like real storage I/O
pub async fn yield_now() {
    let mut yielded = false;
    poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

/// Clones share the same entries
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, Value>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn insert(&self, key: &str, value: Value) {
        self.entries.borrow_mut().insert(key.to_string(), value);
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl crate::storage::KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        yield_now().await;
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        yield_now().await;
        self.insert(key, value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Completion API that echoes the sentence back, optionally failing on one call
pub struct ScriptedCompletion {
    fail_at: Option<usize>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn echo() -> Self {
        ScriptedCompletion {
            fail_at: None,
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// The call with this zero-based index returns an upstream error
    pub fn failing_at(call: usize) -> Self {
        ScriptedCompletion {
            fail_at: Some(call),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl CompletionApi for ScriptedCompletion {
    async fn flashcard_for(&self, sentence: &str) -> Result<Flashcard> {
        let call = self.calls();
        self.prompts.borrow_mut().push(sentence.to_string());
        if self.fail_at == Some(call) {
            return Err(ClipperError::UpstreamApi("500".to_string()));
        }
        Ok(Flashcard::new(
            format!("What about: {}?", sentence),
            format!("{}.", sentence),
        ))
    }
}

#[derive(Default)]
struct BrowserState {
    tab: Option<TabInfo>,
    reply: Value,
    fail_sends: bool,
    sent: Vec<(i32, Message)>,
    options_opened: usize,
    menus: Vec<ContextMenu>,
}

/// Clones share state, so a test can keep a handle after moving one into a Popup
#[derive(Clone, Default)]
pub struct FakeBrowser {
    state: Rc<RefCell<BrowserState>>,
}

impl FakeBrowser {
    pub fn on_tab(id: i32, url: &str, title: &str) -> Self {
        let browser = FakeBrowser::default();
        browser.set_tab(TabInfo::new(id, url, title));
        browser
    }

    pub fn replying(self, reply: Value) -> Self {
        self.set_reply(reply);
        self
    }

    pub fn failing_sends(self) -> Self {
        self.state.borrow_mut().fail_sends = true;
        self
    }

    pub fn set_tab(&self, tab: TabInfo) {
        self.state.borrow_mut().tab = Some(tab);
    }

    pub fn set_reply(&self, reply: Value) {
        self.state.borrow_mut().reply = reply;
    }

    pub fn sent(&self) -> Vec<(i32, Message)> {
        self.state.borrow().sent.clone()
    }

    pub fn options_opened(&self) -> usize {
        self.state.borrow().options_opened
    }

    pub fn menus(&self) -> Vec<ContextMenu> {
        self.state.borrow().menus.clone()
    }
}

impl Browser for FakeBrowser {
    async fn active_tab(&self) -> Result<Option<TabInfo>> {
        Ok(self.state.borrow().tab.clone())
    }

    async fn send_to_tab(&self, tab_id: i32, message: &Message) -> Result<Value> {
        let mut state = self.state.borrow_mut();
        state.sent.push((tab_id, message.clone()));
        if state.fail_sends {
            return Err(ClipperError::Messaging(
                "Could not establish connection. Receiving end does not exist.".to_string(),
            ));
        }
        Ok(state.reply.clone())
    }

    async fn open_options_page(&self) -> Result<()> {
        self.state.borrow_mut().options_opened += 1;
        Ok(())
    }

    async fn reset_context_menu(&self, menu: &ContextMenu) -> Result<()> {
        self.state.borrow_mut().menus = vec![menu.clone()];
        Ok(())
    }
}

/// AnkiConnect stand-in
pub struct FakeBridge {
    online: bool,
    decks: RefCell<Vec<String>>,
    created: RefCell<Vec<String>>,
    submitted: RefCell<Vec<Note>>,
    error: Option<String>,
    duplicate_front: Option<String>,
}

impl FakeBridge {
    pub fn online() -> Self {
        FakeBridge {
            online: true,
            decks: RefCell::new(vec!["Default".to_string()]),
            created: RefCell::new(Vec::new()),
            submitted: RefCell::new(Vec::new()),
            error: None,
            duplicate_front: None,
        }
    }

    pub fn offline() -> Self {
        FakeBridge {
            online: false,
            ..FakeBridge::online()
        }
    }

    pub fn with_deck(self, deck: &str) -> Self {
        self.decks.borrow_mut().push(deck.to_string());
        self
    }

    /// addNotes answers with this `error` field
    pub fn rejecting_with(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// Notes with this front come back as `null`
    pub fn with_duplicate(mut self, front: &str) -> Self {
        self.duplicate_front = Some(front.to_string());
        self
    }

    pub fn created_decks(&self) -> Vec<String> {
        self.created.borrow().clone()
    }

    pub fn submitted_notes(&self) -> Vec<Note> {
        self.submitted.borrow().clone()
    }

    fn reachable(&self) -> Result<()> {
        if self.online {
            Ok(())
        } else {
            Err(ClipperError::BridgeUnreachable(
                "error sending request for url (http://localhost:8765/)".to_string(),
            ))
        }
    }
}

impl NoteBridge for FakeBridge {
    async fn version(&self) -> Result<u32> {
        self.reachable()?;
        Ok(6)
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        self.reachable()?;
        Ok(self.decks.borrow().clone())
    }

    async fn create_deck(&self, deck: &str) -> Result<()> {
        self.reachable()?;
        self.decks.borrow_mut().push(deck.to_string());
        self.created.borrow_mut().push(deck.to_string());
        Ok(())
    }

    async fn add_notes(&self, notes: &[Note]) -> Result<Vec<Option<u64>>> {
        self.reachable()?;
        if let Some(error) = &self.error {
            return Err(ClipperError::BridgeReported(error.clone()));
        }
        self.submitted.borrow_mut().extend_from_slice(notes);
        Ok(notes
            .iter()
            .enumerate()
            .map(|(i, note)| {
                let duplicate = self.duplicate_front.as_deref() == Some(note.fields.front.as_str());
                (!duplicate).then_some(1_000 + i as u64)
            })
            .collect())
    }
}
