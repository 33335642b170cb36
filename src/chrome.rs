/// chrome.* bindings through the JS bridge module

use crate::browser::{Browser, ContextMenu};
use crate::error::{ClipperError, Result};
use crate::flashcard::TabInfo;
use crate::messages::Message;
use crate::storage::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chrome.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(area: &str, key: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(area: &str, key: &str, value: JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeStorage(area: &str, key: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryActiveTab() -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendTabMessage(tab_id: i32, message: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn openOptionsPage() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn resetContextMenu(id: &str, title: &str, contexts: JsValue) -> std::result::Result<(), JsValue>;

    /// `handler(request, sender)` may return a Promise; its value becomes the reply
    pub fn onRuntimeMessage(handler: &js_sys::Function);
}

/// Serialize with plain objects for maps, as chrome.storage expects
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ClipperError::Storage(format!("Failed to serialize: {:?}", e)))
}

pub fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| ClipperError::Storage(format!("Failed to parse: {:?}", e)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageArea {
    Local,
    Sync,
}

impl StorageArea {
    fn name(self) -> &'static str {
        match self {
            StorageArea::Local => "local",
            StorageArea::Sync => "sync",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChromeStorage {
    area: StorageArea,
}

impl ChromeStorage {
    pub fn local() -> Self {
        ChromeStorage {
            area: StorageArea::Local,
        }
    }

    pub fn sync() -> Self {
        ChromeStorage {
            area: StorageArea::Sync,
        }
    }
}

impl KeyValueStore for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let value = getStorage(self.area.name(), key)
            .await
            .map_err(|e| ClipperError::Storage(format!("Failed to get storage: {:?}", e)))?;

        if value.is_null() || value.is_undefined() {
            Ok(None)
        } else {
            from_js(value).map(Some)
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        setStorage(self.area.name(), key, to_js(&value)?)
            .await
            .map_err(|e| ClipperError::Storage(format!("Failed to save storage: {:?}", e)))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        removeStorage(self.area.name(), key)
            .await
            .map_err(|e| ClipperError::Storage(format!("Failed to remove storage: {:?}", e)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeBrowser;

impl Browser for ChromeBrowser {
    async fn active_tab(&self) -> Result<Option<TabInfo>> {
        let tab = queryActiveTab()
            .await
            .map_err(|e| ClipperError::Messaging(format!("Failed to get tabs: {:?}", e)))?;
        from_js(tab)
    }

    async fn send_to_tab(&self, tab_id: i32, message: &Message) -> Result<Value> {
        let reply = sendTabMessage(tab_id, to_js(message)?)
            .await
            .map_err(|e| ClipperError::Messaging(format!("{:?}", e)))?;

        if reply.is_undefined() {
            Ok(Value::Null)
        } else {
            from_js(reply)
        }
    }

    async fn open_options_page(&self) -> Result<()> {
        openOptionsPage()
            .await
            .map_err(|e| ClipperError::Messaging(format!("Failed to open options: {:?}", e)))
    }

    async fn reset_context_menu(&self, menu: &ContextMenu) -> Result<()> {
        resetContextMenu(&menu.id, &menu.title, to_js(&menu.contexts)?)
            .await
            .map_err(|e| ClipperError::Messaging(format!("{:?}", e)))
    }
}
