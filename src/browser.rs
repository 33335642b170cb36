/// Browser-level APIs the extension logic depends on

use crate::error::Result;
use crate::flashcard::TabInfo;
use crate::messages::Message;
use serde::Deserialize;
use serde_json::Value;

/// A context-menu entry to register
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub id: String,
    pub title: String,
    pub contexts: Vec<String>,
}

/// The parts of chrome.contextMenus.OnClickData we read
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuClick {
    pub menu_item_id: Value,
    #[serde(default)]
    pub selection_text: Option<String>,
}

impl MenuClick {
    /// Menu ids may be strings or numbers
    pub fn is_item(&self, id: &str) -> bool {
        self.menu_item_id.as_str() == Some(id)
    }
}

#[allow(async_fn_in_trait)]
pub trait Browser {
    /// The active tab of the current window, if there is one
    async fn active_tab(&self) -> Result<Option<TabInfo>>;

    /// Send to a tab's content script and wait for its reply
    async fn send_to_tab(&self, tab_id: i32, message: &Message) -> Result<Value>;

    async fn open_options_page(&self) -> Result<()>;

    /// Remove every menu entry this extension owns, then add `menu`
    async fn reset_context_menu(&self, menu: &ContextMenu) -> Result<()>;
}
