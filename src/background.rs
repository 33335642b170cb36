/// Background service worker: context menu and relays

use crate::browser::{Browser, ContextMenu, MenuClick};
use crate::config::{MENU_ID, MENU_TITLE};
use crate::flashcard::TabInfo;
use crate::messages::Message;
use serde_json::Value;

pub fn highlight_menu() -> ContextMenu {
    ContextMenu {
        id: MENU_ID.to_string(),
        title: MENU_TITLE.to_string(),
        contexts: vec!["selection".to_string()],
    }
}

/// (Re)register the single selection menu entry
pub async fn on_installed<B: Browser>(browser: &B) {
    if let Err(e) = browser.reset_context_menu(&highlight_menu()).await {
        log::error!("Error creating context menu: {}", e);
    }
}

/// Forward a highlighted selection to the tab it came from
pub async fn on_menu_clicked<B: Browser>(browser: &B, info: &MenuClick, tab: Option<&TabInfo>) {
    if !info.is_item(MENU_ID) {
        return;
    }
    let Some(tab_id) = tab.and_then(|t| t.id) else {
        log::warn!("Context menu click without a tab");
        return;
    };

    let message = Message::SaveHighlight {
        text: info.selection_text.clone().unwrap_or_default(),
    };
    if let Err(e) = browser.send_to_tab(tab_id, &message).await {
        log::error!("Error handling context menu click: {}", e);
    }
}

/// Runtime messages addressed to the background; returns whether it was handled
pub async fn on_message<B: Browser>(browser: &B, message: &Message) -> bool {
    match message {
        Message::OpenOptionsPage => {
            if let Err(e) = browser.open_options_page().await {
                log::error!("Could not open options page: {}", e);
            }
            true
        }
        _ => false,
    }
}

/// Relay a raw `contextMenus.onClicked` payload
pub async fn relay_menu_click<B: Browser>(browser: &B, info: Value, tab: Value) {
    let info: MenuClick = match serde_json::from_value(info) {
        Ok(info) => info,
        Err(e) => {
            log::error!("Unreadable context menu click: {}", e);
            return;
        }
    };
    let tab: Option<TabInfo> = serde_json::from_value(tab).unwrap_or(None);
    on_menu_clicked(browser, &info, tab.as_ref()).await;
}

/// Relay a raw `runtime.onMessage` request; unknown shapes are ignored
pub async fn relay_message<B: Browser>(browser: &B, request: Value) -> bool {
    match serde_json::from_value::<Message>(request) {
        Ok(message) => on_message(browser, &message).await,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBrowser;
    use futures::executor::block_on;
    use serde_json::json;

    fn click(id: &str, text: &str) -> MenuClick {
        serde_json::from_value(json!({"menuItemId": id, "selectionText": text})).unwrap()
    }

    #[test]
    fn test_on_installed_registers_one_entry() {
        let browser = FakeBrowser::default();

        block_on(on_installed(&browser));
        block_on(on_installed(&browser));

        let menus = browser.menus();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].id, "save-highlight");
        assert_eq!(menus[0].contexts, vec!["selection".to_string()]);
    }

    #[test]
    fn test_menu_click_forwards_selection() {
        let browser = FakeBrowser::default();
        let tab = TabInfo::new(9, "https://example.com", "Example");

        block_on(on_menu_clicked(&browser, &click(MENU_ID, "chosen words"), Some(&tab)));

        assert_eq!(
            browser.sent(),
            vec![(9, Message::SaveHighlight { text: "chosen words".to_string() })]
        );
    }

    #[test]
    fn test_menu_click_ignored_for_other_items_or_missing_tab() {
        let browser = FakeBrowser::default();
        let tab = TabInfo::new(9, "https://example.com", "Example");

        block_on(on_menu_clicked(&browser, &click("other", "x"), Some(&tab)));
        block_on(on_menu_clicked(&browser, &click(MENU_ID, "x"), None));

        assert!(browser.sent().is_empty());
    }

    #[test]
    fn test_menu_click_messaging_failure_is_swallowed() {
        let browser = FakeBrowser::default().failing_sends();
        let tab = TabInfo::new(9, "https://example.com", "Example");

        block_on(on_menu_clicked(&browser, &click(MENU_ID, "x"), Some(&tab)));

        assert_eq!(browser.sent().len(), 1);
    }

    #[test]
    fn test_open_options_message() {
        let browser = FakeBrowser::default();

        assert!(block_on(on_message(&browser, &Message::OpenOptionsPage)));
        assert!(!block_on(on_message(
            &browser,
            &Message::SaveHighlight { text: "x".to_string() }
        )));
        assert_eq!(browser.options_opened(), 1);
    }

    #[test]
    fn test_raw_menu_click_reaches_tab() {
        let browser = FakeBrowser::default();

        block_on(relay_menu_click(
            &browser,
            json!({"menuItemId": MENU_ID, "selectionText": "woken by a click", "editable": false}),
            json!({"id": 4, "url": "https://example.com", "title": "Example", "active": true}),
        ));

        assert_eq!(
            browser.sent(),
            vec![(4, Message::SaveHighlight { text: "woken by a click".to_string() })]
        );
    }

    #[test]
    fn test_raw_menu_click_without_tab_or_info() {
        let browser = FakeBrowser::default();

        block_on(relay_menu_click(&browser, json!({"menuItemId": MENU_ID}), Value::Null));
        block_on(relay_menu_click(&browser, Value::Null, json!({"id": 4})));

        assert!(browser.sent().is_empty());
    }

    #[test]
    fn test_raw_message_relay() {
        let browser = FakeBrowser::default();

        assert!(block_on(relay_message(&browser, json!({"action": "openOptionsPage"}))));
        assert!(!block_on(relay_message(&browser, json!({"action": "somethingElse"}))));
        assert!(!block_on(relay_message(&browser, Value::Null)));
        assert_eq!(browser.options_opened(), 1);
    }
}
