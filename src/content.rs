/// Content script: reads the page and answers extraction requests

use crate::chrome::{ChromeStorage, onRuntimeMessage, to_js};
use crate::completion::OpenAiClient;
use crate::extractor::{capture_highlight, extract};
use crate::flashcard::PageContent;
use crate::messages::{ExtractResponse, Message};
use crate::settings::SettingsStore;
use crate::storage::HighlightStore;
use crate::text::join_paragraphs;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Document, Element};

/// The first `article`, else `main`, else the body
pub fn main_content(document: &Document) -> Option<Element> {
    ["article", "main"]
        .iter()
        .find_map(|selector| document.query_selector(selector).ok().flatten())
        .or_else(|| document.body().map(Element::from))
}

/// Trimmed text of every paragraph under `root`, space-joined
pub fn paragraph_text(root: &Element) -> String {
    let Ok(paragraphs) = root.query_selector_all("p") else {
        return String::new();
    };
    let text = join_paragraphs(
        (0..paragraphs.length())
            .filter_map(|i| paragraphs.item(i))
            .filter_map(|node| node.text_content()),
    );
    log::debug!("Extracted {} paragraphs worth of text", paragraphs.length());
    text
}

pub fn read_page(document: &Document) -> PageContent {
    PageContent {
        text: main_content(document)
            .map(|root| paragraph_text(&root))
            .unwrap_or_default(),
        title: document.title(),
        url: document
            .location()
            .and_then(|location| location.href().ok())
            .unwrap_or_default(),
        timestamp: js_sys::Date::new_0().to_iso_string().into(),
    }
}

async fn handle_extract(card_count: usize) -> ExtractResponse {
    log::info!("Content script received message with card count: {}", card_count);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return ExtractResponse::Failure {
            error: "No document available".to_string(),
        };
    };
    let page = read_page(&document);
    let settings = SettingsStore::new(ChromeStorage::sync());

    let result = extract(&page, card_count, &settings, OpenAiClient::new).await;
    if let Err(e) = &result {
        log::error!("Error in content script: {}", e);
    }
    ExtractResponse::from_result(result)
}

async fn handle_highlight(text: String) {
    let settings = SettingsStore::new(ChromeStorage::sync());
    let highlights = HighlightStore::new(ChromeStorage::local());

    if let Err(e) = capture_highlight(&text, &settings, &highlights, OpenAiClient::new).await {
        log::error!("Error saving highlight: {}", e);
    }
}

/// Register the runtime message listener for this page
pub fn listen() {
    let handler = Closure::wrap(Box::new(|request: JsValue, _sender: JsValue| -> JsValue {
        match serde_wasm_bindgen::from_value::<Message>(request) {
            Ok(Message::ExtractContent { card_count, .. }) => future_to_promise(async move {
                let response = handle_extract(card_count).await;
                to_js(&response).map_err(|e| JsValue::from_str(&e.to_string()))
            })
            .into(),
            Ok(Message::SaveHighlight { text }) => {
                spawn_local(handle_highlight(text));
                JsValue::UNDEFINED
            }
            _ => JsValue::UNDEFINED,
        }
    }) as Box<dyn FnMut(JsValue, JsValue) -> JsValue>);

    onRuntimeMessage(handler.as_ref().unchecked_ref());
    handler.forget();
}
