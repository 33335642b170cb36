/// Web Clipper - Chrome Extension that turns web pages into Anki flashcards
/// Built with Rust + WASM + Yew

pub mod anki;
pub mod background;
pub mod browser;
pub mod chrome;
pub mod completion;
pub mod config;
pub mod content;
pub mod error;
pub mod extractor;
pub mod flashcard;
pub mod messages;
pub mod operations;
pub mod settings;
pub mod storage;
pub mod text;
pub mod ui;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the settings page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::SettingsPage>::new().render();
}

// Service worker events; background.js attaches the listeners and calls these
#[wasm_bindgen]
pub async fn handle_installed() {
    background::on_installed(&chrome::ChromeBrowser).await;
}

#[wasm_bindgen]
pub async fn handle_menu_click(info: JsValue, tab: JsValue) {
    let info = chrome::from_js(info).unwrap_or(serde_json::Value::Null);
    let tab = chrome::from_js(tab).unwrap_or(serde_json::Value::Null);
    background::relay_menu_click(&chrome::ChromeBrowser, info, tab).await;
}

#[wasm_bindgen]
pub async fn handle_message(request: JsValue) -> bool {
    let request = chrome::from_js(request).unwrap_or(serde_json::Value::Null);
    background::relay_message(&chrome::ChromeBrowser, request).await
}

// Listen for extraction requests inside the visited page
#[wasm_bindgen]
pub fn start_content() {
    content::listen();
}
