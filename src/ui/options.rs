/// Settings page: the OpenAI API key

use crate::chrome::ChromeStorage;
use crate::settings::SettingsStore;
use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const CLOSE_DELAY_MS: i32 = 1000;

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let api_key = use_state(String::new);
    let saved = use_state(|| false);
    let error = use_state(|| None::<String>);

    // Pre-fill with whatever is stored
    {
        let api_key = api_key.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match SettingsStore::new(ChromeStorage::sync()).api_key().await {
                    Ok(key) => api_key.set(key.unwrap_or_default()),
                    Err(e) => error.set(Some(format!("Failed to load settings: {}", e))),
                }
            });
            || ()
        });
    }

    let on_input = {
        let api_key = api_key.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                api_key.set(input.value());
            }
        })
    };

    let on_submit = {
        let api_key = api_key.clone();
        let saved = saved.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let key = (*api_key).clone();
            let saved = saved.clone();
            let error = error.clone();

            spawn_local(async move {
                match SettingsStore::new(ChromeStorage::sync()).save_api_key(&key).await {
                    Ok(()) => {
                        saved.set(true);
                        close_after_delay(saved);
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        error.set(Some(format!("Failed to save: {}", e)));
                    }
                }
            });
        })
    };

    html! {
        <div class="settings-page">
            <h1 class="popup-title">{"Web Clipper Settings"}</h1>

            if let Some(err) = (*error).clone() {
                <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                    {err}
                </Alert>
            }

            <form id="settings-form" onsubmit={on_submit}>
                <label class="settings-label">
                    {"OpenAI API Key"}
                    <input
                        id="openai-api-key"
                        type="password"
                        value={(*api_key).clone()}
                        oninput={on_input}
                        class="api-key-input"
                    />
                </label>
                <button id="save-settings" type="submit" disabled={*saved}>
                    {if *saved { "Saved!" } else { "Save Settings" }}
                </button>
            </form>
        </div>
    }
}

/// Restore the button and close the page after a short confirmation
fn close_after_delay(saved: UseStateHandle<bool>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let close = Closure::once_into_js(move || {
        saved.set(false);
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.close() {
                log::warn!("Could not close settings window: {:?}", e);
            }
        }
    });

    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(close.unchecked_ref(), CLOSE_DELAY_MS)
    {
        log::error!("Could not schedule close: {:?}", e);
    }
}
