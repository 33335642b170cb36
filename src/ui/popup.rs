/// Popup UI for Web Clipper

use crate::anki::AnkiConnect;
use crate::chrome::{ChromeBrowser, ChromeStorage};
use crate::config::DEFAULT_CARD_COUNT;
use crate::flashcard::Flashcard;
use crate::operations::{ExportOutcome, GenerateOutcome, Popup};
use crate::ui::components::{CardCountSelect, FlashcardItem};
use patternfly_yew::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

type ChromePopup = Popup<ChromeBrowser, ChromeStorage, ChromeStorage>;

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Generating,
    Working(String),
    Success(String),
    Error(String),
}

const GENERATE_FAILED: &str = "Failed to generate flashcards. Please refresh the page and try again.";

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);
    let flashcards = use_state(Vec::<Flashcard>::new);
    let card_count = use_state(|| DEFAULT_CARD_COUNT);
    let highlight_count = use_state(|| 0usize);
    let popup: Rc<ChromePopup> = use_memo((), |_| {
        Popup::new(ChromeBrowser, ChromeStorage::local(), ChromeStorage::sync())
    });

    // Load the stored set for the active tab on open
    {
        let flashcards = flashcards.clone();
        let highlight_count = highlight_count.clone();
        let popup = popup.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match popup.open().await {
                    Ok(cards) => flashcards.set(cards),
                    Err(e) => log::warn!("Could not load stored flashcards: {}", e),
                }
                match popup.saved_highlights().await {
                    Ok(saved) => highlight_count.set(saved.len()),
                    Err(e) => log::warn!("Could not load saved highlights: {}", e),
                }
            });
            || ()
        });
    }

    let on_count_change = {
        let card_count = card_count.clone();
        Callback::from(move |count: usize| card_count.set(count))
    };

    let on_generate = {
        let state = state.clone();
        let flashcards = flashcards.clone();
        let card_count = card_count.clone();
        let popup = popup.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let flashcards = flashcards.clone();
            let popup = popup.clone();
            let count = *card_count;

            state.set(AppState::Generating);

            spawn_local(async move {
                match popup.generate(count).await {
                    Ok(GenerateOutcome::Generated(cards)) => {
                        flashcards.set(cards);
                        state.set(AppState::Idle);
                    }
                    Ok(GenerateOutcome::NeedsApiKey) => {
                        state.set(AppState::Error(
                            "Please set your OpenAI API key in the extension settings".to_string(),
                        ));
                    }
                    Err(e) => {
                        log::error!("Error: {}", e);
                        state.set(AppState::Error(GENERATE_FAILED.to_string()));
                    }
                }
            });
        })
    };

    let on_delete = {
        let state = state.clone();
        let flashcards = flashcards.clone();
        let popup = popup.clone();

        Callback::from(move |index: usize| {
            let state = state.clone();
            let flashcards = flashcards.clone();
            let popup = popup.clone();

            spawn_local(async move {
                match popup.delete(index).await {
                    Ok(cards) => flashcards.set(cards),
                    Err(e) => {
                        log::error!("Error deleting flashcard: {}", e);
                        state.set(AppState::Error(
                            "Failed to delete flashcard. Please try again.".to_string(),
                        ));
                    }
                }
            });
        })
    };

    let on_regenerate = {
        let state = state.clone();
        let flashcards = flashcards.clone();
        let popup = popup.clone();

        Callback::from(move |index: usize| {
            let state = state.clone();
            let flashcards = flashcards.clone();
            let popup = popup.clone();

            state.set(AppState::Working("Regenerating flashcard...".to_string()));

            spawn_local(async move {
                match popup.regenerate(index).await {
                    Ok(cards) => {
                        flashcards.set(cards);
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        log::error!("Error regenerating flashcard: {}", e);
                        state.set(AppState::Error(
                            "Failed to regenerate flashcard. Please try again.".to_string(),
                        ));
                    }
                }
            });
        })
    };

    let on_export = {
        let state = state.clone();
        let popup = popup.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let popup = popup.clone();

            state.set(AppState::Working("Exporting to Anki...".to_string()));

            spawn_local(async move {
                match popup.export(&AnkiConnect::new()).await {
                    Ok(ExportOutcome::Exported(report)) => {
                        let mut message = format!("Successfully exported to Anki deck \"{}\"!", report.deck);
                        if report.rejected > 0 {
                            message.push_str(&format!(
                                " {} added, {} skipped as duplicates.",
                                report.added, report.rejected
                            ));
                        }
                        state.set(AppState::Success(message));
                    }
                    Ok(ExportOutcome::NothingToExport) => {
                        state.set(AppState::Idle);
                        log::info!("No flashcards to export for this page");
                    }
                    Err(e) => {
                        log::error!("Detailed export error: {}", e);
                        state.set(AppState::Error(format!(
                            "Failed to export to Anki: {}. Please make sure Anki is running and the AnkiConnect add-on is installed.",
                            e
                        )));
                    }
                }
            });
        })
    };

    let on_settings = {
        let popup = popup.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let popup = popup.clone();
            spawn_local(async move {
                if let Err(e) = popup.open_settings().await {
                    log::error!("{}", e);
                }
            });
        })
    };

    let on_clear_highlights = {
        let state = state.clone();
        let highlight_count = highlight_count.clone();
        let popup = popup.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let state = state.clone();
            let highlight_count = highlight_count.clone();
            let popup = popup.clone();
            spawn_local(async move {
                match popup.clear_highlights().await {
                    Ok(()) => highlight_count.set(0),
                    Err(e) => {
                        log::error!("Error clearing highlights: {}", e);
                        state.set(AppState::Error("Failed to clear saved highlights.".to_string()));
                    }
                }
            });
        })
    };

    let is_busy = matches!(*state, AppState::Generating | AppState::Working(_));
    let is_empty = flashcards.is_empty();
    // Empty sets shrink the popup; any cards expand it to a fixed height
    let height = if is_empty { "auto" } else { "600px" };

    html! {
        <div class={classes!("container", is_empty.then_some("empty"))} style={format!("height: {};", height)}>
            <header class={classes!(is_empty.then_some("empty"))}>
                <h1 class="popup-title">{"Web Clipper"}</h1>
                <div class="controls">
                    <CardCountSelect value={*card_count} onchange={on_count_change} disabled={is_busy} />
                    <Button onclick={on_generate} disabled={is_busy} variant={ButtonVariant::Primary}>
                        {if *state == AppState::Generating { "Generating..." } else { "Generate Knowledge" }}
                    </Button>
                    <Button onclick={on_export} disabled={is_busy || is_empty} variant={ButtonVariant::Secondary}>
                        {"Export to Anki"}
                    </Button>
                </div>
            </header>

            // Status display
            {match &*state {
                AppState::Working(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Success(msg) => html! {
                    <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                    </Alert>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle | AppState::Generating => html! {}
            }}

            <div class={classes!("content-wrapper", is_empty.then_some("empty"))}>
                <div id="flashcard-list">
                    {for flashcards.iter().enumerate().map(|(index, card)| html! {
                        <FlashcardItem
                            key={index}
                            index={index}
                            card={card.clone()}
                            on_delete={on_delete.clone()}
                            on_regenerate={on_regenerate.clone()}
                            disabled={is_busy}
                        />
                    })}
                </div>
            </div>

            if *highlight_count > 0 {
                <p class="saved-highlights">
                    {format!("{} saved highlight(s) ", *highlight_count)}
                    <a href="#" onclick={on_clear_highlights}>{"Clear"}</a>
                </p>
            }

            <p class="footer-popup">
                <a href="#" onclick={on_settings}>{"Settings"}</a>
                {" · Web Clipper v0.1.0"}
            </p>
        </div>
    }
}
