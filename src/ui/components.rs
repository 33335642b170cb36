/// Reusable UI components

use crate::config::CARD_COUNT_CHOICES;
use crate::flashcard::Flashcard;
use patternfly_yew::prelude::*;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FlashcardItemProps {
    pub index: usize,
    pub card: Flashcard,
    pub on_delete: Callback<usize>,
    pub on_regenerate: Callback<usize>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(FlashcardItem)]
pub fn flashcard_item(props: &FlashcardItemProps) -> Html {
    let index = props.index;

    html! {
        <div class="flashcard">
            <div class="card-actions">
                <Button
                    onclick={props.on_delete.reform(move |_| index)}
                    disabled={props.disabled}
                    variant={ButtonVariant::Danger}
                    size={ButtonSize::Small}
                >
                    {"Delete"}
                </Button>
                <Button
                    onclick={props.on_regenerate.reform(move |_| index)}
                    disabled={props.disabled}
                    variant={ButtonVariant::Secondary}
                    size={ButtonSize::Small}
                >
                    {"Regenerate"}
                </Button>
            </div>
            <div class="card-front" title={props.card.front.clone()}>{&props.card.front}</div>
            <div class="card-back" title={props.card.back.clone()}>{&props.card.back}</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CardCountSelectProps {
    pub value: usize,
    pub onchange: Callback<usize>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(CardCountSelect)]
pub fn card_count_select(props: &CardCountSelectProps) -> Html {
    let onchange = {
        let callback = props.onchange.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(count) = select.value().parse::<usize>() {
                    callback.emit(count);
                }
            }
        })
    };

    html! {
        <label class="card-count">
            {"Cards: "}
            <select id="card-count" {onchange} disabled={props.disabled}>
                {for CARD_COUNT_CHOICES.iter().map(|count| html! {
                    <option value={count.to_string()} selected={*count == props.value}>
                        {count.to_string()}
                    </option>
                })}
            </select>
        </label>
    }
}
