use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::error::ApiError;
use crate::models::Health;

use super::hooks::{use_interest, use_services};
use super::shell::{bind_input, page_shell};

const GREETING: &str = "Hi! Ask me about your spending, budgets, or savings.";
const FALLBACK_REPLY: &str = "Sorry, the assistant is unavailable right now. Please try again later.";

#[derive(Clone, PartialEq)]
enum Speaker {
    User,
    Assistant,
}

#[derive(Clone, PartialEq)]
struct ChatLine {
    speaker: Speaker,
    text: String,
}

#[function_component(AssistantPage)]
pub fn assistant_page() -> Html {
    let services = use_services();
    let interest = use_interest();
    let api = services.assistant(&interest);

    let lines = use_state(|| {
        vec![ChatLine {
            speaker: Speaker::Assistant,
            text: GREETING.to_string(),
        }]
    });
    let draft = use_state(String::new);
    let waiting = use_state(|| false);
    let health = use_state(|| None::<Health>);

    {
        let api = api.clone();
        let health = health.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.health().await {
                        Ok(status) => health.set(Some(status)),
                        Err(err) if err.is_cancelled() => {}
                        Err(err) => tracing::warn!(error = %err, "assistant health check failed"),
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_submit = {
        let lines = lines.clone();
        let draft = draft.clone();
        let waiting = waiting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let message = draft.trim().to_string();
            if message.is_empty() || *waiting {
                return;
            }

            let mut history = (*lines).clone();
            history.push(ChatLine {
                speaker: Speaker::User,
                text: message.clone(),
            });
            lines.set(history.clone());
            draft.set(String::new());
            waiting.set(true);

            let api = api.clone();
            let lines = lines.clone();
            let waiting = waiting.clone();
            spawn_local(async move {
                let reply = match api.chat(&message, None).await {
                    Ok(reply) => reply.response,
                    Err(ApiError::Cancelled) => return,
                    Err(err) => {
                        tracing::warn!(error = %err, "chat request failed");
                        FALLBACK_REPLY.to_string()
                    }
                };
                history.push(ChatLine {
                    speaker: Speaker::Assistant,
                    text: reply,
                });
                lines.set(history);
                waiting.set(false);
            });
        })
    };

    let badge = match &*health {
        Some(h) if h.is_healthy() && h.ollama_available => html! {
            <span class="text-xs px-2 py-1 rounded-full bg-green-100 text-green-700">
                { h.model.clone().unwrap_or_else(|| "online".to_string()) }
            </span>
        },
        Some(_) => html! {
            <span class="text-xs px-2 py-1 rounded-full bg-yellow-100 text-yellow-700">{"model offline"}</span>
        },
        None => html! {
            <span class="text-xs px-2 py-1 rounded-full bg-secondary text-muted-foreground">{"checking"}</span>
        },
    };

    page_shell(
        "AI Assistant",
        badge,
        html! {
            <div class="bg-card rounded-[10px] border border-border flex flex-col h-[60vh]">
                <div class="flex-1 overflow-y-auto p-6 space-y-3">
                    { for lines.iter().map(|line| {
                        let class = match line.speaker {
                            Speaker::User => "ml-auto max-w-[75%] bg-primary text-primary-foreground rounded-xl px-4 py-2 text-sm",
                            Speaker::Assistant => "mr-auto max-w-[75%] bg-secondary text-foreground rounded-xl px-4 py-2 text-sm whitespace-pre-line",
                        };
                        html! { <div {class}>{ line.text.clone() }</div> }
                    }) }
                    if *waiting {
                        <div class="mr-auto text-sm text-muted-foreground">{"Thinking..."}</div>
                    }
                </div>
                <form onsubmit={on_submit} class="border-t border-border p-4 flex gap-2">
                    <input
                        placeholder="Ask about your finances..."
                        value={(*draft).clone()}
                        oninput={bind_input(&draft)}
                        class="flex-1 px-4 py-2 bg-input border border-input rounded-lg text-foreground"
                    />
                    <button type="submit" disabled={*waiting} class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm">
                        {"Send"}
                    </button>
                </form>
            </div>
        },
    )
}
