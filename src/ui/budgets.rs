use rust_decimal::Decimal;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::error::ApiError;
use crate::format::{format_money, percent_of};
use crate::forms::{CategoryForm, CATEGORY_COLORS};
use crate::models::Budget;
use crate::sync::{add_category, delete_category, refresh_categories};

use super::app::use_currency_symbol;
use super::hooks::{use_category_store, use_interest, use_services};
use super::shell::{bind_input, error_banner, icon_plus, page_shell};

#[function_component(BudgetsPage)]
pub fn budgets_page() -> Html {
    let services = use_services();
    let interest = use_interest();
    let store = use_category_store();
    let currency_symbol = use_currency_symbol();
    let api = services.budgets(&interest);

    // Server rows carry `remaining`/`income`, which the store does not keep.
    let budgets = use_state(Vec::<Budget>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let reload_tick = use_state(|| 0u32);

    let show_form = use_state(|| false);
    let name = use_state(String::new);
    let limit = use_state(String::new);
    let color = use_state(|| CATEGORY_COLORS[0].to_string());
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let pending_delete = use_state(|| None::<i64>);

    {
        let api = api.clone();
        let store = store.clone();
        let budgets = budgets.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                loading.set(true);
                spawn_local(async move {
                    match refresh_categories(&api, &store).await {
                        Ok(list) => {
                            budgets.set(list);
                            error.set(None);
                        }
                        Err(ApiError::Cancelled) => return,
                        Err(err) => error.set(Some(err.to_string())),
                    }
                    loading.set(false);
                });
                || ()
            },
            *reload_tick,
        );
    }

    let on_retry = {
        let reload_tick = reload_tick.clone();
        Callback::from(move |_| reload_tick.set(*reload_tick + 1))
    };

    let on_toggle_form = {
        let show_form = show_form.clone();
        let form_error = form_error.clone();
        Callback::from(move |_| {
            show_form.set(!*show_form);
            form_error.set(None);
        })
    };

    let on_submit = {
        let api = api.clone();
        let store = store.clone();
        let budgets = budgets.clone();
        let show_form = show_form.clone();
        let name = name.clone();
        let limit = limit.clone();
        let color = color.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = CategoryForm {
                name: (*name).clone(),
                budget_limit: (*limit).clone(),
                color: (*color).clone(),
            };
            if let Err(invalid) = form.validate() {
                form_error.set(Some(invalid.to_string()));
                return;
            }

            let api = api.clone();
            let store = store.clone();
            let budgets = budgets.clone();
            let show_form = show_form.clone();
            let name = name.clone();
            let limit = limit.clone();
            let color = color.clone();
            let form_error = form_error.clone();
            let saving = saving.clone();
            saving.set(true);
            spawn_local(async move {
                match add_category(&api, &store, &form).await {
                    Ok(list) => {
                        budgets.set(list);
                        name.set(String::new());
                        limit.set(String::new());
                        color.set(CATEGORY_COLORS[0].to_string());
                        form_error.set(None);
                        show_form.set(false);
                    }
                    Err(ApiError::Cancelled) => return,
                    Err(err) => form_error.set(Some(format!("Failed to add budget: {}", err))),
                }
                saving.set(false);
            });
        })
    };

    let on_confirm_delete = {
        let api = api.clone();
        let store = store.clone();
        let budgets = budgets.clone();
        let pending_delete = pending_delete.clone();
        let error = error.clone();
        Callback::from(move |_| {
            let Some(id) = *pending_delete else {
                return;
            };
            let api = api.clone();
            let store = store.clone();
            let budgets = budgets.clone();
            let pending_delete = pending_delete.clone();
            let error = error.clone();
            spawn_local(async move {
                match delete_category(&api, &store, id).await {
                    Ok(list) => budgets.set(list),
                    Err(ApiError::Cancelled) => return,
                    Err(err) => error.set(Some(format!("Failed to delete budget: {}", err))),
                }
                pending_delete.set(None);
            });
        })
    };

    let categories = store.list();
    let total_limit: Decimal = categories.iter().map(|c| c.budget_limit).sum();
    let total_spent: Decimal = categories.iter().map(|c| c.spent).sum();
    let overspent = categories.iter().filter(|c| c.is_overspent()).count();

    let form_panel = if *show_form {
        html! {
            <form onsubmit={on_submit} class="bg-card rounded-[10px] p-6 border border-border space-y-4">
                <h3 class="font-bold text-foreground text-lg">{"Add New Category"}</h3>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                    <input placeholder="e.g., Food & Dining" value={(*name).clone()} oninput={bind_input(&name)} class="p-2 border rounded" />
                    <input type="number" min="0" step="0.01" placeholder={format!("Budget Limit ({})", currency_symbol)} value={(*limit).clone()} oninput={bind_input(&limit)} class="p-2 border rounded" />
                </div>
                <div class="flex gap-2">
                    { for CATEGORY_COLORS.iter().map(|c| {
                        let selected = *color == *c;
                        let on_pick = {
                            let color = color.clone();
                            let c = c.to_string();
                            Callback::from(move |_| color.set(c.clone()))
                        };
                        html! {
                            <button
                                type="button"
                                onclick={on_pick}
                                class={if selected { "w-8 h-8 rounded-full border-2 border-foreground scale-110" } else { "w-8 h-8 rounded-full border-2 border-border" }}
                                style={format!("background-color: {}", c)}
                            />
                        }
                    }) }
                </div>
                if let Some(msg) = &*form_error {
                    <p class="text-sm text-red-500">{ msg.clone() }</p>
                }
                <div class="flex justify-end">
                    <button type="submit" disabled={*saving} class="bg-accent text-white px-4 py-2 rounded">
                        { if *saving { "Saving..." } else { "Add Category" } }
                    </button>
                </div>
            </form>
        }
    } else {
        html! {}
    };

    let delete_prompt = match *pending_delete {
        Some(id) => {
            let on_keep = {
                let pending_delete = pending_delete.clone();
                Callback::from(move |_| pending_delete.set(None))
            };
            let label = store.get(id).map(|c| c.name).unwrap_or_default();
            html! {
                <div class="bg-red-50 border border-red-200 rounded-lg p-4 flex items-center justify-between">
                    <span class="text-sm text-red-700">{ format!("Delete budget \"{}\"? Transactions keep their category name.", label) }</span>
                    <div class="flex gap-2">
                        <button onclick={on_keep} class="px-3 py-1 border rounded text-sm">{"Keep"}</button>
                        <button onclick={on_confirm_delete} class="px-3 py-1 bg-red-600 text-white rounded text-sm">{"Delete"}</button>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    let list = if *loading && categories.is_empty() {
        html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
    } else if categories.is_empty() {
        html! { <p class="text-sm text-muted-foreground">{"No budgets set yet."}</p> }
    } else {
        html! {
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                { for categories.iter().map(|c| {
                    let percent = percent_of(c.spent, c.budget_limit);
                    let remaining = budgets
                        .iter()
                        .find(|b| b.id == c.id)
                        .map(|b| b.remaining)
                        .unwrap_or(c.budget_limit - c.spent);
                    let on_delete = {
                        let pending_delete = pending_delete.clone();
                        let id = c.id;
                        Callback::from(move |_| pending_delete.set(Some(id)))
                    };
                    html! {
                        <div key={c.id.to_string()} class="bg-card rounded-[10px] p-6 border border-border space-y-3">
                            <div class="flex items-center justify-between">
                                <span class="flex items-center gap-2 font-bold text-foreground">
                                    <span class="w-3 h-3 rounded-full inline-block" style={format!("background-color: {}", c.color)}></span>
                                    { c.name.clone() }
                                </span>
                                <button onclick={on_delete} class="text-xs text-red-600 underline">{"Delete"}</button>
                            </div>
                            <p class="text-xs text-muted-foreground">{ c.period.clone() }</p>
                            <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                                <div class="h-full" style={format!("width: {}%; background-color: {}", percent, c.color)}></div>
                            </div>
                            <div class="flex items-center justify-between text-sm">
                                <span>{ format!("{} of {}", format_money(c.spent, &currency_symbol), format_money(c.budget_limit, &currency_symbol)) }</span>
                                <span class={if remaining < Decimal::ZERO { "text-red-600" } else { "text-muted-foreground" }}>
                                    { format!("{} left", format_money(remaining, &currency_symbol)) }
                                </span>
                            </div>
                        </div>
                    }
                }) }
            </div>
        }
    };

    page_shell(
        "Budgets",
        html! {
            <button onclick={on_toggle_form} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90">
                { icon_plus() }
                { if *show_form { "Close" } else { "Add Category" } }
            </button>
        },
        html! {
            <>
                if let Some(msg) = &*error {
                    { error_banner(msg, Some(on_retry)) }
                }
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <p class="text-sm text-muted-foreground mb-2">{"Total Budget"}</p>
                        <h3 class="text-2xl font-bold text-foreground">{ format_money(total_limit, &currency_symbol) }</h3>
                    </div>
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <p class="text-sm text-muted-foreground mb-2">{"Total Spent"}</p>
                        <h3 class="text-2xl font-bold text-foreground">{ format_money(total_spent, &currency_symbol) }</h3>
                    </div>
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <p class="text-sm text-muted-foreground mb-2">{"Over Limit"}</p>
                        <h3 class={if overspent > 0 { "text-2xl font-bold text-red-600" } else { "text-2xl font-bold text-foreground" }}>
                            { format!("{} of {}", overspent, categories.len()) }
                        </h3>
                    </div>
                </div>
                { form_panel }
                { delete_prompt }
                { list }
            </>
        },
    )
}
