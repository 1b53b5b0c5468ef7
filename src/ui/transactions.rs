use chrono::Local;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::TransactionsApi;
use crate::error::ApiError;
use crate::format::format_money;
use crate::forms::TransactionForm;
use crate::models::{CategoryOption, Transaction, TransactionKind};
use crate::sync::{delete_transaction, save_transaction};

use super::app::use_currency_symbol;
use super::hooks::{use_interest, use_services};
use super::shell::{bind_input, bind_select, bind_textarea, error_banner, icon_plus, page_shell};

fn fetch_transactions(
    api: TransactionsApi,
    transactions: UseStateHandle<Vec<Transaction>>,
    loading: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
) {
    loading.set(true);
    spawn_local(async move {
        match api.list().await {
            Ok(list) => {
                transactions.set(list);
                error.set(None);
            }
            Err(ApiError::Cancelled) => return,
            Err(err) => error.set(Some(err.to_string())),
        }
        loading.set(false);
    });
}

#[function_component(TransactionsPage)]
pub fn transactions_page() -> Html {
    let services = use_services();
    let interest = use_interest();
    let currency_symbol = use_currency_symbol();
    let api = services.transactions(&interest);

    let transactions = use_state(Vec::<Transaction>::new);
    let category_options = use_state(Vec::<CategoryOption>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);

    let show_form = use_state(|| false);
    let editing = use_state(|| None::<i64>);
    let pending_delete = use_state(|| None::<i64>);
    let action_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let form_date = use_state(String::new);
    let form_title = use_state(String::new);
    let form_kind = use_state(|| TransactionKind::Expense.as_str().to_string());
    let form_amount = use_state(String::new);
    let form_category = use_state(String::new);
    let form_notes = use_state(String::new);

    {
        let api = api.clone();
        let transactions = transactions.clone();
        let loading = loading.clone();
        let error = error.clone();
        let category_options = category_options.clone();
        let budgets = services.budgets(&interest);
        use_effect_with_deps(
            move |_| {
                fetch_transactions(api, transactions, loading, error);
                spawn_local(async move {
                    // Only feeds the picker; a failure leaves free-text entry.
                    if let Ok(options) = budgets.categories().await {
                        category_options.set(options);
                    }
                });
                || ()
            },
            (),
        );
    }

    let fill_form = {
        let form_date = form_date.clone();
        let form_title = form_title.clone();
        let form_kind = form_kind.clone();
        let form_amount = form_amount.clone();
        let form_category = form_category.clone();
        let form_notes = form_notes.clone();
        move |form: TransactionForm| {
            form_date.set(form.date);
            form_title.set(form.title);
            form_kind.set(form.kind.as_str().to_string());
            form_amount.set(form.amount);
            form_category.set(form.category);
            form_notes.set(form.notes);
        }
    };

    let on_add = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let action_error = action_error.clone();
        let fill_form = fill_form.clone();
        Callback::from(move |_| {
            fill_form(TransactionForm::blank(Local::now().date_naive()));
            editing.set(None);
            action_error.set(None);
            show_form.set(true);
        })
    };

    let on_edit = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let action_error = action_error.clone();
        let fill_form = fill_form.clone();
        Callback::from(move |tx: Transaction| {
            fill_form(TransactionForm::from(&tx));
            editing.set(Some(tx.id));
            action_error.set(None);
            show_form.set(true);
        })
    };

    let on_cancel = {
        let show_form = show_form.clone();
        Callback::from(move |_| show_form.set(false))
    };

    let on_save = {
        let api = api.clone();
        let transactions = transactions.clone();
        let show_form = show_form.clone();
        let editing = editing.clone();
        let action_error = action_error.clone();
        let saving = saving.clone();
        let form_date = form_date.clone();
        let form_title = form_title.clone();
        let form_kind = form_kind.clone();
        let form_amount = form_amount.clone();
        let form_category = form_category.clone();
        let form_notes = form_notes.clone();
        Callback::from(move |_| {
            let form = TransactionForm {
                date: (*form_date).clone(),
                title: (*form_title).clone(),
                kind: TransactionKind::parse(&form_kind).unwrap_or(TransactionKind::Expense),
                amount: (*form_amount).clone(),
                category: (*form_category).clone(),
                notes: (*form_notes).clone(),
            };
            // Fail fast on the client; nothing is sent for an invalid form.
            if let Err(invalid) = form.validate() {
                action_error.set(Some(invalid.to_string()));
                return;
            }

            let api = api.clone();
            let transactions = transactions.clone();
            let show_form = show_form.clone();
            let action_error = action_error.clone();
            let saving = saving.clone();
            let editing_id = *editing;
            saving.set(true);
            action_error.set(None);
            spawn_local(async move {
                match save_transaction(&api, editing_id, &form).await {
                    Ok(list) => {
                        transactions.set(list);
                        show_form.set(false);
                    }
                    Err(ApiError::Cancelled) => return,
                    Err(err) => action_error.set(Some(format!("Failed to save transaction: {}", err))),
                }
                saving.set(false);
            });
        })
    };

    let on_confirm_delete = {
        let api = api.clone();
        let transactions = transactions.clone();
        let pending_delete = pending_delete.clone();
        let action_error = action_error.clone();
        Callback::from(move |_| {
            let Some(id) = *pending_delete else {
                return;
            };
            let api = api.clone();
            let transactions = transactions.clone();
            let pending_delete = pending_delete.clone();
            let action_error = action_error.clone();
            spawn_local(async move {
                match delete_transaction(&api, id).await {
                    Ok(list) => transactions.set(list),
                    Err(ApiError::Cancelled) => return,
                    Err(err) => action_error.set(Some(format!("Failed to delete transaction: {}", err))),
                }
                pending_delete.set(None);
            });
        })
    };

    let on_retry = {
        let api = api.clone();
        let transactions = transactions.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |_| {
            fetch_transactions(api.clone(), transactions.clone(), loading.clone(), error.clone())
        })
    };

    let needle = search.trim().to_lowercase();
    let visible: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| {
            needle.is_empty()
                || tx.title.to_lowercase().contains(&needle)
                || tx.category.to_lowercase().contains(&needle)
        })
        .collect();

    let actions = html! {
        <button onclick={on_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90">
            { icon_plus() }
            {"Add Transaction"}
        </button>
    };

    let form_panel = if *show_form {
        html! {
            <div class="bg-card rounded-[10px] p-6 border border-border">
                <h3 class="font-bold text-foreground text-lg mb-4">
                    { if editing.is_some() { "Edit Transaction" } else { "Add Transaction" } }
                </h3>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    <input placeholder="Title" value={(*form_title).clone()} oninput={bind_input(&form_title)} class="p-2 border rounded" />
                    <input placeholder={format!("Amount ({})", currency_symbol)} value={(*form_amount).clone()} oninput={bind_input(&form_amount)} class="p-2 border rounded" />
                    <input type="date" value={(*form_date).clone()} oninput={bind_input(&form_date)} class="p-2 border rounded" />
                    <select onchange={bind_select(&form_kind)} class="p-2 border rounded">
                        <option value="expense" selected={*form_kind == "expense"}>{"Expense"}</option>
                        <option value="income" selected={*form_kind == "income"}>{"Income"}</option>
                    </select>
                    <input list="category-options" placeholder="Category" value={(*form_category).clone()} oninput={bind_input(&form_category)} class="p-2 border rounded" />
                    <datalist id="category-options">
                        { for category_options.iter().map(|c| html! { <option value={c.name.clone()} /> }) }
                    </datalist>
                    <textarea placeholder="Notes" value={(*form_notes).clone()} oninput={bind_textarea(&form_notes)} class="p-2 border rounded md:col-span-3" />
                </div>
                <div class="flex justify-end gap-2 mt-4">
                    <button onclick={on_cancel} class="px-4 py-2 border rounded">{"Cancel"}</button>
                    <button onclick={on_save} disabled={*saving} class="bg-accent text-white px-4 py-2 rounded">
                        { if *saving { "Saving..." } else { "Save" } }
                    </button>
                </div>
            </div>
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
            let title = transactions
                .iter()
                .find(|tx| tx.id == id)
                .map(|tx| tx.title.clone())
                .unwrap_or_default();
            html! {
                <div class="bg-red-50 border border-red-200 rounded-lg p-4 flex items-center justify-between">
                    <span class="text-sm text-red-700">{ format!("Delete \"{}\"? This cannot be undone.", title) }</span>
                    <div class="flex gap-2">
                        <button onclick={on_keep} class="px-3 py-1 border rounded text-sm">{"Keep"}</button>
                        <button onclick={on_confirm_delete} class="px-3 py-1 bg-red-600 text-white rounded text-sm">{"Delete"}</button>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    let table_body = if *loading && transactions.is_empty() {
        html! { <tr><td colspan="5" class="px-6 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
    } else if visible.is_empty() {
        html! { <tr><td colspan="5" class="px-6 py-6 text-center text-muted-foreground">{"No transactions yet."}</td></tr> }
    } else {
        html! {
            <>
                { for visible.iter().map(|tx| {
                    let tx = (*tx).clone();
                    let amount = match tx.kind {
                        TransactionKind::Income => format!("+ {}", format_money(tx.amount, &currency_symbol)),
                        TransactionKind::Expense => format!("- {}", format_money(tx.amount, &currency_symbol)),
                    };
                    let on_edit = {
                        let on_edit = on_edit.clone();
                        let tx = tx.clone();
                        Callback::from(move |_| on_edit.emit(tx.clone()))
                    };
                    let on_delete = {
                        let pending_delete = pending_delete.clone();
                        let id = tx.id;
                        Callback::from(move |_| pending_delete.set(Some(id)))
                    };
                    html! {
                        <tr key={tx.id.to_string()} class="text-sm hover:bg-muted/30">
                            <td class="px-6 py-3 text-muted-foreground">{ tx.date.to_string() }</td>
                            <td class="px-6 py-3 text-foreground">
                                { tx.title.clone() }
                                { match &tx.notes {
                                    Some(notes) => html! { <p class="text-xs text-muted-foreground">{ notes.clone() }</p> },
                                    None => html! {},
                                } }
                            </td>
                            <td class="px-6 py-3">
                                <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ tx.category.clone() }</span>
                            </td>
                            <td class="px-6 py-3 text-right font-semibold text-foreground">{ amount }</td>
                            <td class="px-6 py-3 text-right space-x-2">
                                <button onclick={on_edit} class="text-xs underline">{"Edit"}</button>
                                <button onclick={on_delete} class="text-xs text-red-600 underline">{"Delete"}</button>
                            </td>
                        </tr>
                    }
                }) }
            </>
        }
    };

    page_shell(
        "Transactions",
        actions,
        html! {
            <>
                if let Some(msg) = &*error {
                    { error_banner(msg, Some(on_retry)) }
                }
                if let Some(msg) = &*action_error {
                    { error_banner(msg, None) }
                }
                { form_panel }
                { delete_prompt }
                <input placeholder="Search by title or category" value={(*search).clone()} oninput={bind_input(&search)} class="w-full md:w-80 p-2 border rounded" />
                <div class="bg-card rounded-lg border border-border overflow-hidden">
                    <table class="w-full text-left border-collapse">
                        <thead class="bg-secondary border-b border-border">
                            <tr>
                                <th class="px-6 py-3 text-sm font-semibold text-secondary-foreground">{"Date"}</th>
                                <th class="px-6 py-3 text-sm font-semibold text-secondary-foreground">{"Title"}</th>
                                <th class="px-6 py-3 text-sm font-semibold text-secondary-foreground">{"Category"}</th>
                                <th class="px-6 py-3 text-right text-sm font-semibold text-secondary-foreground">{"Amount"}</th>
                                <th class="px-6 py-3"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            { table_body }
                        </tbody>
                    </table>
                </div>
            </>
        },
    )
}
