use rust_decimal::Decimal;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::error::ApiError;
use crate::format::{format_money, percent_of};
use crate::models::{ChartSlice, DashboardStats, FinancialSnapshot, TransactionKind};
use crate::sync::load_overview;

use super::app::use_currency_symbol;
use super::hooks::{use_category_store, use_interest, use_services};
use super::shell::{error_banner, page_shell, StatCard, StatIcon};

const ANALYSIS_QUESTION: &str =
    "Please analyze my financial situation and provide insights on my spending patterns and savings potential.";

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let services = use_services();
    let interest = use_interest();
    let store = use_category_store();
    let currency_symbol = use_currency_symbol();

    let stats = use_state(|| None::<DashboardStats>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let reload_tick = use_state(|| 0u32);

    let analysis = use_state(|| None::<String>);
    let analyzing = use_state(|| false);
    let analysis_error = use_state(|| None::<String>);

    {
        let stats = stats.clone();
        let loading = loading.clone();
        let error = error.clone();
        let dashboard = services.dashboard(&interest);
        let budgets = services.budgets(&interest);
        let store = store.clone();

        use_effect_with_deps(
            move |_| {
                loading.set(true);
                spawn_local(async move {
                    match load_overview(&dashboard, &budgets, &store).await {
                        Ok(next) => {
                            stats.set(Some(next));
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

    let on_analyze = {
        let stats = stats.clone();
        let analysis = analysis.clone();
        let analyzing = analyzing.clone();
        let analysis_error = analysis_error.clone();
        let assistant = services.assistant(&interest);
        Callback::from(move |_| {
            let Some(current) = (*stats).clone() else {
                return;
            };
            let snapshot = FinancialSnapshot {
                transactions: current.recent_transactions.clone(),
                income: current.total_income,
                expenses: current.total_expenses,
                question: Some(ANALYSIS_QUESTION.to_string()),
            };
            let assistant = assistant.clone();
            let analysis = analysis.clone();
            let analyzing = analyzing.clone();
            let analysis_error = analysis_error.clone();
            analyzing.set(true);
            analysis_error.set(None);
            spawn_local(async move {
                match assistant.analyze(&snapshot).await {
                    Ok(result) => analysis.set(Some(result.analysis)),
                    Err(ApiError::Cancelled) => return,
                    Err(err) => analysis_error.set(Some(err.to_string())),
                }
                analyzing.set(false);
            });
        })
    };

    let slices = store.projection();
    let categories = store.list();

    let body = if *loading && stats.is_none() {
        html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
    } else if let Some(msg) = &*error {
        error_banner(msg, Some(on_retry))
    } else if let Some(s) = &*stats {
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                    <StatCard title="Total Income" amount={s.total_income} icon={StatIcon::UpRight} currency_symbol={currency_symbol.clone()} />
                    <StatCard title="Total Expenses" amount={s.total_expenses} icon={StatIcon::CreditCard} currency_symbol={currency_symbol.clone()} />
                    <StatCard title="Net Income" amount={s.net_income} icon={StatIcon::Wallet} currency_symbol={currency_symbol.clone()} />
                    <StatCard title="Remaining Budget" amount={s.remaining_budget} icon={StatIcon::Target} currency_symbol={currency_symbol.clone()} />
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <div class="flex items-center justify-between mb-3">
                            <h3 class="font-bold text-foreground text-lg">{"Spending by Category"}</h3>
                            <span class="text-xs text-muted-foreground">{ format!("{} budgets", s.budget_count) }</span>
                        </div>
                        { spending_chart(&slices, &currency_symbol) }
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <div class="flex items-center justify-between mb-3">
                            <h3 class="font-bold text-foreground text-lg">{"Budget Status"}</h3>
                            <span class="text-xs text-muted-foreground">{ format!("of {}", format_money(s.total_budget, &currency_symbol)) }</span>
                        </div>
                        { if categories.is_empty() {
                            html! { <p class="text-sm text-muted-foreground">{"No budgets set yet."}</p> }
                        } else {
                            html! {
                                <div class="space-y-2">
                                    { for categories.iter().map(|c| {
                                        let percent = percent_of(c.spent, c.budget_limit);
                                        let remaining = c.budget_limit - c.spent;
                                        html! {
                                            <div class="flex flex-col gap-1 text-sm">
                                                <div class="flex items-center justify-between">
                                                    <span class="text-foreground">{ c.name.clone() }</span>
                                                    <span class={if c.is_overspent() { "text-red-600" } else { "text-muted-foreground" }}>
                                                        { format!("{}%", percent) }
                                                    </span>
                                                </div>
                                                <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                                                    <div class="h-full" style={format!("width: {}%; background-color: {}", percent, c.color)}></div>
                                                </div>
                                                <div class="flex items-center justify-between text-xs text-muted-foreground">
                                                    <span>{ format!("Spent: {}", format_money(c.spent, &currency_symbol)) }</span>
                                                    <span class={if remaining < Decimal::ZERO { "text-red-600" } else { "text-muted-foreground" }}>
                                                        { format!("Remaining: {}", format_money(remaining, &currency_symbol)) }
                                                    </span>
                                                </div>
                                            </div>
                                        }
                                    }) }
                                </div>
                            }
                        }}
                    </div>
                </div>

                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <div class="flex items-center justify-between mb-3">
                        <h3 class="font-bold text-foreground text-lg">{"AI Financial Analysis"}</h3>
                        <button onclick={on_analyze} disabled={*analyzing} class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm">
                            { if *analyzing { "Analyzing..." } else { "Analyze" } }
                        </button>
                    </div>
                    { if let Some(msg) = &*analysis_error {
                        html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                    } else if let Some(text) = &*analysis {
                        html! { <p class="text-sm text-foreground whitespace-pre-line">{ text.clone() }</p> }
                    } else {
                        html! { <p class="text-sm text-muted-foreground">{"Get insights on your spending patterns and savings potential."}</p> }
                    }}
                </div>

                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                    <div class="p-6 border-b border-border">
                        <h3 class="font-bold text-foreground text-lg">{ format!("Recent Transactions ({} total)", s.transaction_count) }</h3>
                    </div>
                    <table class="w-full text-left border-collapse">
                        <tbody class="divide-y divide-border">
                            { for s.recent_transactions.iter().map(|tx| {
                                let amount = match tx.kind {
                                    TransactionKind::Income => format!("+ {}", format_money(tx.amount, &currency_symbol)),
                                    TransactionKind::Expense => format!("- {}", format_money(tx.amount, &currency_symbol)),
                                };
                                html! {
                                    <tr key={tx.id.to_string()} class="text-sm hover:bg-muted/30">
                                        <td class="px-8 py-4 text-muted-foreground">{ tx.date.to_string() }</td>
                                        <td class="px-8 py-4 text-foreground">{ tx.title.clone() }</td>
                                        <td class="px-8 py-4">
                                            <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ tx.category.clone() }</span>
                                        </td>
                                        <td class="px-8 py-4 text-right font-semibold text-foreground">{ amount }</td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            </>
        }
    } else {
        html! {}
    };

    page_shell("Dashboard", html! {}, body)
}

/// Horizontal bars, one per slice, scaled to the largest value.
pub fn spending_chart(slices: &[ChartSlice], currency_symbol: &str) -> Html {
    if slices.is_empty() {
        return html! { <p class="text-sm text-muted-foreground">{"No categories yet."}</p> };
    }
    let max = slices
        .iter()
        .map(|s| s.value)
        .max()
        .unwrap_or(Decimal::ZERO);

    html! {
        <div class="space-y-3">
            { for slices.iter().map(|slice| {
                let width = percent_of(slice.value, max);
                html! {
                    <div class="text-sm">
                        <div class="flex items-center justify-between mb-1">
                            <span class="flex items-center gap-2">
                                <span class="w-3 h-3 rounded-full inline-block" style={format!("background-color: {}", slice.color)}></span>
                                { slice.name.clone() }
                            </span>
                            <span class="font-semibold">{ format_money(slice.value, currency_symbol) }</span>
                        </div>
                        <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                            <div class="h-full" style={format!("width: {}%; background-color: {}", width, slice.color)}></div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
