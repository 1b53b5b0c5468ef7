use rust_decimal::Decimal;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::error::ApiError;
use crate::format::{format_money, percent_of};
use crate::models::{expenses_by_category, FinancialSnapshot, Transaction};

use super::app::use_currency_symbol;
use super::dashboard::spending_chart;
use super::hooks::{use_category_store, use_interest, use_services};
use super::shell::{error_banner, page_shell, StatCard, StatIcon};

#[function_component(ReportsPage)]
pub fn reports_page() -> Html {
    let services = use_services();
    let interest = use_interest();
    let store = use_category_store();
    let currency_symbol = use_currency_symbol();

    let transactions = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let api = services.transactions(&interest);
        let transactions = transactions.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.list().await {
                        Ok(list) => transactions.set(list),
                        Err(ApiError::Cancelled) => return,
                        Err(err) => error.set(Some(err.to_string())),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let snapshot = FinancialSnapshot::from_transactions((*transactions).clone(), None);
    let net = snapshot.income - snapshot.expenses;
    let savings_rate = if snapshot.income > Decimal::ZERO {
        percent_of(net.max(Decimal::ZERO), snapshot.income)
    } else {
        0
    };
    let by_category = expenses_by_category(&transactions);
    let slices = store.projection();

    let body = if *loading {
        html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
    } else if let Some(msg) = &*error {
        error_banner(msg, None)
    } else {
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <StatCard title="Income" amount={snapshot.income} icon={StatIcon::UpRight} currency_symbol={currency_symbol.clone()} />
                    <StatCard title="Expenses" amount={snapshot.expenses} icon={StatIcon::CreditCard} currency_symbol={currency_symbol.clone()} />
                    <StatCard title="Net" amount={net} icon={StatIcon::Wallet} currency_symbol={currency_symbol.clone()} />
                </div>
                <p class="text-sm text-muted-foreground">{ format!("Savings rate: {}%", savings_rate) }</p>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <div class="bg-card rounded-lg p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-3">{"Budget Spending"}</h3>
                        { spending_chart(&slices, &currency_symbol) }
                    </div>
                    <div class="bg-card rounded-lg p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-3">{"Expenses by Transaction Category"}</h3>
                        { if by_category.is_empty() {
                            html! { <p class="text-sm text-muted-foreground">{"No expense transactions yet."}</p> }
                        } else {
                            html! {
                                <ul class="space-y-1">
                                    { for by_category.iter().map(|(name, total)| html! {
                                        <li class="flex items-center justify-between text-sm">
                                            <span class="text-foreground">{ name.clone() }</span>
                                            <span class="font-semibold">{ format_money(*total, &currency_symbol) }</span>
                                        </li>
                                    }) }
                                </ul>
                            }
                        }}
                    </div>
                </div>
            </>
        }
    };

    page_shell("Reports", html! {}, body)
}
