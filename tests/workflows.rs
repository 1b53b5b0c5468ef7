mod support;

use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;
use futures::executor::block_on;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_dashboard::api::{AuthApi, BudgetsApi, DashboardApi, TransactionsApi};
use finance_dashboard::forms::{CategoryForm, TransactionForm};
use finance_dashboard::models::{CategoryPatch, TransactionKind};
use finance_dashboard::sync::{
    add_category, delete_category, delete_transaction, end_session, load_overview,
    refresh_categories, save_transaction, update_category,
};
use finance_dashboard::{ApiError, CategoryStore, Interest, Method, ValidationError};

use support::{client, MockTransport, BUDGETS, GROCERIES, SALARY};

fn form(amount: &str) -> TransactionForm {
    TransactionForm {
        amount: amount.to_string(),
        title: "Lunch".to_string(),
        category: "Food & Dining".to_string(),
        ..TransactionForm::blank(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
    }
}

fn counting(store: &CategoryStore) -> (Rc<Cell<u32>>, finance_dashboard::Subscription) {
    let hits = Rc::new(Cell::new(0));
    let seen = Rc::clone(&hits);
    let sub = store.subscribe(move || seen.set(seen.get() + 1));
    (hits, sub)
}

#[test]
fn zero_amount_is_rejected_before_any_request() {
    let transport = MockTransport::new();
    let api = TransactionsApi::new(client(&transport));

    let err = block_on(save_transaction(&api, None, &form("0"))).unwrap_err();
    assert_eq!(err, ApiError::Validation(ValidationError::NonPositiveAmount));
    assert!(transport.sent().is_empty());
}

#[test]
fn valid_create_posts_once_then_refreshes() {
    let transport = MockTransport::new();
    transport.reply(Method::Post, "/transactions", 201, GROCERIES);
    transport.reply(Method::Get, "/transactions", 200, &format!("[{GROCERIES},{SALARY}]"));
    let api = TransactionsApi::new(client(&transport));

    let list = block_on(save_transaction(&api, None, &form("25.50"))).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(transport.sent_lines(), vec!["POST /transactions", "GET /transactions"]);

    let body: Value = serde_json::from_str(transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["amount"].as_f64(), Some(25.5));
    assert_eq!(body["type"], "expense");
    assert_eq!(body["date"], "2024-03-05");
    assert_eq!(body["title"], "Lunch");
}

#[test]
fn editing_puts_to_the_transaction_id() {
    let transport = MockTransport::new();
    transport.reply(Method::Put, "/transactions/1", 200, GROCERIES);
    transport.reply(Method::Get, "/transactions", 200, &format!("[{GROCERIES}]"));
    let api = TransactionsApi::new(client(&transport));

    let mut edited = form("42.50");
    edited.kind = TransactionKind::Income;
    block_on(save_transaction(&api, Some(1), &edited)).unwrap();
    assert_eq!(transport.sent_lines(), vec!["PUT /transactions/1", "GET /transactions"]);

    let body: Value = serde_json::from_str(transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["type"], "income");
}

#[test]
fn failed_create_skips_the_refresh() {
    let transport = MockTransport::new();
    transport.reply(Method::Post, "/transactions", 400, r#"{"error":"Missing required field: category"}"#);
    let api = TransactionsApi::new(client(&transport));

    let err = block_on(save_transaction(&api, None, &form("10"))).unwrap_err();
    assert_eq!(err.to_string(), "Missing required field: category");
    assert_eq!(transport.sent_lines(), vec!["POST /transactions"]);
}

#[test]
fn delete_transaction_refreshes_list() {
    let transport = MockTransport::new();
    transport.reply(Method::Delete, "/transactions/2", 200, r#"{"message":"Transaction deleted successfully"}"#);
    transport.reply(Method::Get, "/transactions", 200, &format!("[{GROCERIES}]"));
    let api = TransactionsApi::new(client(&transport));

    let list = block_on(delete_transaction(&api, 2)).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(transport.sent_lines(), vec!["DELETE /transactions/2", "GET /transactions"]);
}

#[test]
fn refresh_hydrates_store_and_notifies() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/budgets", 200, BUDGETS);
    let api = BudgetsApi::new(client(&transport));
    let store = CategoryStore::new();
    let (hits, _sub) = counting(&store);

    let budgets = block_on(refresh_categories(&api, &store)).unwrap();
    assert_eq!(budgets[1].remaining, Decimal::new(-30, 0));
    assert_eq!(hits.get(), 1);
    assert_eq!(store.len(), 2);

    let transport_row = store.get(2).unwrap();
    assert!(transport_row.is_overspent());
    let slices = store.projection();
    assert_eq!(slices[0].name, "Food & Dining");
    assert_eq!(slices[0].value, Decimal::new(420, 0));
}

#[test]
fn failed_refresh_leaves_store_alone() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/budgets", 500, r#"{"error":"db down"}"#);
    let api = BudgetsApi::new(client(&transport));
    let store = CategoryStore::new();
    let (hits, _sub) = counting(&store);

    assert!(block_on(refresh_categories(&api, &store)).is_err());
    assert_eq!(hits.get(), 0);
    assert!(store.is_empty());
}

#[test]
fn withdrawn_refresh_leaves_store_alone() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/budgets", 200, BUDGETS);
    let interest = Interest::new();
    transport.withdraw_during_send(&interest);
    let api = BudgetsApi::new(client(&transport).with_interest(&interest));
    let store = CategoryStore::new();
    let (hits, _sub) = counting(&store);

    let err = block_on(refresh_categories(&api, &store)).unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(hits.get(), 0);
    assert!(store.is_empty());
}

#[test]
fn add_category_validates_then_creates_and_refreshes() {
    let transport = MockTransport::new();
    let api = BudgetsApi::new(client(&transport));
    let store = CategoryStore::new();

    let bad = CategoryForm {
        name: "Rent".to_string(),
        budget_limit: "-5".to_string(),
        color: "#0EA5E9".to_string(),
    };
    let err = block_on(add_category(&api, &store, &bad)).unwrap_err();
    assert_eq!(err, ApiError::Validation(ValidationError::NegativeLimit));
    assert!(transport.sent().is_empty());

    transport.reply(
        Method::Post,
        "/budgets",
        201,
        r##"{"id": 3, "name": "Rent", "budgetLimit": 1200, "color": "#0EA5E9"}"##,
    );
    transport.reply(Method::Get, "/budgets", 200, BUDGETS);
    let good = CategoryForm {
        budget_limit: "1200".to_string(),
        ..bad
    };
    block_on(add_category(&api, &store, &good)).unwrap();
    assert_eq!(transport.sent_lines(), vec!["POST /budgets", "GET /budgets"]);

    let body: Value = serde_json::from_str(transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["name"], "Rent");
    assert_eq!(body["budgetLimit"].as_f64(), Some(1200.0));
    assert_eq!(store.len(), 2);
}

#[test]
fn update_and_delete_category_refresh_the_store() {
    let transport = MockTransport::new();
    transport.reply(
        Method::Put,
        "/budgets/1",
        200,
        r##"{"id": 1, "name": "Food & Dining", "budgetLimit": 600, "color": "#0EA5E9"}"##,
    );
    transport.reply(Method::Get, "/budgets", 200, BUDGETS);
    transport.reply(Method::Delete, "/budgets/2", 200, r#"{"message":"Budget deleted successfully"}"#);
    transport.reply(Method::Get, "/budgets", 200, &BUDGETS.replace("\"id\": 2", "\"id\": 9"));
    let api = BudgetsApi::new(client(&transport));
    let store = CategoryStore::new();

    let patch = CategoryPatch {
        budget_limit: Some(Decimal::new(600, 0)),
        ..Default::default()
    };
    block_on(update_category(&api, &store, 1, &patch)).unwrap();
    assert!(store.get(2).is_some());

    block_on(delete_category(&api, &store, 2)).unwrap();
    assert!(store.get(2).is_none());
    assert!(store.get(9).is_some());
    assert_eq!(
        transport.sent_lines(),
        vec!["PUT /budgets/1", "GET /budgets", "DELETE /budgets/2", "GET /budgets"]
    );
}

#[test]
fn overview_loads_stats_and_budgets() {
    let transport = MockTransport::new();
    transport.reply(
        Method::Get,
        "/dashboard-stats",
        200,
        &format!(
            r#"{{"total_income": 3000, "total_expenses": 42.5, "total_budget": 650,
                "remaining_budget": 50, "net_income": 2957.5, "transaction_count": 2,
                "budget_count": 2, "recent_transactions": [{SALARY}]}}"#
        ),
    );
    transport.reply(Method::Get, "/budgets", 200, BUDGETS);
    let store = CategoryStore::new();

    let stats = block_on(load_overview(
        &DashboardApi::new(client(&transport)),
        &BudgetsApi::new(client(&transport)),
        &store,
    ))
    .unwrap();
    assert_eq!(stats.net_income, Decimal::new(29575, 1));
    assert_eq!(stats.recent_transactions.len(), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn overview_fails_when_either_call_fails() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/dashboard-stats", 500, r#"{"error":"db down"}"#);
    transport.reply(Method::Get, "/budgets", 200, BUDGETS);

    let err = block_on(load_overview(
        &DashboardApi::new(client(&transport)),
        &BudgetsApi::new(client(&transport)),
        &CategoryStore::new(),
    ))
    .unwrap_err();
    assert_eq!(err.to_string(), "db down");
}

#[test]
fn failed_logout_still_clears_the_store() {
    let transport = MockTransport::new();
    transport.reply(Method::Get, "/budgets", 200, BUDGETS);
    transport.reply(Method::Post, "/logout", 500, r#"{"error":"session store unavailable"}"#);
    let store = CategoryStore::new();
    block_on(refresh_categories(&BudgetsApi::new(client(&transport)), &store)).unwrap();
    let (hits, _sub) = counting(&store);

    let err = block_on(end_session(&AuthApi::new(client(&transport)), &store)).unwrap_err();
    assert_eq!(err.to_string(), "session store unavailable");
    assert!(store.is_empty());
    assert_eq!(hits.get(), 1);
}

#[test]
fn logout_clears_the_store() {
    let transport = MockTransport::new();
    transport.reply(Method::Post, "/logout", 200, r#"{"message":"Logged out successfully"}"#);
    let store = CategoryStore::new();

    block_on(end_session(&AuthApi::new(client(&transport)), &store)).unwrap();
    assert!(store.is_empty());
    assert_eq!(transport.sent_lines(), vec!["POST /logout"]);
}
