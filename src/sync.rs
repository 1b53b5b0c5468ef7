//! Mutation workflows shared by the views.
//!
//! Every write goes through one domain-client call and is followed by a re-read from
//! the server, which stays the single source of truth. Category writes finish by
//! replacing the contents of the [`CategoryStore`], which notifies its subscribers.

use futures::future::try_join;

use crate::api::{AuthApi, BudgetsApi, DashboardApi, TransactionsApi};
use crate::error::Result;
use crate::forms::{CategoryForm, TransactionForm};
use crate::models::{Budget, Category, CategoryPatch, DashboardStats, Transaction};
use crate::store::CategoryStore;

/// Creates (`editing == None`) or updates a transaction, then returns the fresh list.
/// Invalid forms fail before any request is made.
pub async fn save_transaction(
    api: &TransactionsApi,
    editing: Option<i64>,
    form: &TransactionForm,
) -> Result<Vec<Transaction>> {
    let draft = form.validate()?;
    match editing {
        Some(id) => {
            let saved = api.update(id, &draft.into()).await?;
            tracing::info!(id = saved.id, "transaction updated");
        }
        None => {
            let saved = api.create(&draft).await?;
            tracing::info!(id = saved.id, "transaction created");
        }
    }
    api.list().await
}

pub async fn delete_transaction(api: &TransactionsApi, id: i64) -> Result<Vec<Transaction>> {
    api.delete(id).await?;
    tracing::info!(id, "transaction deleted");
    api.list().await
}

/// Loads budgets and makes them the store's contents.
pub async fn refresh_categories(api: &BudgetsApi, store: &CategoryStore) -> Result<Vec<Budget>> {
    let budgets = api.list().await?;
    store.replace_all(budgets.iter().cloned().map(Category::from).collect());
    Ok(budgets)
}

pub async fn add_category(
    api: &BudgetsApi,
    store: &CategoryStore,
    form: &CategoryForm,
) -> Result<Vec<Budget>> {
    let input = form.validate()?;
    let created = api.create(&input).await?;
    tracing::info!(id = created.id, name = %created.name, "budget created");
    refresh_categories(api, store).await
}

pub async fn update_category(
    api: &BudgetsApi,
    store: &CategoryStore,
    id: i64,
    patch: &CategoryPatch,
) -> Result<Vec<Budget>> {
    api.update(id, patch).await?;
    tracing::info!(id, "budget updated");
    refresh_categories(api, store).await
}

pub async fn delete_category(
    api: &BudgetsApi,
    store: &CategoryStore,
    id: i64,
) -> Result<Vec<Budget>> {
    api.delete(id).await?;
    tracing::info!(id, "budget deleted");
    refresh_categories(api, store).await
}

/// Dashboard aggregates plus a store refresh, issued concurrently.
pub async fn load_overview(
    dashboard: &DashboardApi,
    budgets: &BudgetsApi,
    store: &CategoryStore,
) -> Result<DashboardStats> {
    let (stats, _) = try_join(dashboard.stats(), refresh_categories(budgets, store)).await?;
    Ok(stats)
}

/// Signs out on the server and clears the local store. The store is cleared even when
/// the server call fails; that failure is still returned so it can be shown.
pub async fn end_session(auth: &AuthApi, store: &CategoryStore) -> Result<()> {
    let outcome = auth.logout().await;
    store.replace_all(Vec::new());
    match outcome {
        Ok(_) => {
            tracing::info!("signed out");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(error = %err, "logout request failed, local session cleared");
            Err(err)
        }
    }
}
