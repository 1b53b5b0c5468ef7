//! Typed facades over [`ApiClient`](crate::http::ApiClient), one per resource kind.

mod assistant;
mod auth;
mod budgets;
mod dashboard;
mod transactions;

pub use assistant::{AssistantApi, DEFAULT_CHAT_CONTEXT};
pub use auth::AuthApi;
pub use budgets::BudgetsApi;
pub use dashboard::DashboardApi;
pub use transactions::TransactionsApi;
