//! Yew views. Each page pulls its clients from [`Services`] and treats every call as
//! fallible, falling back to an inline error instead of panicking.

mod app;
mod assistant;
mod auth;
mod budgets;
mod dashboard;
mod hooks;
mod reports;
mod settings;
mod shell;
mod transactions;

pub use app::App;
pub use hooks::{use_category_store, use_interest, use_services, Services};
