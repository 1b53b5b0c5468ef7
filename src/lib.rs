//! Personal finance dashboard: REST client, category store, and Yew views.

pub mod api;
pub mod cancel;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod http;
pub mod logging;
pub mod models;
pub mod store;
pub mod sync;
pub mod ui;

pub use cancel::Interest;
pub use config::AppConfig;
pub use error::{ApiError, Result, ValidationError};
pub use http::{ApiClient, BrowserTransport, HttpRequest, HttpResponse, Method, Transport};
pub use store::{CategoryStore, Subscription};
