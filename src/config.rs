use serde::{Deserialize, Serialize};
use tracing::Level;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

const PREFERENCES_KEY: &str = "preferences";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: Level,
}

impl AppConfig {
    /// Values baked in at build time. A browser bundle has no runtime environment,
    /// so `FINANCE_API_BASE_URL` is read by the compiler.
    pub fn from_build_env() -> Self {
        let base = option_env!("FINANCE_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL);
        let log_level = match option_env!("FINANCE_LOG_LEVEL") {
            Some(raw) => raw.parse::<Level>().unwrap_or(Level::INFO),
            None => Level::INFO,
        };
        Self::new(base).with_log_level(log_level)
    }

    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            log_level: Level::INFO,
        }
    }

    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Display preferences kept in the browser only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub currency_code: String,
    pub currency_symbol: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl Preferences {
    pub fn for_currency(code: &str) -> Self {
        Self {
            currency_code: code.to_string(),
            currency_symbol: currency_symbol_for(code).to_string(),
        }
    }
}

pub fn currency_symbol_for(code: &str) -> &'static str {
    match code {
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "PHP" => "₱",
        "INR" => "₹",
        _ => "$",
    }
}

pub fn load_preferences() -> Preferences {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(PREFERENCES_KEY) {
                if let Ok(prefs) = serde_json::from_str::<Preferences>(&raw) {
                    return prefs;
                }
            }
        }
    }
    Preferences::default()
}

pub fn save_preferences(prefs: &Preferences) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(prefs) {
                if storage.set_item(PREFERENCES_KEY, &raw).is_err() {
                    tracing::warn!(key = PREFERENCES_KEY, "could not persist preferences");
                }
            }
        }
    }
}
