//! App Configuration
//!
//! UI captions and log level. Every field has a default, so a partial (or
//! absent) config is fine. In the browser the config comes from an optional
//! `window.TODO_CONFIG`, given as an object or as a JSON string.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub placeholder: String,
    pub add_caption: String,
    pub delete_caption: String,
    pub confirm_caption: String,
    /// Label color of completed tasks
    pub completed_color: String,
    /// Delete button colors while confirmation is pending
    pub confirm_background: String,
    pub confirm_color: String,
    /// trace, debug, info, warn or error
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "TODO List".to_string(),
            placeholder: "Задание".to_string(),
            add_caption: "+".to_string(),
            delete_caption: "🗑️".to_string(),
            confirm_caption: "🗑️ Уверен?".to_string(),
            completed_color: "grey".to_string(),
            confirm_background: "red".to_string(),
            confirm_color: "white".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Read `window.TODO_CONFIG`. Absent means defaults; present but
    /// malformed is an error.
    pub fn load() -> Result<Self, String> {
        let Some(window) = web_sys::window() else {
            return Ok(Self::default());
        };
        match js_sys::Reflect::get(&window, &JsValue::from_str("TODO_CONFIG")) {
            Ok(raw) if !raw.is_undefined() && !raw.is_null() => Self::from_js(raw),
            _ => Ok(Self::default()),
        }
    }

    /// Accepts either a JSON string or a plain object
    pub fn from_js(raw: JsValue) -> Result<Self, String> {
        match raw.as_string() {
            Some(json) => Self::from_json(&json),
            None => serde_wasm_bindgen::from_value(raw).map_err(|e| e.to_string()),
        }
    }

    pub fn max_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
