use tauri::{AppHandle, State};
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use crate::config::{parse_base_url, BASE_URL_PREFERENCE};
use crate::state::AppState;

pub const PREFERENCES_FILE: &str = "preferences.json";

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    let store = app.store(PREFERENCES_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    let value = store.get(key).and_then(|v| v.as_str().map(|s| s.to_string()));
    Ok(value)
}

/// Save a preference. Changing the API base URL re-targets the live client
/// once the value has been validated and saved.
#[tauri::command]
pub fn set_preference(
    app: AppHandle,
    state: State<'_, AppState>,
    key: &str,
    value: &str,
) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);

    let base_url = if key == BASE_URL_PREFERENCE {
        Some(parse_base_url(value).map_err(String::from)?)
    } else {
        None
    };

    let store = app.store(PREFERENCES_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        e.to_string()
    })?;

    if let Some(url) = base_url {
        state.client.set_base_url(url);
    }
    Ok(())
}

/// The URL the client currently talks to.
#[tauri::command]
pub fn api_base_url(state: State<'_, AppState>) -> String {
    state.client.base_url().to_string()
}
