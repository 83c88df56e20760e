//! Tauri commands for login, signup and logout.

use serde_json::Value;
use tauri::State;
use tracing::{info, warn};

use crate::session::SessionInfo;
use crate::state::AppState;

#[tauri::command]
pub async fn login(
    state: State<'_, AppState>,
    email: String,
    password: String,
) -> Result<SessionInfo, String> {
    let info = state.login(&email, &password).await.map_err(|e| {
        warn!("Login failed: {}", e);
        e.to_string()
    })?;
    info!("Logged in as user {}", info.user_id);
    Ok(info)
}

#[tauri::command]
pub async fn signup(
    state: State<'_, AppState>,
    name: String,
    email: String,
    password: String,
) -> Result<Value, String> {
    state.signup(&name, &email, &password).await.map_err(|e| {
        warn!("Signup failed: {}", e);
        e.to_string()
    })
}

#[tauri::command]
pub fn logout(state: State<'_, AppState>) -> Result<(), String> {
    state.logout().map_err(String::from)
}

/// The restored or current session, if any. Called once at startup.
#[tauri::command]
pub fn current_session(state: State<'_, AppState>) -> Option<SessionInfo> {
    state.session.info()
}
