pub mod api;
#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
pub mod params;
pub mod session;
pub mod state;

pub use api::{ApiClient, ApiError, Notice, NoticeLevel, ResponseRouter};
pub use config::{ClientConfig, SessionBackend};
pub use error::ExoError;
pub use params::{build_request, Dataset, ParamDef, PredictionRequest};
pub use session::{Session, SessionHandle, SessionInfo, SessionStore};
pub use state::AppState;

/// Event carrying a [`Notice`] for the toast layer.
pub const NOTICE_EVENT: &str = "api-notice";
/// Event carrying the new `Option<SessionInfo>` after login, logout or a 401.
pub const SESSION_EVENT: &str = "session-changed";

#[cfg(feature = "desktop")]
pub fn run() {
    use tauri::{Emitter, Manager};
    use tauri_plugin_store::StoreExt;
    use tokio::sync::broadcast::error::RecvError;
    use tracing::{info, warn};

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::auth::login,
            commands::auth::signup,
            commands::auth::logout,
            commands::auth::current_session,
            commands::predictions::predict,
            commands::predictions::list_predictions,
            commands::predictions::get_prediction,
            commands::predictions::delete_prediction,
            commands::params::parameter_schema,
            commands::config::get_preference,
            commands::config::set_preference,
            commands::config::api_base_url,
        ])
        .setup(|app| {
            let mut config = ClientConfig::from_env()?;

            // A base URL saved from the settings page wins over the environment.
            if let Ok(store) = app.store(commands::config::PREFERENCES_FILE) {
                if let Some(saved) = store
                    .get(crate::config::BASE_URL_PREFERENCE)
                    .and_then(|v| v.as_str().map(|s| s.to_string()))
                    .filter(|s| !s.is_empty())
                {
                    match config.clone().with_base_url(&saved) {
                        Ok(updated) => config = updated,
                        Err(e) => warn!("Ignoring saved API base URL: {}", e),
                    }
                }
            }

            let state = match config.session_backend {
                config::SessionBackend::Keyring => {
                    AppState::new(&config, session::KeyringStorage::new())?
                }
                config::SessionBackend::File => {
                    let storage = session::FileStorage::in_data_dir();
                    info!("Keeping the session in {:?}", storage.path());
                    AppState::new(&config, storage)?
                }
            };
            let mut notices = state.subscribe_notices();
            let mut sessions = state.subscribe_session();
            let session = state.session.clone();
            app.manage(state);

            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                loop {
                    match notices.recv().await {
                        Ok(notice) => {
                            if let Err(e) = handle.emit(NOTICE_EVENT, &notice) {
                                warn!("Failed to emit notice: {}", e);
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Dropped {} notices", skipped);
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                while sessions.changed().await.is_ok() {
                    let info = session.info();
                    if let Err(e) = handle.emit(SESSION_EVENT, &info) {
                        warn!("Failed to emit session change: {}", e);
                    }
                }
            });

            info!("Exoscope ready");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
