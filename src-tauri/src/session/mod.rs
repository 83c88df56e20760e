//! The authenticated session.
//!
//! `SessionStore` is the one piece of state shared between the command layer
//! and the HTTP dispatcher. It is passed around explicitly as a
//! [`SessionHandle`] and publishes every change on a watch channel.

pub mod storage;

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::ExoError;

pub use storage::{FileStorage, KeyringStorage, MemoryStorage, SessionStorage};

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "user_id";
pub const SNAPSHOT_KEY: &str = "persist:auth";
pub const SNAPSHOT_VERSION: u32 = 1;

pub type SessionHandle = Arc<SessionStore>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: u64,
}

/// What the UI is told about the session. The token never leaves the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInfo {
    pub user_id: u64,
    pub display_name: Option<String>,
}

/// Versioned snapshot of the auth state, restored across restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub version: u32,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub user: Option<Value>,
}

pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
    user: RwLock<Option<Value>>,
    changes: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Open the store and restore any session found in `storage`.
    pub fn open(storage: impl SessionStorage + 'static) -> SessionHandle {
        let storage: Box<dyn SessionStorage> = Box::new(storage);
        let snapshot = read_snapshot(storage.as_ref());
        let restored = restore_session(storage.as_ref(), snapshot.as_ref());

        match &restored {
            Some(session) => info!("Restored session for user {}", session.user_id),
            None => info!("No stored session"),
        }

        let (changes, _) = watch::channel(restored.clone());
        Arc::new(Self {
            storage,
            current: RwLock::new(restored),
            user: RwLock::new(snapshot.and_then(|s| s.user)),
            changes,
        })
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn user_id(&self) -> Option<u64> {
        self.current().map(|s| s.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn user(&self) -> Option<Value> {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn info(&self) -> Option<SessionInfo> {
        let session = self.current()?;
        let display_name = self.user().as_ref().and_then(display_name_of);
        Some(SessionInfo {
            user_id: session.user_id,
            display_name,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }

    /// Persist a freshly issued session. Storage is written before the
    /// in-memory state changes, so a storage failure leaves the old session.
    /// A partial write is rolled back so the stored keys never pair one
    /// session's token with another's user id.
    pub fn establish(&self, session: Session) -> Result<(), ExoError> {
        let user = self.user();
        if let Err(e) = persist(self.storage.as_ref(), Some(&session), user.clone()) {
            let previous = self.current();
            if let Err(rollback) = persist(self.storage.as_ref(), previous.as_ref(), user) {
                warn!("Failed to roll back session storage: {:#}", rollback);
            }
            return Err(ExoError::Storage(format!("{:#}", e)));
        }

        info!("Session established for user {}", session.user_id);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        self.changes.send_replace(Some(session));
        Ok(())
    }

    /// Keep the user object returned by signup in the snapshot, as-is.
    pub fn remember_user(&self, user: Value) -> Result<(), ExoError> {
        let current = self.current();
        write_snapshot(
            self.storage.as_ref(),
            &PersistedSession {
                version: SNAPSHOT_VERSION,
                token: current.as_ref().map(|s| s.token.clone()),
                user_id: current.as_ref().map(|s| s.user_id),
                user: Some(user.clone()),
            },
        )
        .map_err(|e| ExoError::Storage(format!("{:#}", e)))?;

        *self.user.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
        Ok(())
    }

    /// Drop the token and user id from memory and storage. The in-memory
    /// session is cleared even if storage fails.
    pub fn clear(&self) -> Result<(), ExoError> {
        let previous = self.current.write().unwrap_or_else(|e| e.into_inner()).take();
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = None;
        if previous.is_some() {
            self.changes.send_replace(None);
        }

        let mut first_error = None;
        for key in [TOKEN_KEY, USER_ID_KEY, SNAPSHOT_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to remove {} from session storage: {:#}", key, e);
                first_error.get_or_insert_with(|| format!("{:#}", e));
            }
        }

        if let Some(session) = previous {
            info!("Session cleared for user {}", session.user_id);
        }

        match first_error {
            Some(e) => Err(ExoError::Storage(e)),
            None => Ok(()),
        }
    }
}

fn read_snapshot(storage: &dyn SessionStorage) -> Option<PersistedSession> {
    let raw = match storage.read(SNAPSHOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read session snapshot: {:#}", e);
            return None;
        }
    };

    match serde_json::from_str::<PersistedSession>(&raw) {
        Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => Some(snapshot),
        Ok(snapshot) => {
            warn!(
                "Discarding session snapshot with version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            );
            let _ = storage.remove(SNAPSHOT_KEY);
            None
        }
        Err(e) => {
            warn!("Discarding unreadable session snapshot: {}", e);
            let _ = storage.remove(SNAPSHOT_KEY);
            None
        }
    }
}

fn write_snapshot(storage: &dyn SessionStorage, snapshot: &PersistedSession) -> anyhow::Result<()> {
    let json = serde_json::to_string(snapshot)?;
    storage.write(SNAPSHOT_KEY, &json)
}

/// Write all three keys for `session`, or remove them when there is none.
/// Every key is attempted; the first failure is returned.
fn persist(
    storage: &dyn SessionStorage,
    session: Option<&Session>,
    user: Option<Value>,
) -> anyhow::Result<()> {
    let results = match session {
        Some(session) => [
            storage.write(TOKEN_KEY, &session.token),
            storage.write(USER_ID_KEY, &session.user_id.to_string()),
            write_snapshot(
                storage,
                &PersistedSession {
                    version: SNAPSHOT_VERSION,
                    token: Some(session.token.clone()),
                    user_id: Some(session.user_id),
                    user,
                },
            ),
        ],
        None => [
            storage.remove(TOKEN_KEY),
            storage.remove(USER_ID_KEY),
            storage.remove(SNAPSHOT_KEY),
        ],
    };
    results.into_iter().collect()
}

/// The plain `token`/`user_id` keys win; the snapshot fills in when they are
/// missing.
fn restore_session(
    storage: &dyn SessionStorage,
    snapshot: Option<&PersistedSession>,
) -> Option<Session> {
    let token = storage
        .read(TOKEN_KEY)
        .unwrap_or_else(|e| {
            warn!("Failed to read stored token: {:#}", e);
            None
        })
        .or_else(|| snapshot.and_then(|s| s.token.clone()))
        .filter(|t| !t.is_empty())?;

    let user_id = storage
        .read(USER_ID_KEY)
        .unwrap_or_else(|e| {
            warn!("Failed to read stored user id: {:#}", e);
            None
        })
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .or_else(|| snapshot.and_then(|s| s.user_id))?;

    Some(Session { token, user_id })
}

fn display_name_of(user: &Value) -> Option<String> {
    ["name", "username", "email"]
        .iter()
        .find_map(|key| user.get(*key).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
