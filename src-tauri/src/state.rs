//! Application state shared by all commands.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{broadcast, watch};
use tracing::info;

use crate::api::{
    ApiClient, Notice, PredictionOutcome, PredictionPage, PredictionRecord, SignupRequest,
};
use crate::config::ClientConfig;
use crate::error::ExoError;
use crate::params::{build_request, Dataset};
use crate::session::{Session, SessionHandle, SessionInfo, SessionStorage, SessionStore};

const NOTICE_CAPACITY: usize = 32;

pub struct AppState {
    pub session: SessionHandle,
    pub client: Arc<ApiClient>,
    notices: broadcast::Sender<Notice>,
    page_size: u32,
}

impl AppState {
    pub fn new(config: &ClientConfig, storage: impl SessionStorage + 'static) -> Result<Self, ExoError> {
        let session = SessionStore::open(storage);
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        let client = ApiClient::new(config, session.clone(), notices.clone())?;
        Ok(Self {
            session,
            client: Arc::new(client),
            notices,
            page_size: config.page_size,
        })
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionInfo, ExoError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ExoError::MissingInput("your email"));
        }
        if password.is_empty() {
            return Err(ExoError::MissingInput("your password"));
        }

        let response = self
            .client
            .login(email, password)
            .await
            .map_err(ExoError::request("Failed to log in"))?;

        self.session.establish(Session {
            token: response.access_token,
            user_id: response.user_id,
        })?;
        self.session.info().ok_or(ExoError::NotAuthenticated)
    }

    /// Create an account. Does not log in; the user object is kept for display.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Value, ExoError> {
        if name.trim().is_empty() {
            return Err(ExoError::MissingInput("your name"));
        }
        if email.trim().is_empty() {
            return Err(ExoError::MissingInput("your email"));
        }
        if password.is_empty() {
            return Err(ExoError::MissingInput("a password"));
        }

        let request = SignupRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let user = self
            .client
            .signup(&request)
            .await
            .map_err(ExoError::request("Failed to sign up"))?;

        self.session.remember_user(user.clone())?;
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), ExoError> {
        info!("Logging out");
        self.session.clear()
    }

    fn require_user(&self) -> Result<u64, ExoError> {
        self.session.user_id().ok_or(ExoError::NotAuthenticated)
    }

    /// Validate and submit. Nothing is sent when required fields are blank.
    pub async fn predict(
        &self,
        dataset: Dataset,
        values: &HashMap<String, Option<f64>>,
    ) -> Result<PredictionOutcome, ExoError> {
        let request = build_request(dataset, values)?;
        let user_id = self.require_user()?;
        self.client
            .predict(user_id, &request)
            .await
            .map_err(ExoError::request("Failed to make prediction"))
    }

    pub async fn list_predictions(
        &self,
        dataset: Dataset,
        skip: Option<u32>,
        limit: Option<u32>,
    ) -> Result<PredictionPage, ExoError> {
        let user_id = self.require_user()?;
        self.client
            .list_predictions(
                dataset,
                user_id,
                skip.unwrap_or(0),
                limit.unwrap_or(self.page_size),
            )
            .await
            .map_err(ExoError::request("Failed to fetch predictions"))
    }

    pub async fn get_prediction(
        &self,
        dataset: Dataset,
        prediction_id: &str,
    ) -> Result<PredictionRecord, ExoError> {
        if prediction_id.trim().is_empty() {
            return Err(ExoError::MissingInput("a prediction id"));
        }
        self.client
            .get_prediction(dataset, prediction_id.trim())
            .await
            .map_err(ExoError::request("Failed to fetch prediction"))
    }

    pub async fn delete_prediction(&self, dataset: Dataset, prediction_id: &str) -> Result<(), ExoError> {
        if prediction_id.trim().is_empty() {
            return Err(ExoError::MissingInput("a prediction id"));
        }
        self.client
            .delete_prediction(dataset, prediction_id.trim())
            .await
            .map_err(ExoError::request("Failed to delete prediction"))
    }
}
