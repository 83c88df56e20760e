//! HTTP dispatcher for the prediction API.
//!
//! `ApiClient` owns the one `reqwest::Client` of the app. Every call gets the
//! bearer token of the current session attached (when there is one). Failures
//! of the prediction endpoints are handed to the [`ResponseRouter`] before they
//! are returned, so the notice and the 401 logout happen no matter which
//! command made the call. Login and signup are not routed: a 401 there means
//! bad credentials, not an expired session, and the form shows the message.

pub mod error;
pub mod router;
pub mod types;

use std::sync::RwLock;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ExoError;
use crate::params::{Dataset, PredictionRequest};
use crate::session::SessionHandle;

pub use error::ApiError;
pub use router::{Notice, NoticeLevel, ResponseRouter};
pub use types::{
    LoginResponse, PredictionOutcome, PredictionPage, PredictionRecord, SignupRequest,
};

const USER_AGENT: &str = "Exoscope/1.0";

/// Whether a failed call goes through the [`ResponseRouter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Routing {
    Routed,
    Direct,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: RwLock<Url>,
    session: SessionHandle,
    router: ResponseRouter,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: SessionHandle,
        notices: broadcast::Sender<Notice>,
    ) -> Result<Self, ExoError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExoError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            "API client targeting {} (timeout {:?})",
            config.base_url, config.timeout
        );

        Ok(Self {
            http,
            base_url: RwLock::new(config.base_url.clone()),
            router: ResponseRouter::new(session.clone(), notices),
            session,
        })
    }

    pub fn base_url(&self) -> Url {
        self.base_url.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Point later calls at another server. Calls already in flight keep
    /// their original target.
    pub fn set_base_url(&self, url: Url) {
        info!("API base URL changed to {}", url);
        *self.base_url.write().unwrap_or_else(|e| e.into_inner()) = url;
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url();
        format!("{}{}", base.as_str().trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        routing: Routing,
    ) -> Result<reqwest::Response, ApiError> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(ApiError::Transport(e), routing)),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The error body is best effort; a body that is not the usual JSON
        // shape just means no server-provided message.
        let body = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok());
        Err(self.fail(ApiError::Http { status, body }, routing))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        routing: Routing,
    ) -> Result<T, ApiError> {
        let response = self.send(builder, routing).await?;
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Err(self.fail(ApiError::Transport(e), routing)),
        };
        serde_json::from_str(&text)
            .map_err(|e| self.fail(ApiError::Decode(e.to_string()), routing))
    }

    async fn execute_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder, Routing::Routed).await.map(|_| ())
    }

    fn fail(&self, err: ApiError, routing: Routing) -> ApiError {
        match routing {
            Routing::Routed => {
                self.router.route(&err);
            }
            Routing::Direct => warn!("Auth request failed: {}", err),
        }
        err
    }

    /// `POST /auth/login` as a form with `username` and `password`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!("Logging in");
        let builder = self
            .request(Method::POST, "/auth/login")
            .form(&[("username", email), ("password", password)]);
        self.execute(builder, Routing::Direct).await
    }

    /// `POST /auth/signup`. The created user is returned untouched.
    pub async fn signup(&self, request: &SignupRequest) -> Result<Value, ApiError> {
        info!("Signing up");
        let builder = self.request(Method::POST, "/auth/signup").json(request);
        self.execute(builder, Routing::Direct).await
    }

    pub async fn predict(
        &self,
        user_id: u64,
        request: &PredictionRequest,
    ) -> Result<PredictionOutcome, ApiError> {
        let dataset = request.dataset();
        info!("Submitting {} prediction", dataset.name());
        let path = format!("{}/predict", dataset.route_prefix());
        let builder = self
            .request(Method::POST, &path)
            .query(&[("user_id", user_id)])
            .json(request);
        self.execute(builder, Routing::Routed).await
    }

    pub async fn list_predictions(
        &self,
        dataset: Dataset,
        user_id: u64,
        skip: u32,
        limit: u32,
    ) -> Result<PredictionPage, ApiError> {
        let path = format!("{}/", dataset.route_prefix());
        let builder = self.request(Method::GET, &path).query(&[
            ("user_id", user_id),
            ("skip", u64::from(skip)),
            ("limit", u64::from(limit)),
        ]);
        let mut page: PredictionPage = self.execute(builder, Routing::Routed).await?;
        page.predictions = page
            .predictions
            .into_iter()
            .map(PredictionRecord::with_created_label)
            .collect();
        debug!(
            "Fetched {} of {} {} predictions",
            page.predictions.len(),
            page.total,
            dataset.name()
        );
        Ok(page)
    }

    pub async fn get_prediction(
        &self,
        dataset: Dataset,
        prediction_id: &str,
    ) -> Result<PredictionRecord, ApiError> {
        let path = format!("{}/{}", dataset.route_prefix(), prediction_id);
        let record: PredictionRecord = self
            .execute(self.request(Method::GET, &path), Routing::Routed)
            .await?;
        Ok(record.with_created_label())
    }

    pub async fn delete_prediction(&self, dataset: Dataset, prediction_id: &str) -> Result<(), ApiError> {
        info!("Deleting {} prediction {}", dataset.name(), prediction_id);
        let path = format!("{}/{}", dataset.route_prefix(), prediction_id);
        self.execute_empty(self.request(Method::DELETE, &path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, SessionStore};

    fn client(base: &str) -> ApiClient {
        let config = ClientConfig::default().with_base_url(base).unwrap();
        let (tx, _) = broadcast::channel(4);
        ApiClient::new(&config, SessionStore::open(MemoryStorage::new()), tx).unwrap()
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            client("http://localhost:8000/").endpoint("/auth/login"),
            "http://localhost:8000/auth/login"
        );
        assert_eq!(
            client("https://api.example.org/v1/").endpoint("/tess/predictions/"),
            "https://api.example.org/v1/tess/predictions/"
        );
    }

    #[test]
    fn test_set_base_url_retargets() {
        let client = client("http://localhost:8000");
        client.set_base_url(Url::parse("http://10.0.0.2:9000").unwrap());
        assert_eq!(client.endpoint("/predictions/x"), "http://10.0.0.2:9000/predictions/x");
    }
}
