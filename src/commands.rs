use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], js_name = listen, catch)]
    async fn listen_raw(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

pub const NOTICE_EVENT: &str = "api-notice";
pub const SESSION_EVENT: &str = "session-changed";

// -- Arg structs for serialization (Tauri expects camelCase keys) --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupArgs<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictArgs<'a> {
    dataset: Dataset,
    values: &'a HashMap<String, Option<f64>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    dataset: Dataset,
    skip: Option<u32>,
    limit: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictionIdArgs<'a> {
    dataset: Dataset,
    prediction_id: &'a str,
}

#[derive(Serialize)]
struct DatasetArgs {
    dataset: Dataset,
}

#[derive(Serialize)]
struct GetPreferenceArgs<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct SetPreferenceArgs<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct NoArgs {}

// -- Types matching backend structs --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Kepler,
    Tess,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Kepler, Dataset::Tess];

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Kepler => "Kepler",
            Dataset::Tess => "TESS",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Dataset::Kepler => "kepler",
            Dataset::Tess => "tess",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.slug() == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionInfo {
    pub user_id: u64,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Primary,
    Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParamDef {
    pub id: String,
    pub label: String,
    pub default: f64,
    pub tier: Tier,
    pub kind: ValueKind,
    pub unit: Option<String>,
    pub description: String,
    pub range: Option<SliderRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionOutcome {
    pub prediction: String,
    pub confidence: f64,
    pub prediction_id: String,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionRecord {
    pub prediction_id: String,
    pub prediction: String,
    pub confidence: f64,
    pub created_at: Option<String>,
    pub created_label: Option<String>,
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionPage {
    pub predictions: Vec<PredictionRecord>,
    pub total: u64,
}

impl PredictionPage {
    /// Drop one record locally, ahead of the re-fetch.
    pub fn remove(&mut self, prediction_id: &str) {
        let before = self.predictions.len();
        self.predictions.retain(|p| p.prediction_id != prediction_id);
        if self.predictions.len() < before {
            self.total = self.total.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub status: Option<u16>,
}

#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

// -- Invoke plumbing --

fn to_args<A: Serialize>(args: &A) -> Result<JsValue, String> {
    // Maps must arrive as plain JS objects, not `Map`s.
    args.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

async fn call<A: Serialize, R: DeserializeOwned>(cmd: &str, args: &A) -> Result<R, String> {
    let result = invoke(cmd, to_args(args)?).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn call_unit<A: Serialize>(cmd: &str, args: &A) -> Result<(), String> {
    invoke(cmd, to_args(args)?)
        .await
        .map(|_| ())
        .map_err(js_error)
}

/// Subscribe to a backend event for the lifetime of the app.
pub async fn listen<T, F>(event: &str, mut handler: F) -> Result<(), String>
where
    T: DeserializeOwned + 'static,
    F: FnMut(T) + 'static,
{
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<T>>(raw) {
            Ok(envelope) => handler(envelope.payload),
            Err(e) => web_sys::console::warn_1(&format!("Bad event payload: {}", e).into()),
        }
    });
    listen_raw(event, &closure).await.map_err(js_error)?;
    closure.forget();
    Ok(())
}

// -- Typed invoke helpers --

pub async fn login(email: &str, password: &str) -> Result<SessionInfo, String> {
    call("login", &LoginArgs { email, password }).await
}

pub async fn signup(name: &str, email: &str, password: &str) -> Result<serde_json::Value, String> {
    call("signup", &SignupArgs { name, email, password }).await
}

pub async fn logout() -> Result<(), String> {
    call_unit("logout", &NoArgs {}).await
}

pub async fn current_session() -> Result<Option<SessionInfo>, String> {
    call("current_session", &NoArgs {}).await
}

pub async fn predict(
    dataset: Dataset,
    values: &HashMap<String, Option<f64>>,
) -> Result<PredictionOutcome, String> {
    call("predict", &PredictArgs { dataset, values }).await
}

pub async fn list_predictions(dataset: Dataset) -> Result<PredictionPage, String> {
    call(
        "list_predictions",
        &ListArgs {
            dataset,
            skip: None,
            limit: None,
        },
    )
    .await
}

pub async fn get_prediction(dataset: Dataset, prediction_id: &str) -> Result<PredictionRecord, String> {
    call("get_prediction", &PredictionIdArgs { dataset, prediction_id }).await
}

pub async fn delete_prediction(dataset: Dataset, prediction_id: &str) -> Result<(), String> {
    call_unit("delete_prediction", &PredictionIdArgs { dataset, prediction_id }).await
}

pub async fn parameter_schema(dataset: Dataset) -> Result<Vec<ParamDef>, String> {
    call("parameter_schema", &DatasetArgs { dataset }).await
}

pub async fn get_preference(key: &str) -> Result<Option<String>, String> {
    call("get_preference", &GetPreferenceArgs { key }).await
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), String> {
    call_unit("set_preference", &SetPreferenceArgs { key, value }).await
}

pub async fn api_base_url() -> Result<String, String> {
    call("api_base_url", &NoArgs {}).await
}
