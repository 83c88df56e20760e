//! Tauri commands for the Kepler and TESS prediction endpoints.
//!
//! Failures have already been routed (toast, 401 logout) by the time they
//! reach these commands; what is returned here is the per-call message.

use std::collections::HashMap;

use tauri::State;
use tracing::warn;

use crate::api::{PredictionOutcome, PredictionPage, PredictionRecord};
use crate::params::Dataset;
use crate::state::AppState;

#[tauri::command]
pub async fn predict(
    state: State<'_, AppState>,
    dataset: Dataset,
    values: HashMap<String, Option<f64>>,
) -> Result<PredictionOutcome, String> {
    state.predict(dataset, &values).await.map_err(|e| {
        warn!("{} prediction failed: {}", dataset.name(), e);
        e.to_string()
    })
}

#[tauri::command]
pub async fn list_predictions(
    state: State<'_, AppState>,
    dataset: Dataset,
    skip: Option<u32>,
    limit: Option<u32>,
) -> Result<PredictionPage, String> {
    state
        .list_predictions(dataset, skip, limit)
        .await
        .map_err(String::from)
}

#[tauri::command]
pub async fn get_prediction(
    state: State<'_, AppState>,
    dataset: Dataset,
    prediction_id: String,
) -> Result<PredictionRecord, String> {
    state
        .get_prediction(dataset, &prediction_id)
        .await
        .map_err(String::from)
}

#[tauri::command]
pub async fn delete_prediction(
    state: State<'_, AppState>,
    dataset: Dataset,
    prediction_id: String,
) -> Result<(), String> {
    state
        .delete_prediction(dataset, &prediction_id)
        .await
        .map_err(String::from)
}
