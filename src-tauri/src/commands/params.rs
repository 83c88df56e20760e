use tauri::command;

use crate::params::{Dataset, ParamDef};

/// The field schema of `dataset`, in display order.
#[command]
pub fn parameter_schema(dataset: Dataset) -> Vec<ParamDef> {
    dataset.schema().to_vec()
}
