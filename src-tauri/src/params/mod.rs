//! Prediction parameter schemas and request building.
//!
//! Each dataset has a fixed schema of named numeric fields with literal
//! defaults. The UI edits values by id; at submission the edited values are
//! merged over the defaults so the request always carries every field.

mod kepler;
mod tess;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ExoError;

pub use kepler::{KEPLER_PARAMS, KEPLER_REQUIRED};
pub use tess::{TESS_PARAMS, TESS_REQUIRED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Kepler,
    Tess,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Kepler, Dataset::Tess];

    pub fn schema(self) -> &'static [ParamDef] {
        match self {
            Dataset::Kepler => KEPLER_PARAMS,
            Dataset::Tess => TESS_PARAMS,
        }
    }

    /// Fields that must be filled in before a submission is sent.
    pub fn required(self) -> &'static [&'static str] {
        match self {
            Dataset::Kepler => KEPLER_REQUIRED,
            Dataset::Tess => TESS_REQUIRED,
        }
    }

    /// Path prefix of the dataset's prediction routes.
    pub fn route_prefix(self) -> &'static str {
        match self {
            Dataset::Kepler => "/predictions",
            Dataset::Tess => "/tess/predictions",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Kepler => "Kepler",
            Dataset::Tess => "TESS",
        }
    }

    pub fn param(self, id: &str) -> Option<&'static ParamDef> {
        self.schema().iter().find(|p| p.id == id)
    }
}

/// Primary fields are always visible; extras sit in a collapsed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Primary,
    Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamDef {
    pub id: &'static str,
    pub label: &'static str,
    pub default: f64,
    pub tier: Tier,
    pub kind: ValueKind,
    pub unit: Option<&'static str>,
    pub description: &'static str,
    pub range: Option<SliderRange>,
}

/// A complete request body: every schema field, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    dataset: Dataset,
    fields: Map<String, Value>,
}

impl PredictionRequest {
    /// The literal defaults of `dataset`.
    pub fn defaults(dataset: Dataset) -> Self {
        let fields = dataset
            .schema()
            .iter()
            .map(|p| (p.id.to_string(), Value::from(p.default)))
            .collect();
        Self { dataset, fields }
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.fields.get(id).and_then(Value::as_f64)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl Serialize for PredictionRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Merge edited values over the defaults of `dataset`.
///
/// `values` maps field id to the edited value; `None` (or a non-finite number)
/// means the field was left blank. Required fields must be present and
/// non-blank, otherwise nothing is built and `MissingParameters` lists them in
/// schema order. Ids outside the schema are ignored.
pub fn build_request(
    dataset: Dataset,
    values: &HashMap<String, Option<f64>>,
) -> Result<PredictionRequest, ExoError> {
    let edited = |id: &str| values.get(id).copied().flatten().filter(|v| v.is_finite());

    let missing: Vec<String> = dataset
        .schema()
        .iter()
        .filter(|p| dataset.required().contains(&p.id) && edited(p.id).is_none())
        .map(|p| p.id.to_string())
        .collect();
    if !missing.is_empty() {
        warn!(
            "Rejecting {} submission, missing: {}",
            dataset.name(),
            missing.join(", ")
        );
        return Err(ExoError::MissingParameters(missing));
    }

    for id in values.keys().filter(|id| dataset.param(id).is_none()) {
        debug!("Ignoring unknown {} parameter {}", dataset.name(), id);
    }

    let fields = dataset
        .schema()
        .iter()
        .map(|p| {
            let value = edited(p.id).unwrap_or(p.default);
            (p.id.to_string(), Value::from(value))
        })
        .collect();

    Ok(PredictionRequest { dataset, fields })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn blank_values(dataset: Dataset) -> HashMap<String, Option<f64>> {
        dataset
            .schema()
            .iter()
            .map(|p| (p.id.to_string(), None))
            .collect()
    }

    fn primary_defaults(dataset: Dataset) -> HashMap<String, Option<f64>> {
        dataset
            .schema()
            .iter()
            .map(|p| {
                let value = (p.tier == Tier::Primary).then_some(p.default);
                (p.id.to_string(), value)
            })
            .collect()
    }

    #[test]
    fn test_schema_sizes() {
        assert_eq!(KEPLER_PARAMS.len(), 42);
        assert_eq!(TESS_PARAMS.len(), 9);
        assert_eq!(
            KEPLER_PARAMS.iter().filter(|p| p.tier == Tier::Primary).count(),
            6
        );
        assert!(TESS_PARAMS.iter().all(|p| p.tier == Tier::Primary));
    }

    #[test]
    fn test_schema_ids_unique() {
        for dataset in Dataset::ALL {
            let ids: HashSet<&str> = dataset.schema().iter().map(|p| p.id).collect();
            assert_eq!(ids.len(), dataset.schema().len(), "{:?} has duplicate ids", dataset);
        }
    }

    #[test]
    fn test_required_fields_exist_in_schema() {
        for dataset in Dataset::ALL {
            for id in dataset.required() {
                assert!(dataset.param(id).is_some(), "{} not in {:?} schema", id, dataset);
            }
        }
        assert_eq!(KEPLER_REQUIRED.len(), 6);
    }

    #[test]
    fn test_blank_optionals_yield_defaults() {
        let request = build_request(Dataset::Kepler, &primary_defaults(Dataset::Kepler)).unwrap();
        assert_eq!(request, PredictionRequest::defaults(Dataset::Kepler));
        assert_eq!(request.len(), 42);
    }

    #[test]
    fn test_tess_all_blank_except_period() {
        let mut values = blank_values(Dataset::Tess);
        values.insert("pl_orbper".into(), Some(12.3));

        let request = build_request(Dataset::Tess, &values).unwrap();

        let mut expected = PredictionRequest::defaults(Dataset::Tess).to_json();
        expected["pl_orbper"] = Value::from(12.3);
        assert_eq!(request.to_json(), expected);
    }

    #[test]
    fn test_each_missing_kepler_required_field_is_rejected() {
        for id in KEPLER_REQUIRED {
            let mut values = primary_defaults(Dataset::Kepler);
            values.remove(*id);
            match build_request(Dataset::Kepler, &values) {
                Err(ExoError::MissingParameters(missing)) => assert_eq!(missing, vec![id.to_string()]),
                other => panic!("expected MissingParameters for {}, got {:?}", id, other),
            }
        }
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let mut values = primary_defaults(Dataset::Kepler);
        values.insert("koi_teq".into(), None);
        values.insert("koi_srad".into(), Some(f64::NAN));
        match build_request(Dataset::Kepler, &values) {
            Err(ExoError::MissingParameters(missing)) => {
                assert_eq!(missing, vec!["koi_teq".to_string(), "koi_srad".to_string()])
            }
            other => panic!("expected MissingParameters, got {:?}", other),
        }
    }

    #[test]
    fn test_edited_value_overrides_only_its_field() {
        let mut values = primary_defaults(Dataset::Kepler);
        values.insert("koi_depth".into(), Some(500.0));
        let request = build_request(Dataset::Kepler, &values).unwrap();

        let defaults = PredictionRequest::defaults(Dataset::Kepler);
        for p in KEPLER_PARAMS {
            if p.id == "koi_depth" {
                assert_eq!(request.get(p.id), Some(500.0));
            } else {
                assert_eq!(request.get(p.id), defaults.get(p.id), "{} changed", p.id);
            }
        }
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut values = primary_defaults(Dataset::Tess);
        values.insert("koi_period".into(), Some(1.0));
        let request = build_request(Dataset::Tess, &values).unwrap();
        assert_eq!(request.get("koi_period"), None);
        assert_eq!(request.len(), 9);
    }

    #[test]
    fn test_request_serializes_as_flat_object_in_schema_order() {
        let json = serde_json::to_string(&PredictionRequest::defaults(Dataset::Tess)).unwrap();
        assert!(json.starts_with("{\"pl_orbper\":8.5,\"pl_trandurh\":2.5"), "{}", json);
    }
}
