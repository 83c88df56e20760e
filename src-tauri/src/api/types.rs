//! Wire types for the prediction API.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// The server sends the id as a string; older builds send a number.
    #[serde(deserialize_with = "numeric_id")]
    pub user_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A classification label. The Kepler model answers with `0`/`1`, the TESS
/// model with disposition codes such as `"PC"`; both end up as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(String);

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
            Flag(bool),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Label(s.trim().to_string()),
            Raw::Int(n) => Label(n.to_string()),
            Raw::Float(f) => Label(f.to_string()),
            Raw::Flag(b) => Label(if b { "1" } else { "0" }.to_string()),
        })
    }
}

/// Response of a predict call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub prediction: Label,
    /// Fraction in `[0, 1]`.
    pub confidence: f64,
    pub prediction_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A stored prediction as returned by the list and get endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub prediction_id: String,
    pub prediction: Label,
    pub confidence: f64,
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub user_id: Option<u64>,
    /// `created_at` formatted for display; filled in by the client.
    #[serde(default)]
    pub created_label: Option<String>,
}

impl PredictionRecord {
    pub fn confidence_percent(&self) -> f64 {
        confidence_percent(self.confidence)
    }

    pub fn with_created_label(mut self) -> Self {
        self.created_label = self.created_at.as_deref().map(display_time);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPage {
    pub predictions: Vec<PredictionRecord>,
    pub total: u64,
}

/// Confidence arrives as a fraction and is displayed as a percentage with one
/// decimal place.
pub fn confidence_percent(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

/// Render an API timestamp as `Oct 5, 2025 12:00`. The server sends naive
/// ISO-8601 times; RFC 3339 with an offset is accepted too. Anything else is
/// shown as received.
pub fn display_time(raw: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(FORMAT).to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|dt| dt.format(FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Error payload returned by the API. Parsed once, at the transport boundary.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Detail>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    Text(String),
    Validation(Vec<ValidationItem>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationItem {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

impl Detail {
    pub fn to_message(&self) -> String {
        match self {
            Detail::Text(s) => s.clone(),
            Detail::Validation(items) => items
                .iter()
                .map(|item| {
                    let loc: Vec<String> = item
                        .loc
                        .iter()
                        .filter(|part| part.as_str() != Some("body"))
                        .map(|part| match part {
                            serde_json::Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect();
                    if loc.is_empty() {
                        item.msg.clone()
                    } else {
                        format!("{}: {}", loc.join("."), item.msg)
                    }
                })
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl ErrorBody {
    pub fn detail_message(&self) -> Option<String> {
        self.detail
            .as_ref()
            .map(Detail::to_message)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn message(&self) -> Option<String> {
        self.message.clone().filter(|s| !s.trim().is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

fn numeric_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(n) => Ok(n),
        IdRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("user_id is not numeric: {:?}", s))),
    }
}

fn optional_numeric_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Number(n)) => Ok(Some(n)),
        Some(IdRepr::Text(s)) => Ok(s.trim().parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_accepts_string_user_id() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "access_token": "tok",
            "token_type": "bearer",
            "user_id": "7"
        }))
        .unwrap();
        assert_eq!(resp.user_id, 7);
        assert_eq!(resp.access_token, "tok");
    }

    #[test]
    fn test_login_response_rejects_non_numeric_user_id() {
        let result = serde_json::from_value::<LoginResponse>(json!({
            "access_token": "tok",
            "user_id": "seven"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_label_from_number_and_string() {
        let kepler: PredictionOutcome = serde_json::from_value(json!({
            "prediction": 1,
            "confidence": 0.93,
            "prediction_id": "abc"
        }))
        .unwrap();
        assert_eq!(kepler.prediction.as_str(), "1");

        let tess: PredictionOutcome = serde_json::from_value(json!({
            "prediction": "PC",
            "confidence": 0.71,
            "prediction_id": "def",
            "timestamp": "2025-10-05T12:00:00"
        }))
        .unwrap();
        assert_eq!(tess.prediction.as_str(), "PC");
        assert_eq!(tess.timestamp.as_deref(), Some("2025-10-05T12:00:00"));
    }

    #[test]
    fn test_record_accepts_timestamp_alias() {
        let record: PredictionRecord = serde_json::from_value(json!({
            "prediction_id": "x1",
            "prediction": "FP",
            "confidence": 0.456,
            "timestamp": "2025-10-05T12:00:00",
            "user_id": "3"
        }))
        .unwrap();
        assert_eq!(record.created_at.as_deref(), Some("2025-10-05T12:00:00"));
        assert_eq!(record.user_id, Some(3));
        assert_eq!(record.confidence_percent(), 45.6);
    }

    #[test]
    fn test_display_time_formats() {
        assert_eq!(display_time("2025-10-05T12:00:00"), "Oct 5, 2025 12:00");
        assert_eq!(display_time("2025-10-05T08:30:15.123456"), "Oct 5, 2025 08:30");
        assert_eq!(display_time("2025-10-05T12:00:00+00:00"), "Oct 5, 2025 12:00");
        assert_eq!(display_time("yesterday"), "yesterday");
    }

    #[test]
    fn test_confidence_percent_rounds_to_one_decimal() {
        assert_eq!(confidence_percent(0.0), 0.0);
        assert_eq!(confidence_percent(1.0), 100.0);
        assert_eq!(confidence_percent(0.87654), 87.7);
    }

    #[test]
    fn test_error_body_detail_text_and_validation_list() {
        let text: ErrorBody = serde_json::from_value(json!({ "detail": "Email already registered" })).unwrap();
        assert_eq!(text.detail_message().as_deref(), Some("Email already registered"));

        let validation: ErrorBody = serde_json::from_value(json!({
            "detail": [
                { "loc": ["body", "koi_period"], "msg": "field required", "type": "value_error.missing" },
                { "loc": ["query", "user_id"], "msg": "value is not a valid integer", "type": "type_error.integer" }
            ]
        }))
        .unwrap();
        assert_eq!(
            validation.detail_message().as_deref(),
            Some("koi_period: field required; query.user_id: value is not a valid integer")
        );
    }

    #[test]
    fn test_error_body_message_only() {
        let body: ErrorBody = serde_json::from_value(json!({ "message": "Prediction not found" })).unwrap();
        assert_eq!(body.detail_message(), None);
        assert_eq!(body.message().as_deref(), Some("Prediction not found"));
    }
}
