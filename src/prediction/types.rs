//! Wire types for the prediction service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::SeverityClass;

/// Tri-state implant flag sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Implanted {
    Yes,
    #[default]
    No,
    Unknown,
}

impl Implanted {
    pub const ALL: [Implanted; 3] = [Implanted::Yes, Implanted::No, Implanted::Unknown];

    pub fn as_str(self) -> &'static str {
        match self {
            Implanted::Yes => "yes",
            Implanted::No => "no",
            Implanted::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Implanted::Yes => "Yes",
            Implanted::No => "No",
            Implanted::Unknown => "Unknown",
        }
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub name: String,
    pub name_manufacturer: String,
    pub classification: String,
    pub implanted: Implanted,
}

/// Successful `/predict` response. Unknown fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub prediction: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionResponse {
    /// Recognised severity class, `None` for anything outside "1"-"4".
    pub fn severity(&self) -> Option<SeverityClass> {
        SeverityClass::from_prediction(&self.prediction)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for prediction, got {other}"
        ))),
    }
}

/// Result of one submission: either the parsed body or a displayable message.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(PredictionResponse),
    Error(String),
}

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: Option<bool>,
    #[serde(default)]
    pub encoders_loaded: Option<bool>,
    #[serde(default)]
    pub total_predictions: Option<u64>,
}

impl HealthStatus {
    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("Service {}", self.status)];
        if let Some(loaded) = self.model_loaded {
            parts.push(if loaded {
                "model loaded".to_string()
            } else {
                "rule-based fallback".to_string()
            });
        }
        if let Some(loaded) = self.encoders_loaded {
            parts.push(if loaded {
                "encoders loaded".to_string()
            } else {
                "encoders missing".to_string()
            });
        }
        if let Some(total) = self.total_predictions {
            parts.push(format!("{total} predictions served"));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_with_wire_names() {
        let request = PredictionRequest {
            name: "Infusion Pump".to_string(),
            name_manufacturer: "Acme".to_string(),
            classification: "Class II".to_string(),
            implanted: Implanted::Unknown,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Infusion Pump",
                "name_manufacturer": "Acme",
                "classification": "Class II",
                "implanted": "unknown",
            })
        );
    }

    #[test]
    fn implanted_defaults_to_no() {
        assert_eq!(Implanted::default(), Implanted::No);
        assert_eq!(Implanted::default().as_str(), "no");
    }

    #[test]
    fn response_keeps_optional_and_extra_fields() {
        let response: PredictionResponse = serde_json::from_value(json!({
            "prediction": "2",
            "confidence": 0.84,
            "method": "catboost",
            "status": "success",
        }))
        .unwrap();
        assert_eq!(response.prediction, "2");
        assert_eq!(response.confidence, Some(0.84));
        assert_eq!(response.method.as_deref(), Some("catboost"));
        assert_eq!(response.extra.get("status"), Some(&json!("success")));
        assert_eq!(response.severity(), Some(SeverityClass::MediumHigh));
    }

    #[test]
    fn response_needs_only_prediction() {
        let response: PredictionResponse =
            serde_json::from_str(r#"{"prediction":"4"}"#).unwrap();
        assert_eq!(response.confidence, None);
        assert_eq!(response.method, None);
        assert!(response.extra.is_empty());
    }

    #[test]
    fn numeric_prediction_is_read_as_text() {
        let response: PredictionResponse = serde_json::from_str(r#"{"prediction":1}"#).unwrap();
        assert_eq!(response.prediction, "1");
        assert_eq!(response.severity(), Some(SeverityClass::High));
    }

    #[test]
    fn missing_prediction_is_rejected() {
        assert!(serde_json::from_str::<PredictionResponse>(r#"{"confidence":0.5}"#).is_err());
        assert!(serde_json::from_str::<PredictionResponse>(r#"{"prediction":null}"#).is_err());
    }

    #[test]
    fn health_summary_mentions_model_state() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "healthy",
            "model_loaded": false,
            "total_predictions": 3,
        }))
        .unwrap();
        assert_eq!(
            health.summary(),
            "Service healthy, rule-based fallback, 3 predictions served"
        );
    }

    #[test]
    fn health_summary_reports_encoders() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "healthy",
            "model_loaded": true,
            "encoders_loaded": false,
        }))
        .unwrap();
        assert_eq!(
            health.summary(),
            "Service healthy, model loaded, encoders missing"
        );
    }
}
