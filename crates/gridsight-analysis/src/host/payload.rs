//! Error bodies returned to the dashboard.

use serde::Serialize;

use gridsight_core::errors::error_code;
use gridsight_core::errors::{ExplainError, GridsightError};
use gridsight_core::GridsightErrorCode;

/// JSON error body plus the status the host should answer with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    pub code: &'static str,
    #[serde(skip)]
    pub status: u16,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>, code: &'static str, status: u16) -> Self {
        Self {
            error: error.into(),
            code,
            status,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.error, "code": self.code })
    }
}

/// Missing rows and missing sources are the caller's problem; everything
/// else is internal.
fn status_for(code: &str) -> u16 {
    match code {
        error_code::INDEX_OUT_OF_RANGE | error_code::FEATURE_SOURCE_NOT_FOUND => 404,
        _ => 500,
    }
}

impl From<&ExplainError> for ErrorPayload {
    fn from(e: &ExplainError) -> Self {
        let code = e.error_code();
        Self::new(e.to_string(), code, status_for(code))
    }
}

impl From<&GridsightError> for ErrorPayload {
    fn from(e: &GridsightError) -> Self {
        let code = e.error_code();
        Self::new(e.to_string(), code, status_for(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsight_core::errors::FeatureError;

    #[test]
    fn out_of_range_is_a_client_error() {
        let payload = ErrorPayload::from(&ExplainError::IndexOutOfRange {
            index: 99,
            row_count: 10,
        });
        assert_eq!(payload.status, 404);
        assert_eq!(payload.code, "INDEX_OUT_OF_RANGE");
        assert!(payload.is_client_error());
        assert!(payload.error.contains("99"));
    }

    #[test]
    fn not_ready_is_internal() {
        let payload = ErrorPayload::from(&ExplainError::NotReady);
        assert_eq!(payload.status, 500);
        assert!(!payload.is_client_error());
    }

    #[test]
    fn load_failures_map_through_top_level_error() {
        let err = GridsightError::from(FeatureError::EmptyFeatureSet {
            path: "features.csv".into(),
        });
        let payload = ErrorPayload::from(&err);
        assert_eq!(payload.code, "EMPTY_FEATURE_SET");
        assert_eq!(payload.status, 500);
    }

    #[test]
    fn json_body_omits_status() {
        let payload = ErrorPayload::from(&ExplainError::NotReady);
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body, payload.to_json());
        assert!(body.get("status").is_none());
    }
}
