//! Stable error codes surfaced at the host boundary.

/// Every error type maps to a stable, upper-snake error code.
pub trait GridsightErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const FEATURE_SOURCE_NOT_FOUND: &str = "FEATURE_SOURCE_NOT_FOUND";
pub const EMPTY_FEATURE_SET: &str = "EMPTY_FEATURE_SET";
pub const DUPLICATE_COLUMN: &str = "DUPLICATE_COLUMN";
pub const RAGGED_ROW: &str = "RAGGED_ROW";
pub const FEATURE_PARSE_ERROR: &str = "FEATURE_PARSE_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const FIT_ERROR: &str = "FIT_ERROR";
pub const INVALID_MODEL_PARAMETER: &str = "INVALID_MODEL_PARAMETER";
pub const NOT_READY: &str = "NOT_READY";
pub const INDEX_OUT_OF_RANGE: &str = "INDEX_OUT_OF_RANGE";
pub const NUMERIC_FAILURE: &str = "NUMERIC_FAILURE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const TRACING_ERROR: &str = "TRACING_ERROR";
