//! Error types for Plume

use thiserror::Error;

/// The main error type for Plume operations
#[derive(Debug, Error)]
pub enum PlumeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Unknown control: {0}")]
    UnknownControl(String),

    #[error("Invalid key binding for '{action}': {reason}")]
    InvalidKeyBinding { action: String, reason: String },
}

/// Result type alias for Plume operations
pub type Result<T> = std::result::Result<T, PlumeError>;

impl From<toml::de::Error> for PlumeError {
    fn from(err: toml::de::Error) -> Self {
        PlumeError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PlumeError {
    fn from(err: toml::ser::Error) -> Self {
        PlumeError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message() {
        let err = PlumeError::ValueOutOfRange {
            field: "smoke.speed_std_dev".into(),
            min: 0.0,
            max: f64::MAX,
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("smoke.speed_std_dev"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn toml_error_converts() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: PlumeError = parsed.unwrap_err().into();
        assert!(matches!(err, PlumeError::TomlParseError(_)));
    }
}
