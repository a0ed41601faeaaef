// Per-file conditions that skip an asset without stopping the batch
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("No base_color found")]
    MissingField,
    #[error("Could not parse base_color `{0}`")]
    MalformedField(String),
}

impl AssetError {
    /// Short machine-friendly kind, used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            AssetError::MissingField => "missing_field",
            AssetError::MalformedField(_) => "malformed_field",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AssetError::MissingField.to_string(), "No base_color found");
        assert_eq!(
            AssetError::MalformedField("Color(a, b)".to_string()).to_string(),
            "Could not parse base_color `Color(a, b)`"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(AssetError::MissingField.kind(), "missing_field");
        assert_eq!(AssetError::MalformedField(String::new()).kind(), "malformed_field");
    }
}
