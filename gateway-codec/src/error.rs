use thiserror::Error;

/// Characters of a logged message kept before it is cut.
pub const LOG_MESSAGE_LIMIT: usize = 100;

/// Structural failures raised while decoding or constructing a model.
///
/// Cross-field problems are not errors, see [`crate::Violation`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A non-nullable field was absent or `null`.
    #[error("{field} is a required property for {variant} and cannot be null")]
    MissingRequiredField { field: &'static str, variant: &'static str },

    /// The discriminator value is not registered for the family.
    #[error("unknown {family} variant `{tag}`")]
    UnknownVariant { family: &'static str, tag: String },

    /// A concrete variant was decoded from a document tagged for another variant.
    #[error("{variant} expects discriminator `{expected}`, found `{found}`")]
    DiscriminatorMismatch { variant: &'static str, expected: &'static str, found: String },

    /// The field is present but its value has the wrong shape.
    #[error("invalid {field} in {variant}: {reason}")]
    InvalidField { variant: &'static str, field: &'static str, reason: String },

    /// The value handed to the decoder is not a JSON object.
    #[error("{variant} must be encoded as a JSON object")]
    NotAnObject { variant: &'static str },

    /// The input text is not JSON at all.
    #[error("malformed JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

/// Renders a value for a log line, cut to [`LOG_MESSAGE_LIMIT`] characters.
///
/// Unknown discriminators come straight from the wire and can be arbitrarily long.
pub struct SafeLogError<'a, T: ?Sized>(&'a T);

impl<T: ToString + ?Sized> std::fmt::Display for SafeLogError<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = self.0.to_string();
        let message = message.trim();
        match message.char_indices().nth(LOG_MESSAGE_LIMIT) {
            Some((cut, _)) => write!(f, "{}...", message[..cut].trim_end()),
            None => f.write_str(message),
        }
    }
}

pub trait LogErrorExt {
    fn truncate(&self) -> SafeLogError<'_, Self>;
}

impl LogErrorExt for CodecError {
    fn truncate(&self) -> SafeLogError<'_, Self> {
        SafeLogError(self)
    }
}

impl LogErrorExt for str {
    fn truncate(&self) -> SafeLogError<'_, Self> {
        SafeLogError(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_field_and_variant() {
        let error = CodecError::MissingRequiredField {
            field: "programmatic_json",
            variant: "EntityMetadataItemValue",
        };
        assert_eq!(
            error.to_string(),
            "programmatic_json is a required property for EntityMetadataItemValue and cannot be null"
        );
    }

    #[test]
    fn truncates_long_messages() {
        let error = CodecError::UnknownVariant {
            family: "MetadataTypedValue",
            tag: "x".repeat(500),
        };
        let logged = error.truncate().to_string();
        assert!(logged.ends_with("..."));
        assert_eq!(logged.chars().count(), LOG_MESSAGE_LIMIT + 3);

        let short = "U32";
        assert_eq!(short.truncate().to_string(), "U32");

        let wide = "é".repeat(LOG_MESSAGE_LIMIT + 1);
        assert_eq!(wide.as_str().truncate().to_string(), format!("{}...", "é".repeat(LOG_MESSAGE_LIMIT)));
        let exact = "é".repeat(LOG_MESSAGE_LIMIT);
        assert_eq!(exact.as_str().truncate().to_string(), exact);
    }
}
