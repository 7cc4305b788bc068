use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{CodecConfig, CodecError};

/// Failure reading a single field value.
///
/// `Invalid` carries only a reason; [`crate::Fields`] attaches the field and
/// variant names. `Codec` comes from a nested model and is passed through as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    Codec(CodecError),
    Invalid(String),
}

impl WireError {
    pub fn invalid(reason: impl Display) -> Self {
        Self::Invalid(reason.to_string())
    }
}

impl From<CodecError> for WireError {
    fn from(error: CodecError) -> Self {
        Self::Codec(error)
    }
}

/// A value that can sit in a field of an encoded document.
pub trait WireValue: Sized {
    /// Read the value of a present, non-null field.
    ///
    /// # Errors
    /// Returns `Err` if the JSON value doesn't have the expected shape.
    fn from_wire(value: &Value, config: &CodecConfig) -> Result<Self, WireError>;

    fn to_wire(&self) -> Value;
}

macro_rules! impl_wire_via_serde {
    ($($ty: ty),+ $(,)?) => {
        $(
            impl WireValue for $ty {
                fn from_wire(value: &Value, _config: &CodecConfig) -> Result<Self, WireError> {
                    <$ty as Deserialize>::deserialize(value).map_err(WireError::invalid)
                }

                fn to_wire(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )+
    };
}

impl_wire_via_serde!(String, bool, i32, i64, u32, u64);

impl WireValue for DateTime<Utc> {
    fn from_wire(value: &Value, _config: &CodecConfig) -> Result<Self, WireError> {
        let Value::String(text) = value else {
            return Err(WireError::invalid(format!("expected an RFC 3339 timestamp, found {value}")));
        };
        DateTime::parse_from_rfc3339(text)
            .map(|timestamp| timestamp.with_timezone(&Utc))
            .map_err(WireError::invalid)
    }

    fn to_wire(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn from_wire(value: &Value, config: &CodecConfig) -> Result<Self, WireError> {
        let Value::Array(items) = value else {
            return Err(WireError::invalid(format!("expected an array, found {value}")));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_wire(item, config).map_err(|error| match error {
                    WireError::Invalid(reason) => WireError::Invalid(format!("[{index}]: {reason}")),
                    nested @ WireError::Codec(_) => nested,
                })
            })
            .collect()
    }

    fn to_wire(&self) -> Value {
        Value::Array(self.iter().map(WireValue::to_wire).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_scalars() {
        let config = CodecConfig::default();
        assert_eq!(String::from_wire(&json!("42"), &config), Ok("42".to_string()));
        assert_eq!(i64::from_wire(&json!(-7), &config), Ok(-7));
        assert!(matches!(bool::from_wire(&json!("true"), &config), Err(WireError::Invalid(_))));
    }

    #[test]
    fn sequence_errors_carry_the_index() {
        let config = CodecConfig::default();
        let error = Vec::<String>::from_wire(&json!(["a", 1, "c"]), &config).unwrap_err();
        match error {
            WireError::Invalid(reason) => assert!(reason.starts_with("[1]: "), "{reason}"),
            WireError::Codec(error) => panic!("unexpected {error}"),
        }
    }

    #[test]
    fn timestamps_keep_their_precision() {
        let config = CodecConfig::default();
        let wire = json!("2023-09-27T12:34:56.789Z");
        let timestamp = DateTime::<Utc>::from_wire(&wire, &config).unwrap();
        assert_eq!(timestamp.to_wire(), wire);
    }
}
