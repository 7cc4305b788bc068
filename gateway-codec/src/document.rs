use serde_json::{Map, Value};

use crate::{CodecConfig, CodecError, WireError, WireValue};

/// A decoded JSON object. Insertion order is preserved, so encoders emit
/// fields in declaration order.
pub type Document = Map<String, Value>;

/// Read access to the fields of one document on behalf of one model.
///
/// `null` is treated exactly like an absent key.
pub struct Fields<'a> {
    doc: &'a Document,
    owner: &'static str,
    config: &'a CodecConfig,
}

impl<'a> Fields<'a> {
    #[must_use]
    pub const fn new(doc: &'a Document, owner: &'static str, config: &'a CodecConfig) -> Self {
        Self { doc, owner, config }
    }

    /// Name of the model the fields are read for, used in error reports.
    #[must_use]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    #[must_use]
    pub const fn config(&self) -> &'a CodecConfig {
        self.config
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.doc.get(key).filter(|value| !value.is_null())
    }

    fn read<T: WireValue>(&self, key: &'static str, value: &Value) -> Result<T, CodecError> {
        T::from_wire(value, self.config).map_err(|error| match error {
            WireError::Codec(error) => error,
            WireError::Invalid(reason) => {
                CodecError::InvalidField { variant: self.owner, field: key, reason }
            },
        })
    }

    /// # Errors
    /// [`CodecError::MissingRequiredField`] when the key is absent or `null`.
    pub fn required<T: WireValue>(&self, key: &'static str) -> Result<T, CodecError> {
        let value = self
            .present(key)
            .ok_or(CodecError::MissingRequiredField { field: key, variant: self.owner })?;
        self.read(key, value)
    }

    /// # Errors
    /// Only when the field is present with a malformed value.
    pub fn optional<T: WireValue>(&self, key: &'static str) -> Result<Option<T>, CodecError> {
        self.present(key).map(|value| self.read(key, value)).transpose()
    }

    /// # Errors
    /// Only when the field is present with a malformed value.
    pub fn or_default<T: WireValue>(&self, key: &'static str, default: T) -> Result<T, CodecError> {
        Ok(self.optional(key)?.unwrap_or(default))
    }
}

/// Builds an encoded document field by field.
#[derive(Debug, Default, Clone)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a document with the discriminator, so it is always the first key.
    #[must_use]
    pub fn tagged(discriminator: &str, tag: &str) -> Self {
        let mut doc = Document::new();
        doc.insert(discriminator.to_owned(), Value::String(tag.to_owned()));
        Self { doc }
    }

    #[must_use]
    pub fn field<T: WireValue>(mut self, key: &str, value: &T) -> Self {
        self.doc.insert(key.to_owned(), value.to_wire());
        self
    }

    /// Absent optionals are skipped rather than written as `null`.
    #[must_use]
    pub fn optional<T: WireValue>(self, key: &str, value: Option<&T>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn finish(self) -> Document {
        self.doc
    }
}
