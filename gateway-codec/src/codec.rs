use serde_json::Value;

use crate::{CodecConfig, CodecError, Document, DocumentBuilder, Fields, Registry};

/// Decoding from a JSON document.
pub trait Decode: Sized {
    /// Model name used in error reports.
    const NAME: &'static str;

    /// # Errors
    /// Returns the first structural problem found; no partial value is produced.
    fn decode_with(doc: &Document, config: &CodecConfig) -> Result<Self, CodecError>;

    /// # Errors
    /// See [`Decode::decode_with`].
    fn decode(doc: &Document) -> Result<Self, CodecError> {
        Self::decode_with(doc, &CodecConfig::default())
    }

    /// # Errors
    /// [`CodecError::NotAnObject`] if `value` is not an object.
    fn decode_value_with(value: &Value, config: &CodecConfig) -> Result<Self, CodecError> {
        match value {
            Value::Object(doc) => Self::decode_with(doc, config),
            _ => Err(CodecError::NotAnObject { variant: Self::NAME }),
        }
    }

    /// # Errors
    /// See [`Decode::decode_value_with`].
    fn decode_value(value: &Value) -> Result<Self, CodecError> {
        Self::decode_value_with(value, &CodecConfig::default())
    }

    /// # Errors
    /// [`CodecError::Json`] if `text` is not JSON, otherwise see [`Decode::decode_value_with`].
    fn from_json(text: &str) -> Result<Self, CodecError> {
        let value = serde_json::from_str::<Value>(text)?;
        Self::decode_value(&value)
    }
}

/// Encoding into a JSON document.
pub trait Encode {
    fn encode(&self) -> Document;

    fn to_value(&self) -> Value {
        Value::Object(self.encode())
    }

    fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    fn to_json_pretty(&self) -> String {
        format!("{:#}", self.to_value())
    }
}

/// A model with a fixed field schema.
pub trait Record: Sized {
    const NAME: &'static str;

    /// # Errors
    /// Missing required fields or malformed values.
    fn read(fields: &Fields<'_>) -> Result<Self, CodecError>;

    /// Append the declared fields, in declaration order.
    fn write(&self, doc: DocumentBuilder) -> DocumentBuilder;
}

/// A record bound to exactly one discriminator value of a tagged family.
pub trait VariantRecord: Record {
    /// Key holding the discriminator, e.g. `type` or `kind`.
    const DISCRIMINATOR: &'static str;
    /// Canonical discriminator value.
    const TAG: &'static str;
}

/// A variant record registered in the family `Family`.
pub trait FamilyVariant: VariantRecord {
    type Family: TaggedValue;
}

/// A family of variants sharing one discriminator key.
pub trait TaggedValue: Decode + Encode + 'static {
    /// The enumerated discriminator.
    type Tag: Copy + Eq + core::fmt::Debug + 'static;

    fn registry() -> &'static Registry<Self>;

    fn tag(&self) -> Self::Tag;

    fn tag_str(&self) -> &'static str;
}

/// # Errors
/// See [`Record::read`].
pub fn decode_record<R: Record>(doc: &Document, config: &CodecConfig) -> Result<R, CodecError> {
    R::read(&Fields::new(doc, R::NAME, config))
}

/// Decode a single variant without going through its family.
///
/// The discriminator may be omitted, but if it is present it must name this
/// variant. The payload type name only counts when the family's registry
/// accepts it.
///
/// # Errors
/// [`CodecError::DiscriminatorMismatch`] or any error from [`Record::read`].
pub fn decode_variant<V: FamilyVariant>(
    doc: &Document,
    config: &CodecConfig,
) -> Result<V, CodecError> {
    match doc.get(V::DISCRIMINATOR) {
        None | Some(Value::Null) => {},
        Some(Value::String(tag))
            if tag == V::TAG
                || (tag == V::NAME && V::Family::registry().accepts_type_name(config)) => {},
        Some(other) => {
            let found = other.as_str().map_or_else(|| other.to_string(), str::to_owned);
            return Err(CodecError::DiscriminatorMismatch {
                variant: V::NAME,
                expected: V::TAG,
                found,
            });
        },
    }
    decode_record(doc, config)
}

#[must_use]
pub fn encode_record<R: Record>(record: &R) -> Document {
    record.write(DocumentBuilder::new()).finish()
}

#[must_use]
pub fn encode_variant<V: VariantRecord>(variant: &V) -> Document {
    variant.write(DocumentBuilder::tagged(V::DISCRIMINATOR, V::TAG)).finish()
}
