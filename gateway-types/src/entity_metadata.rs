use gateway_codec::{
    check_hex, decode_record, encode_record, impl_serde_via_codec, impl_wire_value, nested,
    CodecConfig, CodecError, Decode, Document, DocumentBuilder, Encode, Fields, JsonValue, Record,
    Validate, Violation,
};

use crate::metadata::MetadataTypedValue;

/// EntityMetadataItemValue : one metadata entry in three renderings.
///
/// All three fields are required; `programmatic_json` may hold any JSON except
/// `null`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityMetadataItemValue {
    raw_hex: String,
    programmatic_json: JsonValue,
    typed: MetadataTypedValue,
}

impl EntityMetadataItemValue {
    /// # Errors
    /// [`CodecError::MissingRequiredField`] if `programmatic_json` is `null`.
    pub fn try_new(
        raw_hex: String,
        programmatic_json: JsonValue,
        typed: MetadataTypedValue,
    ) -> Result<Self, CodecError> {
        if programmatic_json.is_null() {
            return Err(CodecError::MissingRequiredField {
                field: "programmatic_json",
                variant: <Self as Record>::NAME,
            });
        }
        Ok(Self { raw_hex, programmatic_json, typed })
    }

    /// SBOR encoding of the value, hex-encoded.
    #[must_use]
    pub fn raw_hex(&self) -> &str {
        &self.raw_hex
    }

    /// The value as programmatic SBOR JSON, kept untyped.
    #[must_use]
    pub const fn programmatic_json(&self) -> &JsonValue {
        &self.programmatic_json
    }

    #[must_use]
    pub const fn typed(&self) -> &MetadataTypedValue {
        &self.typed
    }
}

impl Record for EntityMetadataItemValue {
    const NAME: &'static str = "EntityMetadataItemValue";

    fn read(fields: &Fields<'_>) -> Result<Self, CodecError> {
        Self::try_new(
            fields.required("raw_hex")?,
            fields.required("programmatic_json")?,
            fields.required("typed")?,
        )
    }

    fn write(&self, doc: DocumentBuilder) -> DocumentBuilder {
        doc.field("raw_hex", &self.raw_hex)
            .field("programmatic_json", &self.programmatic_json)
            .field("typed", &self.typed)
    }
}

impl Decode for EntityMetadataItemValue {
    const NAME: &'static str = <Self as Record>::NAME;

    fn decode_with(doc: &Document, config: &CodecConfig) -> Result<Self, CodecError> {
        decode_record(doc, config)
    }
}

impl Encode for EntityMetadataItemValue {
    fn encode(&self) -> Document {
        encode_record(self)
    }
}

impl_wire_value!(EntityMetadataItemValue);
impl_serde_via_codec!(EntityMetadataItemValue);

impl Validate for EntityMetadataItemValue {
    fn validate(&self) -> Vec<Violation> {
        let mut violations: Vec<Violation> =
            check_hex("raw_hex", &self.raw_hex, None).into_iter().collect();
        violations.extend(nested("typed", &self.typed));
        violations
    }
}
