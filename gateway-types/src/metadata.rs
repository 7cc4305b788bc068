//! Typed entity metadata values, discriminated by `type`.
//!
//! Besides the canonical tags, the payload type names (`MetadataU32Value`, ...)
//! are accepted as discriminators when decoding.
use chrono::{DateTime, FixedOffset};
use gateway_codec::{
    check_decimal, check_hex, check_parse, indexed, nested, nested_each, record, tagged_union,
    Validate, Violation,
};

use crate::public_key::{PublicKey, PublicKeyHash};

record! {
    pub struct MetadataStringValue: "type" = "String" {
        value: required String,
    }
}

record! {
    pub struct MetadataBoolValue: "type" = "Bool" {
        value: required bool,
    }
}

record! {
    pub struct MetadataU8Value: "type" = "U8" {
        /// Decimal string in `0..=255`.
        value: required String,
    }
}

record! {
    pub struct MetadataU32Value: "type" = "U32" {
        value: required String,
    }
}

record! {
    pub struct MetadataU64Value: "type" = "U64" {
        value: required String,
    }
}

record! {
    pub struct MetadataI32Value: "type" = "I32" {
        value: required String,
    }
}

record! {
    pub struct MetadataI64Value: "type" = "I64" {
        value: required String,
    }
}

record! {
    pub struct MetadataDecimalValue: "type" = "Decimal" {
        value: required String,
    }
}

record! {
    pub struct MetadataGlobalAddressValue: "type" = "GlobalAddress" {
        /// Bech32m-encoded human readable address.
        value: required String,
    }
}

record! {
    pub struct MetadataPublicKeyValue: "type" = "PublicKey" {
        value: required PublicKey,
    }
}

record! {
    pub struct MetadataNonFungibleGlobalIdValue: "type" = "NonFungibleGlobalId" {
        resource_address: required String,
        non_fungible_id: required String,
    }
}

record! {
    pub struct MetadataNonFungibleLocalIdValue: "type" = "NonFungibleLocalId" {
        value: required String,
    }
}

record! {
    pub struct MetadataInstantValue: "type" = "Instant" {
        /// RFC 3339 rendering of the instant.
        value: required String,
        unix_timestamp_seconds: required String,
    }
}

record! {
    pub struct MetadataUrlValue: "type" = "Url" {
        value: required String,
    }
}

record! {
    pub struct MetadataOriginValue: "type" = "Origin" {
        value: required String,
    }
}

record! {
    pub struct MetadataPublicKeyHashValue: "type" = "PublicKeyHash" {
        value: required PublicKeyHash,
    }
}

record! {
    pub struct MetadataStringArrayValue: "type" = "StringArray" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataBoolArrayValue: "type" = "BoolArray" {
        values: required Vec<bool>,
    }
}

record! {
    pub struct MetadataU8ArrayValue: "type" = "U8Array" {
        /// The bytes, hex-encoded as a whole rather than element by element.
        value_hex: required String,
    }
}

record! {
    pub struct MetadataU32ArrayValue: "type" = "U32Array" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataU64ArrayValue: "type" = "U64Array" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataI32ArrayValue: "type" = "I32Array" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataI64ArrayValue: "type" = "I64Array" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataDecimalArrayValue: "type" = "DecimalArray" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataGlobalAddressArrayValue: "type" = "GlobalAddressArray" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataPublicKeyArrayValue: "type" = "PublicKeyArray" {
        values: required Vec<PublicKey>,
    }
}

record! {
    /// Element of [`MetadataNonFungibleGlobalIdArrayValue`].
    pub struct NonFungibleGlobalId {
        resource_address: required String,
        non_fungible_id: required String,
    }
}

record! {
    pub struct MetadataNonFungibleGlobalIdArrayValue: "type" = "NonFungibleGlobalIdArray" {
        values: required Vec<NonFungibleGlobalId>,
    }
}

record! {
    pub struct MetadataNonFungibleLocalIdArrayValue: "type" = "NonFungibleLocalIdArray" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataInstantArrayValue: "type" = "InstantArray" {
        values: required Vec<String>,
        /// Parallel to `values`.
        unix_timestamp_seconds: required Vec<String>,
    }
}

record! {
    pub struct MetadataUrlArrayValue: "type" = "UrlArray" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataOriginArrayValue: "type" = "OriginArray" {
        values: required Vec<String>,
    }
}

record! {
    pub struct MetadataPublicKeyHashArrayValue: "type" = "PublicKeyHashArray" {
        values: required Vec<PublicKeyHash>,
    }
}

tagged_union! {
    /// A metadata entry's value, decoded according to its `type`.
    pub enum MetadataTypedValue {
        discriminator = "type",
        kind = MetadataValueType,
        type_name_aliases = true,
        variants = {
            String(MetadataStringValue),
            Bool(MetadataBoolValue),
            U8(MetadataU8Value),
            U32(MetadataU32Value),
            U64(MetadataU64Value),
            I32(MetadataI32Value),
            I64(MetadataI64Value),
            Decimal(MetadataDecimalValue),
            GlobalAddress(MetadataGlobalAddressValue),
            PublicKey(MetadataPublicKeyValue),
            NonFungibleGlobalId(MetadataNonFungibleGlobalIdValue),
            NonFungibleLocalId(MetadataNonFungibleLocalIdValue),
            Instant(MetadataInstantValue),
            Url(MetadataUrlValue),
            Origin(MetadataOriginValue),
            PublicKeyHash(MetadataPublicKeyHashValue),
            StringArray(MetadataStringArrayValue),
            BoolArray(MetadataBoolArrayValue),
            U8Array(MetadataU8ArrayValue),
            U32Array(MetadataU32ArrayValue),
            U64Array(MetadataU64ArrayValue),
            I32Array(MetadataI32ArrayValue),
            I64Array(MetadataI64ArrayValue),
            DecimalArray(MetadataDecimalArrayValue),
            GlobalAddressArray(MetadataGlobalAddressArrayValue),
            PublicKeyArray(MetadataPublicKeyArrayValue),
            NonFungibleGlobalIdArray(MetadataNonFungibleGlobalIdArrayValue),
            NonFungibleLocalIdArray(MetadataNonFungibleLocalIdArrayValue),
            InstantArray(MetadataInstantArrayValue),
            UrlArray(MetadataUrlArrayValue),
            OriginArray(MetadataOriginArrayValue),
            PublicKeyHashArray(MetadataPublicKeyHashArrayValue),
        }
    }
}

fn check_each<F>(field: &str, values: &[String], check: F) -> Vec<Violation>
where
    F: Fn(&str, &str) -> Option<Violation>,
{
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| check(&indexed(field, index), value))
        .collect()
}

fn check_number<T: std::str::FromStr>(
    label: &'static str,
) -> impl Fn(&str, &str) -> Option<Violation> {
    move |field: &str, value: &str| check_parse::<T>(field, value, label)
}

fn check_instant(value: &str, unix_timestamp_seconds: &str, prefix: &str) -> Vec<Violation> {
    let value_field = format!("value{prefix}");
    let seconds_field = format!("unix_timestamp_seconds{prefix}");
    check_parse::<DateTime<FixedOffset>>(&value_field, value, "RFC 3339 timestamp")
        .into_iter()
        .chain(check_parse::<i64>(&seconds_field, unix_timestamp_seconds, "i64"))
        .collect()
}

impl Validate for MetadataTypedValue {
    fn validate(&self) -> Vec<Violation> {
        match self {
            Self::U8(v) => check_parse::<u8>("value", v.value(), "u8").into_iter().collect(),
            Self::U32(v) => check_parse::<u32>("value", v.value(), "u32").into_iter().collect(),
            Self::U64(v) => check_parse::<u64>("value", v.value(), "u64").into_iter().collect(),
            Self::I32(v) => check_parse::<i32>("value", v.value(), "i32").into_iter().collect(),
            Self::I64(v) => check_parse::<i64>("value", v.value(), "i64").into_iter().collect(),
            Self::Decimal(v) => check_decimal("value", v.value()).into_iter().collect(),
            Self::PublicKey(v) => nested("value", v.value()),
            Self::PublicKeyHash(v) => nested("value", v.value()),
            Self::Instant(v) => check_instant(v.value(), v.unix_timestamp_seconds(), ""),
            Self::U8Array(v) => check_hex("value_hex", v.value_hex(), None).into_iter().collect(),
            Self::U32Array(v) => check_each("values", v.values(), check_number::<u32>("u32")),
            Self::U64Array(v) => check_each("values", v.values(), check_number::<u64>("u64")),
            Self::I32Array(v) => check_each("values", v.values(), check_number::<i32>("i32")),
            Self::I64Array(v) => check_each("values", v.values(), check_number::<i64>("i64")),
            Self::DecimalArray(v) => check_each("values", v.values(), check_decimal),
            Self::PublicKeyArray(v) => nested_each("values", v.values()),
            Self::PublicKeyHashArray(v) => nested_each("values", v.values()),
            Self::InstantArray(v) => {
                let (values, seconds) = (v.values(), v.unix_timestamp_seconds());
                if values.len() != seconds.len() {
                    return vec![Violation::new(
                        "unix_timestamp_seconds",
                        format!(
                            "has {} entries but values has {}",
                            seconds.len(),
                            values.len()
                        ),
                    )];
                }
                values
                    .iter()
                    .zip(seconds)
                    .enumerate()
                    .flat_map(|(index, (value, seconds))| {
                        check_instant(value, seconds, &format!("[{index}]"))
                    })
                    .collect()
            },
            Self::String(_) |
            Self::Bool(_) |
            Self::GlobalAddress(_) |
            Self::NonFungibleGlobalId(_) |
            Self::NonFungibleLocalId(_) |
            Self::Url(_) |
            Self::Origin(_) |
            Self::StringArray(_) |
            Self::BoolArray(_) |
            Self::GlobalAddressArray(_) |
            Self::NonFungibleGlobalIdArray(_) |
            Self::NonFungibleLocalIdArray(_) |
            Self::UrlArray(_) |
            Self::OriginArray(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::public_key::{PublicKeyEcdsaSecp256k1, PublicKeyEddsaEd25519};
    use gateway_codec::{
        structural_hash, CodecConfig, CodecError, Decode, Encode, TaggedValue,
    };
    use serde_json::{json, Value};

    fn sample(kind: MetadataValueType) -> Value {
        let key = json!({ "key_type": "EcdsaSecp256k1", "key_hex": "02".repeat(33) });
        let hash = json!({ "key_hash_type": "EddsaEd25519", "hash_hex": "ab".repeat(29) });
        let global_id = json!({ "resource_address": "resource_rdx1t4", "non_fungible_id": "#1#" });
        let body = match kind {
            MetadataValueType::Bool => json!({ "value": true }),
            MetadataValueType::PublicKey => json!({ "value": key }),
            MetadataValueType::PublicKeyHash => json!({ "value": hash }),
            MetadataValueType::NonFungibleGlobalId => global_id,
            MetadataValueType::Instant => {
                json!({ "value": "2023-01-01T00:00:00Z", "unix_timestamp_seconds": "1672531200" })
            },
            MetadataValueType::BoolArray => json!({ "values": [true, false] }),
            MetadataValueType::U8Array => json!({ "value_hex": "00ff" }),
            MetadataValueType::PublicKeyArray => json!({ "values": [key] }),
            MetadataValueType::PublicKeyHashArray => json!({ "values": [hash] }),
            MetadataValueType::NonFungibleGlobalIdArray => json!({ "values": [global_id] }),
            MetadataValueType::InstantArray => json!({
                "values": ["2023-01-01T00:00:00Z"],
                "unix_timestamp_seconds": ["1672531200"],
            }),
            kind if kind.as_str().ends_with("Array") => json!({ "values": ["1", "2"] }),
            _ => json!({ "value": "1" }),
        };
        let mut doc = json!({ "type": kind.as_str() });
        if let (Value::Object(doc), Value::Object(body)) = (&mut doc, body) {
            doc.extend(body);
        }
        doc
    }

    #[test]
    fn u32_round_trip() {
        let wire = json!({ "type": "U32", "value": "42" });
        let value = MetadataTypedValue::decode_value(&wire).unwrap();
        assert_eq!(value.tag(), MetadataValueType::U32);
        match &value {
            MetadataTypedValue::U32(inner) => assert_eq!(inner.value(), "42"),
            other => panic!("unexpected variant {other:?}"),
        }
        assert_eq!(value.to_value(), wire);
    }

    #[test]
    fn every_registered_tag_round_trips() {
        let registry = MetadataTypedValue::registry();
        assert_eq!(registry.variants().len(), MetadataValueType::ALL.len());
        for &kind in MetadataValueType::ALL {
            let wire = sample(kind);
            let value = MetadataTypedValue::decode_value(&wire)
                .unwrap_or_else(|error| panic!("{kind}: {error}"));
            assert_eq!(value.kind(), kind);
            assert_eq!(value.to_value(), wire, "{kind}");
            assert_eq!(MetadataTypedValue::decode(&value.encode()), Ok(value.clone()));
            assert!(value.validate().is_empty(), "{kind}: {:?}", value.validate());
        }
    }

    #[test]
    fn payload_type_names_are_aliases() {
        let value =
            MetadataTypedValue::decode_value(&json!({ "type": "MetadataU32Value", "value": "7" }))
                .unwrap();
        assert_eq!(value.kind(), MetadataValueType::U32);
        assert_eq!(value.to_value(), json!({ "type": "U32", "value": "7" }));

        let strict = CodecConfig::new().with_type_name_aliases(false);
        assert!(MetadataTypedValue::decode_value_with(
            &json!({ "type": "MetadataU32Value", "value": "7" }),
            &strict
        )
        .is_err());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            MetadataTypedValue::decode_value(&json!({ "type": "TotallyUnknownTag", "value": "x" })),
            Err(CodecError::UnknownVariant {
                family: "MetadataTypedValue",
                tag: "TotallyUnknownTag".into()
            })
        );
    }

    #[test]
    fn missing_value_names_the_variant() {
        assert_eq!(
            MetadataTypedValue::decode_value(&json!({ "type": "U32" })),
            Err(CodecError::MissingRequiredField { field: "value", variant: "MetadataU32Value" })
        );
        assert_eq!(
            MetadataTypedValue::decode_value(&json!({ "type": "BoolArray", "values": null })),
            Err(CodecError::MissingRequiredField {
                field: "values",
                variant: "MetadataBoolArrayValue"
            })
        );
    }

    #[test]
    fn nested_key_errors_pass_through() {
        let error = MetadataTypedValue::decode_value(&json!({
            "type": "PublicKey",
            "value": { "key_type": "EcdsaSecp256k1" },
        }))
        .unwrap_err();
        assert_eq!(
            error,
            CodecError::MissingRequiredField { field: "key_hex", variant: "PublicKeyEcdsaSecp256k1" }
        );
    }

    #[test]
    fn empty_public_key_arrays_are_equal() {
        let a = MetadataTypedValue::from(MetadataPublicKeyArrayValue::new(Vec::new()));
        let b = MetadataTypedValue::decode_value(&json!({ "type": "PublicKeyArray", "values": [] }))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(structural_hash(&a), structural_hash(&b));
    }

    #[test]
    fn variants_with_same_fields_differ() {
        let string = MetadataTypedValue::from(MetadataStringValue::new("1".into()));
        let url = MetadataTypedValue::from(MetadataUrlValue::new("1".into()));
        assert_ne!(string, url);
    }

    #[test]
    fn validates_numeric_strings() {
        let value = MetadataTypedValue::from(MetadataU8Value::new("256".into()));
        assert_eq!(value.validate(), vec![Violation::new("value", "`256` is not a valid u8")]);

        let values = MetadataTypedValue::from(MetadataI32ArrayValue::new(vec![
            "-1".into(),
            "x".into(),
        ]));
        let violations = values.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "values[1]");
    }

    #[test]
    fn validates_nested_keys_with_paths() {
        let value = MetadataTypedValue::from(MetadataPublicKeyArrayValue::new(vec![
            PublicKey::from(PublicKeyEcdsaSecp256k1::new("02".repeat(33))),
            PublicKey::from(PublicKeyEddsaEd25519::new("zz".into())),
        ]));
        let violations = value.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "values[1].key_hex");
    }

    #[test]
    fn instant_arrays_must_be_parallel() {
        let value = MetadataTypedValue::from(MetadataInstantArrayValue::new(
            vec!["2023-01-01T00:00:00Z".into()],
            Vec::new(),
        ));
        assert_eq!(value.validate()[0].field, "unix_timestamp_seconds");

        let bad_seconds = MetadataTypedValue::from(MetadataInstantArrayValue::new(
            vec!["2023-01-01T00:00:00Z".into()],
            vec!["soon".into()],
        ));
        assert_eq!(bad_seconds.validate()[0].field, "unix_timestamp_seconds[0]");
    }
}
