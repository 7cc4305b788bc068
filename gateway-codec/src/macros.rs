/// Implements [`crate::WireValue`] for a model, so it can be nested in other models.
#[macro_export]
macro_rules! impl_wire_value {
    ($name: ty) => {
        impl $crate::WireValue for $name {
            fn from_wire(
                value: &$crate::ext::serde_json::Value,
                config: &$crate::CodecConfig,
            ) -> Result<Self, $crate::WireError> {
                match value {
                    $crate::ext::serde_json::Value::Object(doc) => {
                        <Self as $crate::Decode>::decode_with(doc, config)
                            .map_err($crate::WireError::Codec)
                    },
                    other => {
                        Err($crate::WireError::invalid(format!("expected an object, found {other}")))
                    },
                }
            }

            fn to_wire(&self) -> $crate::ext::serde_json::Value {
                $crate::ext::serde_json::Value::Object($crate::Encode::encode(self))
            }
        }
    };
}

/// Implements `serde::Serialize` and `serde::Deserialize` by delegating to the codec.
///
/// Deserialization errors carry the [`crate::CodecError`] message.
#[macro_export]
macro_rules! impl_serde_via_codec {
    ($name: ty) => {
        impl $crate::ext::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::ext::serde::Serializer,
            {
                $crate::ext::serde::Serialize::serialize(&$crate::Encode::encode(self), serializer)
            }
        }

        impl<'de> $crate::ext::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::ext::serde::Deserializer<'de>,
            {
                let doc =
                    <$crate::Document as $crate::ext::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::Decode>::decode(&doc)
                    .map_err(<D::Error as $crate::ext::serde::de::Error>::custom)
            }
        }
    };
}

/// Declares an immutable model with a fixed field schema.
///
/// Fields are `required` or `optional`; the JSON key is the field name. Each
/// field gets a getter, and the struct gets a `new` constructor plus
/// `Record`, `Decode`, `Encode`, `WireValue` and serde impls.
///
/// ```ignore
/// record! {
///     pub struct MetadataU32Value: "type" = "U32" {
///         value: required String,
///     }
/// }
/// ```
///
/// Without the `: "key" = "tag"` part the model is a plain record. A tagged
/// record must also be listed in a [`tagged_union!`] family.
#[macro_export]
macro_rules! record {
    (@ty required $ty: ty) => { $ty };
    (@ty optional $ty: ty) => { Option<$ty> };

    (@ref required $ty: ty) => { &$ty };
    (@ref optional $ty: ty) => { Option<&$ty> };

    (@get required $value: expr) => { &$value };
    (@get optional $value: expr) => { $value.as_ref() };

    (@read $fields: ident required $field: ident) => {
        $fields.required(stringify!($field))?
    };
    (@read $fields: ident optional $field: ident) => {
        $fields.optional(stringify!($field))?
    };

    (@write $doc: ident required $field: ident $value: expr) => {
        $doc.field(stringify!($field), $value)
    };
    (@write $doc: ident optional $field: ident $value: expr) => {
        $doc.optional(stringify!($field), ($value).as_ref())
    };

    (@define
        [$(#[$attr: meta])*] $vis: vis $name: ident
        $( [$(#[$fattr: meta])*] $field: ident $kind: ident $ty: ty ),*
    ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        $vis struct $name {
            $( $field: $crate::record!(@ty $kind $ty), )*
        }

        impl $name {
            #[must_use]
            #[allow(clippy::too_many_arguments, clippy::new_without_default)]
            pub const fn new($( $field: $crate::record!(@ty $kind $ty) ),*) -> Self {
                Self { $( $field ),* }
            }

            $(
                $(#[$fattr])*
                #[must_use]
                pub const fn $field(&self) -> $crate::record!(@ref $kind $ty) {
                    $crate::record!(@get $kind self.$field)
                }
            )*
        }

        impl $crate::Record for $name {
            const NAME: &'static str = stringify!($name);

            #[allow(unused_variables)]
            fn read(fields: &$crate::Fields<'_>) -> Result<Self, $crate::CodecError> {
                Ok(Self { $( $field: $crate::record!(@read fields $kind $field), )* })
            }

            fn write(&self, doc: $crate::DocumentBuilder) -> $crate::DocumentBuilder {
                $( let doc = $crate::record!(@write doc $kind $field &self.$field); )*
                doc
            }
        }

        $crate::impl_wire_value!($name);
        $crate::impl_serde_via_codec!($name);
    };

    (
        $(#[$attr: meta])*
        $vis: vis struct $name: ident : $disc: literal = $tag: literal {
            $( $(#[$fattr: meta])* $field: ident : $kind: ident $ty: ty ),* $(,)?
        }
    ) => {
        $crate::record!(@define
            [$(#[$attr])*] $vis $name
            $( [$(#[$fattr])*] $field $kind $ty ),*
        );

        impl $crate::VariantRecord for $name {
            const DISCRIMINATOR: &'static str = $disc;
            const TAG: &'static str = $tag;
        }

        impl $crate::Decode for $name {
            const NAME: &'static str = <Self as $crate::Record>::NAME;

            fn decode_with(
                doc: &$crate::Document,
                config: &$crate::CodecConfig,
            ) -> Result<Self, $crate::CodecError> {
                $crate::decode_variant(doc, config)
            }
        }

        impl $crate::Encode for $name {
            fn encode(&self) -> $crate::Document {
                $crate::encode_variant(self)
            }
        }
    };

    (
        $(#[$attr: meta])*
        $vis: vis struct $name: ident {
            $( $(#[$fattr: meta])* $field: ident : $kind: ident $ty: ty ),* $(,)?
        }
    ) => {
        $crate::record!(@define
            [$(#[$attr])*] $vis $name
            $( [$(#[$fattr])*] $field $kind $ty ),*
        );

        impl $crate::Decode for $name {
            const NAME: &'static str = <Self as $crate::Record>::NAME;

            fn decode_with(
                doc: &$crate::Document,
                config: &$crate::CodecConfig,
            ) -> Result<Self, $crate::CodecError> {
                $crate::decode_record(doc, config)
            }
        }

        impl $crate::Encode for $name {
            fn encode(&self) -> $crate::Document {
                $crate::encode_record(self)
            }
        }
    };
}

/// Declares a tagged family: the enumerated discriminator, the family enum with
/// one variant per payload record, and its static registry.
///
/// ```ignore
/// tagged_union! {
///     pub enum PublicKey {
///         discriminator = "key_type",
///         kind = PublicKeyType,
///         type_name_aliases = false,
///         variants = {
///             EcdsaSecp256k1(PublicKeyEcdsaSecp256k1),
///             EddsaEd25519(PublicKeyEddsaEd25519),
///         }
///     }
/// }
/// ```
///
/// Payload records must be declared with `record!` using the same discriminator key.
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$attr: meta])*
        $vis: vis enum $name: ident {
            discriminator = $disc: literal,
            kind = $kind: ident,
            type_name_aliases = $aliases: literal,
            variants = {
                $( $(#[$vattr: meta])* $variant: ident ( $payload: ty ) ),+ $(,)?
            } $(,)?
        }
    ) => {
        #[doc = concat!("Discriminator values of [`", stringify!($name), "`].")]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $kind {
            $( $variant ),+
        }

        impl $kind {
            /// Every discriminator value, in registration order.
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => <$payload as $crate::VariantRecord>::TAG ),+
                }
            }
        }

        impl ::core::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $kind {
            type Err = $crate::CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL.iter().copied().find(|kind| kind.as_str() == s).ok_or_else(|| {
                    $crate::CodecError::UnknownVariant { family: stringify!($name), tag: s.to_owned() }
                })
            }
        }

        impl $crate::WireValue for $kind {
            fn from_wire(
                value: &$crate::ext::serde_json::Value,
                _config: &$crate::CodecConfig,
            ) -> Result<Self, $crate::WireError> {
                match value {
                    $crate::ext::serde_json::Value::String(tag) => {
                        tag.parse().map_err($crate::WireError::invalid)
                    },
                    other => Err($crate::WireError::invalid(format!("expected a string, found {other}"))),
                }
            }

            fn to_wire(&self) -> $crate::ext::serde_json::Value {
                $crate::ext::serde_json::Value::String(self.as_str().to_owned())
            }
        }

        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vattr])* $variant($payload) ),+
        }

        impl $name {
            #[must_use]
            pub const fn kind(&self) -> $kind {
                match self {
                    $( Self::$variant(_) => $kind::$variant ),+
                }
            }
        }

        $(
            impl From<$payload> for $name {
                fn from(value: $payload) -> Self {
                    Self::$variant(value)
                }
            }

            impl $crate::FamilyVariant for $payload {
                type Family = $name;
            }
        )+

        impl $crate::TaggedValue for $name {
            type Tag = $kind;

            fn registry() -> &'static $crate::Registry<Self> {
                static REGISTRY: $crate::Registry<$name> = $crate::Registry::new(
                    stringify!($name),
                    $disc,
                    $aliases,
                    &[$( $crate::Variant::of::<$payload>() ),+],
                );
                &REGISTRY
            }

            fn tag(&self) -> $kind {
                self.kind()
            }

            fn tag_str(&self) -> &'static str {
                self.kind().as_str()
            }
        }

        impl $crate::Decode for $name {
            const NAME: &'static str = stringify!($name);

            fn decode_with(
                doc: &$crate::Document,
                config: &$crate::CodecConfig,
            ) -> Result<Self, $crate::CodecError> {
                <Self as $crate::TaggedValue>::registry().decode_with(doc, config)
            }
        }

        impl $crate::Encode for $name {
            fn encode(&self) -> $crate::Document {
                match self {
                    $( Self::$variant(value) => $crate::encode_variant(value) ),+
                }
            }
        }

        $crate::impl_wire_value!($name);
        $crate::impl_serde_via_codec!($name);
    };
}

#[cfg(test)]
mod tests {
    use crate::{
        decode_sequence, CodecConfig, CodecError, Decode, Encode, TaggedValue,
        UnknownVariantPolicy,
    };
    use serde_json::json;

    crate::record! {
        pub struct ShapeCircle: "shape" = "Circle" {
            radius: required u32,
        }
    }

    crate::record! {
        pub struct ShapeLabel: "shape" = "Label" {
            text: required String,
            note: optional String,
        }
    }

    crate::tagged_union! {
        pub enum Shape {
            discriminator = "shape",
            kind = ShapeKind,
            type_name_aliases = true,
            variants = {
                Circle(ShapeCircle),
                Label(ShapeLabel),
            }
        }
    }

    crate::record! {
        pub struct SwitchOn: "state" = "On" {}
    }

    crate::record! {
        pub struct SwitchOff: "state" = "Off" {}
    }

    crate::tagged_union! {
        pub enum Switch {
            discriminator = "state",
            kind = SwitchState,
            type_name_aliases = false,
            variants = {
                On(SwitchOn),
                Off(SwitchOff),
            }
        }
    }

    #[test]
    fn decodes_through_the_registry() {
        let shape = Shape::decode_value(&json!({ "shape": "Circle", "radius": 3 })).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Circle);
        assert_eq!(shape, Shape::Circle(ShapeCircle::new(3)));
        assert_eq!(shape.tag_str(), "Circle");
    }

    #[test]
    fn encodes_tag_first_and_skips_absent_optionals() {
        let label = Shape::from(ShapeLabel::new("hi".into(), None));
        let doc = label.encode();
        let keys = doc.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, ["shape", "text"]);
        assert_eq!(Shape::decode(&doc), Ok(label));
    }

    #[test]
    fn type_names_are_aliases_unless_disabled() {
        let doc = json!({ "shape": "ShapeCircle", "radius": 1 });
        assert_eq!(Shape::decode_value(&doc), Ok(Shape::Circle(ShapeCircle::new(1))));

        let strict = CodecConfig::new().with_type_name_aliases(false);
        assert_eq!(
            Shape::decode_value_with(&doc, &strict),
            Err(CodecError::UnknownVariant { family: "Shape", tag: "ShapeCircle".into() })
        );
    }

    #[test]
    fn missing_discriminator_is_a_missing_field() {
        assert_eq!(
            Shape::decode_value(&json!({ "radius": 1 })),
            Err(CodecError::MissingRequiredField { field: "shape", variant: "Shape" })
        );
        assert_eq!(
            Shape::decode_value(&json!(["Circle"])),
            Err(CodecError::NotAnObject { variant: "Shape" })
        );
    }

    #[test]
    fn concrete_variant_rejects_foreign_tag() {
        assert_eq!(
            ShapeCircle::decode_value(&json!({ "shape": "Label", "radius": 1 })),
            Err(CodecError::DiscriminatorMismatch {
                variant: "ShapeCircle",
                expected: "Circle",
                found: "Label".into(),
            })
        );
        assert_eq!(ShapeCircle::decode_value(&json!({ "radius": 1 })), Ok(ShapeCircle::new(1)));
    }

    #[test]
    fn concrete_variant_follows_family_alias_rule() {
        let doc = json!({ "shape": "ShapeCircle", "radius": 2 });
        assert_eq!(ShapeCircle::decode_value(&doc), Ok(ShapeCircle::new(2)));
        let strict = CodecConfig::new().with_type_name_aliases(false);
        assert!(matches!(
            ShapeCircle::decode_value_with(&doc, &strict),
            Err(CodecError::DiscriminatorMismatch { .. })
        ));

        let doc = json!({ "state": "SwitchOn" });
        assert_eq!(
            Switch::decode_value(&doc),
            Err(CodecError::UnknownVariant { family: "Switch", tag: "SwitchOn".into() })
        );
        assert_eq!(
            SwitchOn::decode_value(&doc),
            Err(CodecError::DiscriminatorMismatch {
                variant: "SwitchOn",
                expected: "On",
                found: "SwitchOn".into(),
            })
        );
        assert_eq!(SwitchOn::decode_value(&json!({ "state": "On" })), Ok(SwitchOn::new()));
        assert_eq!(Switch::from(SwitchOff::new()).kind(), SwitchState::Off);
    }

    #[test]
    fn kinds_parse_and_print() {
        assert_eq!("Label".parse::<ShapeKind>(), Ok(ShapeKind::Label));
        assert!("Square".parse::<ShapeKind>().is_err());
        assert_eq!(ShapeKind::ALL.len(), Shape::registry().variants().len());
        for kind in ShapeKind::ALL {
            assert_eq!(Shape::registry().lookup(kind.as_str()).map(|v| v.tag()), Some(kind.as_str()));
        }
    }

    #[test]
    fn sequences_skip_unknown_variants_on_request() {
        let values = [
            json!({ "shape": "Circle", "radius": 1 }),
            json!({ "shape": "Hexagon" }),
            json!({ "shape": "Label", "text": "x" }),
        ];
        let lenient = CodecConfig::new().with_unknown_variants(UnknownVariantPolicy::Skip);
        let shapes = decode_sequence::<Shape>(&values, &lenient).unwrap();
        assert_eq!(
            shapes.iter().map(Shape::kind).collect::<Vec<_>>(),
            [ShapeKind::Circle, ShapeKind::Label]
        );
        assert!(matches!(
            decode_sequence::<Shape>(&values, &CodecConfig::default()),
            Err(CodecError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn serde_goes_through_the_codec() {
        let shape: Shape = serde_json::from_str(r#"{"shape":"Label","text":"a","note":"b"}"#).unwrap();
        assert_eq!(serde_json::to_string(&shape).unwrap(), r#"{"shape":"Label","text":"a","note":"b"}"#);
        let error = serde_json::from_str::<Shape>(r#"{"shape":"Label"}"#).unwrap_err();
        assert!(error.to_string().contains("text is a required property for ShapeLabel"));
    }
}
