//! Programmatic JSON rendering of SBOR values, discriminated by `kind`.
//!
//! Composite kinds nest further values, so a decoded value is a tree.
use gateway_codec::{
    check_decimal, check_hex, check_parse, indexed, nested, nested_each, record, tagged_union,
    Validate, Violation,
};

/// Declares a variant carrying the optional `type_name` and `field_name`
/// shared by every SBOR value, ahead of its own fields.
macro_rules! sbor_value {
    ($(#[$attr: meta])* $name: ident = $tag: literal { $($fields: tt)* }) => {
        record! {
            $(#[$attr])*
            pub struct $name: "kind" = $tag {
                type_name: optional String,
                /// Name of the field this value is stored in, for values inside named tuples.
                field_name: optional String,
                $($fields)*
            }
        }
    };
}

sbor_value!(ProgrammaticScryptoSborValueBool = "Bool" { value: required bool });
sbor_value!(ProgrammaticScryptoSborValueI8 = "I8" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueI16 = "I16" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueI32 = "I32" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueI64 = "I64" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueI128 = "I128" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueU8 = "U8" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueU16 = "U16" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueU32 = "U32" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueU64 = "U64" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueU128 = "U128" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueString = "String" { value: required String });

sbor_value! {
    /// `Enum` whose fields are kept as nested values.
    ProgrammaticScryptoSborValueEnum = "Enum" {
        /// Discriminator of the enum variant, a `u8` rendered as a string.
        variant_id: required String,
        variant_name: optional String,
        fields: required Vec<ProgrammaticScryptoSborValue>,
    }
}

sbor_value! {
    ProgrammaticScryptoSborValueArray = "Array" {
        element_kind: required ProgrammaticScryptoSborValueKind,
        element_type_name: optional String,
        elements: required Vec<ProgrammaticScryptoSborValue>,
    }
}

sbor_value! {
    /// Byte arrays are rendered as one hex string instead of an `Array` of `U8`.
    ProgrammaticScryptoSborValueBytes = "Bytes" {
        element_kind: required ProgrammaticScryptoSborValueKind,
        element_type_name: optional String,
        hex: required String,
    }
}

sbor_value! {
    ProgrammaticScryptoSborValueMap = "Map" {
        key_kind: required ProgrammaticScryptoSborValueKind,
        key_type_name: optional String,
        value_kind: required ProgrammaticScryptoSborValueKind,
        value_type_name: optional String,
        entries: required Vec<ProgrammaticScryptoSborValueMapEntry>,
    }
}

sbor_value! {
    ProgrammaticScryptoSborValueTuple = "Tuple" {
        fields: required Vec<ProgrammaticScryptoSborValue>,
    }
}

sbor_value!(ProgrammaticScryptoSborValueReference = "Reference" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueOwn = "Own" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueDecimal = "Decimal" { value: required String });
sbor_value!(ProgrammaticScryptoSborValuePreciseDecimal = "PreciseDecimal" { value: required String });
sbor_value!(ProgrammaticScryptoSborValueNonFungibleLocalId = "NonFungibleLocalId" { value: required String });

record! {
    pub struct ProgrammaticScryptoSborValueMapEntry {
        key: required ProgrammaticScryptoSborValue,
        value: required ProgrammaticScryptoSborValue,
    }
}

tagged_union! {
    /// A single SBOR value.
    pub enum ProgrammaticScryptoSborValue {
        discriminator = "kind",
        kind = ProgrammaticScryptoSborValueKind,
        type_name_aliases = true,
        variants = {
            Bool(ProgrammaticScryptoSborValueBool),
            I8(ProgrammaticScryptoSborValueI8),
            I16(ProgrammaticScryptoSborValueI16),
            I32(ProgrammaticScryptoSborValueI32),
            I64(ProgrammaticScryptoSborValueI64),
            I128(ProgrammaticScryptoSborValueI128),
            U8(ProgrammaticScryptoSborValueU8),
            U16(ProgrammaticScryptoSborValueU16),
            U32(ProgrammaticScryptoSborValueU32),
            U64(ProgrammaticScryptoSborValueU64),
            U128(ProgrammaticScryptoSborValueU128),
            String(ProgrammaticScryptoSborValueString),
            Enum(ProgrammaticScryptoSborValueEnum),
            Array(ProgrammaticScryptoSborValueArray),
            Bytes(ProgrammaticScryptoSborValueBytes),
            Map(ProgrammaticScryptoSborValueMap),
            Tuple(ProgrammaticScryptoSborValueTuple),
            Reference(ProgrammaticScryptoSborValueReference),
            Own(ProgrammaticScryptoSborValueOwn),
            Decimal(ProgrammaticScryptoSborValueDecimal),
            PreciseDecimal(ProgrammaticScryptoSborValuePreciseDecimal),
            NonFungibleLocalId(ProgrammaticScryptoSborValueNonFungibleLocalId),
        }
    }
}

macro_rules! common_names {
    ($value: expr; $($variant: ident),+ $(,)?) => {
        match $value {
            $( ProgrammaticScryptoSborValue::$variant(inner) => (inner.type_name(), inner.field_name()), )+
        }
    };
}

impl ProgrammaticScryptoSborValue {
    fn names(&self) -> (Option<&String>, Option<&String>) {
        common_names!(self;
            Bool, I8, I16, I32, I64, I128, U8, U16, U32, U64, U128, String, Enum, Array, Bytes,
            Map, Tuple, Reference, Own, Decimal, PreciseDecimal, NonFungibleLocalId,
        )
    }

    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.names().0.map(String::as_str)
    }

    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.names().1.map(String::as_str)
    }
}

fn kind_matches(
    field: &str,
    value: &ProgrammaticScryptoSborValue,
    expected: ProgrammaticScryptoSborValueKind,
) -> Option<Violation> {
    (value.kind() != expected).then(|| {
        Violation::new(format!("{field}.kind"), format!("expected {expected}, found {}", value.kind()))
    })
}

impl Validate for ProgrammaticScryptoSborValueMapEntry {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = nested("key", self.key());
        violations.extend(nested("value", self.value()));
        violations
    }
}

impl Validate for ProgrammaticScryptoSborValue {
    fn validate(&self) -> Vec<Violation> {
        match self {
            Self::I8(v) => check_parse::<i8>("value", v.value(), "i8").into_iter().collect(),
            Self::I16(v) => check_parse::<i16>("value", v.value(), "i16").into_iter().collect(),
            Self::I32(v) => check_parse::<i32>("value", v.value(), "i32").into_iter().collect(),
            Self::I64(v) => check_parse::<i64>("value", v.value(), "i64").into_iter().collect(),
            Self::I128(v) => check_parse::<i128>("value", v.value(), "i128").into_iter().collect(),
            Self::U8(v) => check_parse::<u8>("value", v.value(), "u8").into_iter().collect(),
            Self::U16(v) => check_parse::<u16>("value", v.value(), "u16").into_iter().collect(),
            Self::U32(v) => check_parse::<u32>("value", v.value(), "u32").into_iter().collect(),
            Self::U64(v) => check_parse::<u64>("value", v.value(), "u64").into_iter().collect(),
            Self::U128(v) => check_parse::<u128>("value", v.value(), "u128").into_iter().collect(),
            Self::Decimal(v) => check_decimal("value", v.value()).into_iter().collect(),
            Self::PreciseDecimal(v) => check_decimal("value", v.value()).into_iter().collect(),
            Self::Bytes(v) => check_hex("hex", v.hex(), None).into_iter().collect(),
            Self::Enum(v) => check_parse::<u8>("variant_id", v.variant_id(), "u8")
                .into_iter()
                .chain(nested_each("fields", v.fields()))
                .collect(),
            Self::Tuple(v) => nested_each("fields", v.fields()),
            Self::Array(v) => {
                let mut violations = nested_each("elements", v.elements());
                violations.extend(v.elements().iter().enumerate().filter_map(|(index, element)| {
                    kind_matches(&indexed("elements", index), element, *v.element_kind())
                }));
                violations
            },
            Self::Map(v) => {
                let mut violations = nested_each("entries", v.entries());
                for (index, entry) in v.entries().iter().enumerate() {
                    let entry_field = indexed("entries", index);
                    violations.extend(kind_matches(
                        &format!("{entry_field}.key"),
                        entry.key(),
                        *v.key_kind(),
                    ));
                    violations.extend(kind_matches(
                        &format!("{entry_field}.value"),
                        entry.value(),
                        *v.value_kind(),
                    ));
                }
                violations
            },
            Self::Bool(_) |
            Self::String(_) |
            Self::Reference(_) |
            Self::Own(_) |
            Self::NonFungibleLocalId(_) => Vec::new(),
        }
    }
}
