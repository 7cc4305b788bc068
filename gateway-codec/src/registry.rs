use serde_json::Value;

use crate::{
    error::LogErrorExt, CodecConfig, CodecError, Decode, Document, Fields, TaggedValue,
    UnknownVariantPolicy, VariantRecord,
};

type DecodeFn<T> = fn(&Fields<'_>) -> Result<T, CodecError>;

/// One row of a [`Registry`]: a discriminator value and how to read its payload.
pub struct Variant<T: 'static> {
    tag: &'static str,
    name: &'static str,
    decode: DecodeFn<T>,
}

fn decode_into<V, T>(fields: &Fields<'_>) -> Result<T, CodecError>
where
    V: VariantRecord,
    T: From<V>,
{
    V::read(fields).map(T::from)
}

impl<T: 'static> Variant<T> {
    /// Row for the variant record `V`, wrapped into the family `T`.
    #[must_use]
    pub const fn of<V>() -> Self
    where
        V: VariantRecord,
        T: From<V>,
    {
        Self { tag: V::TAG, name: V::NAME, decode: decode_into::<V, T> }
    }

    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Name of the payload type, accepted as an alias tag when enabled.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Static table mapping discriminator values to variants of one family.
pub struct Registry<T: 'static> {
    family: &'static str,
    discriminator: &'static str,
    type_name_aliases: bool,
    variants: &'static [Variant<T>],
}

impl<T: 'static> Registry<T> {
    #[must_use]
    pub const fn new(
        family: &'static str,
        discriminator: &'static str,
        type_name_aliases: bool,
        variants: &'static [Variant<T>],
    ) -> Self {
        Self { family, discriminator, type_name_aliases, variants }
    }

    #[must_use]
    pub const fn family(&self) -> &'static str {
        self.family
    }

    #[must_use]
    pub const fn discriminator(&self) -> &'static str {
        self.discriminator
    }

    #[must_use]
    pub const fn variants(&self) -> &'static [Variant<T>] {
        self.variants
    }

    /// Canonical tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> {
        self.variants.iter().map(Variant::tag)
    }

    /// Look up a canonical tag.
    #[must_use]
    pub fn lookup(&self, tag: &str) -> Option<&'static Variant<T>> {
        self.variants.iter().find(|variant| variant.tag == tag)
    }

    /// Whether payload type names resolve as tags under `config`.
    #[must_use]
    pub const fn accepts_type_name(&self, config: &CodecConfig) -> bool {
        self.type_name_aliases && config.accept_type_name_aliases
    }

    fn resolve(&self, tag: &str, config: &CodecConfig) -> Option<&'static Variant<T>> {
        self.lookup(tag).or_else(|| {
            if self.accepts_type_name(config) {
                self.variants.iter().find(|variant| variant.name == tag)
            } else {
                None
            }
        })
    }

    /// # Errors
    /// See [`Registry::decode_with`].
    pub fn decode(&self, doc: &Document) -> Result<T, CodecError> {
        self.decode_with(doc, &CodecConfig::default())
    }

    /// Pick the variant named by the discriminator and read its payload.
    ///
    /// # Errors
    /// - [`CodecError::MissingRequiredField`] if the discriminator is absent or `null`
    /// - [`CodecError::UnknownVariant`] if the tag is not registered
    /// - any error raised while reading the variant's fields
    pub fn decode_with(&self, doc: &Document, config: &CodecConfig) -> Result<T, CodecError> {
        let tag = match doc.get(self.discriminator) {
            None | Some(Value::Null) => {
                return Err(CodecError::MissingRequiredField {
                    field: self.discriminator,
                    variant: self.family,
                })
            },
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(CodecError::InvalidField {
                    variant: self.family,
                    field: self.discriminator,
                    reason: format!("expected a string, found {other}"),
                })
            },
        };
        let Some(variant) = self.resolve(tag, config) else {
            tracing::debug!(family = self.family, tag = %tag.truncate(), "unknown discriminator");
            return Err(CodecError::UnknownVariant { family: self.family, tag: tag.to_owned() });
        };
        tracing::trace!(family = self.family, tag = variant.tag, "decoding variant");
        (variant.decode)(&Fields::new(doc, variant.name, config))
    }
}

/// Decode a JSON array of tagged values.
///
/// With [`UnknownVariantPolicy::Skip`], values whose discriminator (or a nested
/// discriminator) is unknown are dropped; every other error still fails the call.
///
/// # Errors
/// The first error that the policy doesn't absorb.
pub fn decode_sequence<T: TaggedValue>(
    values: &[Value],
    config: &CodecConfig,
) -> Result<Vec<T>, CodecError> {
    let mut decoded = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        match <T as Decode>::decode_value_with(value, config) {
            Ok(value) => decoded.push(value),
            Err(error @ CodecError::UnknownVariant { .. })
                if config.unknown_variants == UnknownVariantPolicy::Skip =>
            {
                tracing::warn!(index, error = %error.truncate(), "skipping value of unknown variant");
            },
            Err(error) => return Err(error),
        }
    }
    Ok(decoded)
}
