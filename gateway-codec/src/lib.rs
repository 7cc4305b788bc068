//! Tagged value codec for the gateway API models.
//!
//! Models are declared with [`record!`] and grouped into discriminated families
//! with [`tagged_union!`]. Each family owns a static [`Registry`] mapping
//! discriminator values to variants. Decoding reads a JSON object through
//! [`Fields`], encoding writes the discriminator first and then every field
//! in declaration order.
mod codec;
mod config;
mod document;
mod error;
mod hash;
mod json;
mod macros;
mod registry;
mod validate;
mod wire;

pub use codec::{
    decode_record, decode_variant, encode_record, encode_variant, Decode, Encode, FamilyVariant,
    Record, TaggedValue, VariantRecord,
};
pub use config::{env_vars, CodecConfig, UnknownVariantPolicy};
pub use document::{Document, DocumentBuilder, Fields};
pub use error::{CodecError, LogErrorExt, SafeLogError, LOG_MESSAGE_LIMIT};
pub use hash::{structural_hash, BuildSeededHasher, SeededHasher};
pub use json::{JsonObject, JsonValue};
pub use registry::{decode_sequence, Registry, Variant};
pub use validate::{
    check_decimal, check_hex, check_parse, indexed, nested, nested_each, validate, Validate,
    Violation,
};
pub use wire::{WireError, WireValue};

/// Re-exports used by the declaration macros.
pub mod ext {
    pub use serde;
    pub use serde_json;
}
