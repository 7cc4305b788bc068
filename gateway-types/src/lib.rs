//! Gateway API models.
//!
//! Every model decodes from and encodes to the gateway's JSON wire format
//! through [`gateway_codec`], and implements `serde` traits on top of it.
mod entity_metadata;
mod ledger_state;
mod metadata;
mod native_resource;
mod public_key;
mod sbor;
mod transaction_options;

pub use entity_metadata::EntityMetadataItemValue;
pub use ledger_state::{
    LedgerState, LedgerStateResolution, LedgerStateSelector, PartialLedgerStateIdentifier,
};
pub use metadata::*;
pub use native_resource::*;
pub use public_key::*;
pub use sbor::*;
pub use transaction_options::{PreviewFlags, TransactionDetailsOptIns};

pub use gateway_codec::{
    decode_sequence, structural_hash, validate, CodecConfig, CodecError, Decode, Encode, JsonObject,
    JsonValue, TaggedValue, UnknownVariantPolicy, Validate, Violation,
};
