//! Boolean option sets sent along with transaction requests.
use gateway_codec::{
    decode_record, encode_record, impl_serde_via_codec, impl_wire_value, CodecConfig, CodecError,
    Decode, Document, DocumentBuilder, Encode, Fields, Record,
};

/// Declares a record of boolean flags. Absent flags take their default on
/// decode, and every flag is written on encode.
macro_rules! flag_record {
    (
        $(#[$attr: meta])*
        pub struct $name: ident {
            $( $(#[$fattr: meta])* $field: ident / $setter: ident = $default: literal ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            $( $field: bool, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: $default, )* }
            }
        }

        impl $name {
            $(
                $(#[$fattr])*
                #[must_use]
                pub const fn $field(&self) -> bool {
                    self.$field
                }

                #[must_use]
                pub const fn $setter(mut self, $field: bool) -> Self {
                    self.$field = $field;
                    self
                }
            )*
        }

        impl Record for $name {
            const NAME: &'static str = stringify!($name);

            fn read(fields: &Fields<'_>) -> Result<Self, CodecError> {
                Ok(Self { $( $field: fields.or_default(stringify!($field), $default)?, )* })
            }

            fn write(&self, doc: DocumentBuilder) -> DocumentBuilder {
                doc $( .field(stringify!($field), &self.$field) )*
            }
        }

        impl Decode for $name {
            const NAME: &'static str = <Self as Record>::NAME;

            fn decode_with(doc: &Document, config: &CodecConfig) -> Result<Self, CodecError> {
                decode_record(doc, config)
            }
        }

        impl Encode for $name {
            fn encode(&self) -> Document {
                encode_record(self)
            }
        }

        impl_wire_value!($name);
        impl_serde_via_codec!($name);
    };
}

flag_record! {
    /// Optional parts of a committed transaction's details to include in the response.
    pub struct TransactionDetailsOptIns {
        /// Hex-encoded binary blob of the transaction.
        raw_hex / with_raw_hex = false,
        receipt_state_changes / with_receipt_state_changes = false,
        receipt_fee_summary / with_receipt_fee_summary = false,
        receipt_fee_source / with_receipt_fee_source = false,
        receipt_fee_destination / with_receipt_fee_destination = false,
        receipt_costing_parameters / with_receipt_costing_parameters = false,
        receipt_events / with_receipt_events = false,
        /// Events with their emitter and payload decoded.
        detailed_events / with_detailed_events = false,
        /// Output of every manifest instruction. On unless turned off.
        receipt_output / with_receipt_output = true,
        affected_global_entities / with_affected_global_entities = false,
        manifest_instructions / with_manifest_instructions = false,
        balance_changes / with_balance_changes = false,
    }
}

flag_record! {
    /// Relaxations applied when previewing a transaction.
    pub struct PreviewFlags {
        use_free_credit / with_use_free_credit = false,
        assume_all_signature_proofs / with_assume_all_signature_proofs = false,
        skip_epoch_check / with_skip_epoch_check = false,
        /// Run without checking access rules. Only meaningful for preview.
        disable_auth_checks / with_disable_auth_checks = false,
    }
}
