use gateway_codec::{check_hex, record, tagged_union, Validate, Violation};

/// Length of a compressed secp256k1 public key.
pub const SECP256K1_PUBLIC_KEY_LENGTH: usize = 33;
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;
/// Public key hashes are truncated to 29 bytes for both curves.
pub const PUBLIC_KEY_HASH_LENGTH: usize = 29;

record! {
    pub struct PublicKeyEcdsaSecp256k1: "key_type" = "EcdsaSecp256k1" {
        /// Hex-encoded compressed key.
        key_hex: required String,
    }
}

record! {
    pub struct PublicKeyEddsaEd25519: "key_type" = "EddsaEd25519" {
        key_hex: required String,
    }
}

tagged_union! {
    pub enum PublicKey {
        discriminator = "key_type",
        kind = PublicKeyType,
        type_name_aliases = false,
        variants = {
            EcdsaSecp256k1(PublicKeyEcdsaSecp256k1),
            EddsaEd25519(PublicKeyEddsaEd25519),
        }
    }
}

impl PublicKey {
    #[must_use]
    pub fn key_hex(&self) -> &str {
        match self {
            Self::EcdsaSecp256k1(key) => key.key_hex(),
            Self::EddsaEd25519(key) => key.key_hex(),
        }
    }
}

impl Validate for PublicKey {
    fn validate(&self) -> Vec<Violation> {
        let expected = match self {
            Self::EcdsaSecp256k1(_) => SECP256K1_PUBLIC_KEY_LENGTH,
            Self::EddsaEd25519(_) => ED25519_PUBLIC_KEY_LENGTH,
        };
        check_hex("key_hex", self.key_hex(), Some(expected)).into_iter().collect()
    }
}

record! {
    pub struct PublicKeyHashEcdsaSecp256k1: "key_hash_type" = "EcdsaSecp256k1" {
        hash_hex: required String,
    }
}

record! {
    pub struct PublicKeyHashEddsaEd25519: "key_hash_type" = "EddsaEd25519" {
        hash_hex: required String,
    }
}

tagged_union! {
    pub enum PublicKeyHash {
        discriminator = "key_hash_type",
        kind = PublicKeyHashType,
        type_name_aliases = false,
        variants = {
            EcdsaSecp256k1(PublicKeyHashEcdsaSecp256k1),
            EddsaEd25519(PublicKeyHashEddsaEd25519),
        }
    }
}

impl PublicKeyHash {
    #[must_use]
    pub fn hash_hex(&self) -> &str {
        match self {
            Self::EcdsaSecp256k1(hash) => hash.hash_hex(),
            Self::EddsaEd25519(hash) => hash.hash_hex(),
        }
    }
}

impl Validate for PublicKeyHash {
    fn validate(&self) -> Vec<Violation> {
        check_hex("hash_hex", self.hash_hex(), Some(PUBLIC_KEY_HASH_LENGTH)).into_iter().collect()
    }
}
