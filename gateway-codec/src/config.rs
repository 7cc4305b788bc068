use std::str::FromStr;

use env_vars::{ACCEPT_ALIASES, UNKNOWN_VARIANTS};

/// List of environment variables read by [`CodecConfig::from_env`].
pub mod env_vars {
    use std::ffi::OsStr;

    /// `true`/`false`: accept payload type names (`MetadataU32Value`) as discriminators.
    pub const ACCEPT_ALIASES: &str = "GATEWAY_CODEC_ACCEPT_ALIASES";

    /// `reject`/`skip`: what lenient sequence decoding does with unknown discriminators.
    pub const UNKNOWN_VARIANTS: &str = "GATEWAY_CODEC_UNKNOWN_VARIANTS";

    /// Load an environment variable and verify if it's not empty
    pub fn non_empty_var<K: AsRef<OsStr>>(key: K) -> Option<String> {
        let value = std::env::var(key).ok()?;
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// What [`crate::decode_sequence`] does with a value whose discriminator is not registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnknownVariantPolicy {
    /// Fail the whole sequence with [`crate::CodecError::UnknownVariant`].
    #[default]
    Reject,
    /// Drop the value and keep going; servers may add variants before clients learn them.
    Skip,
}

impl FromStr for UnknownVariantPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown variant policy `{other}`, expected `reject` or `skip`")),
        }
    }
}

/// Decoding knobs. Encoding is not configurable: it always emits canonical tags.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CodecConfig {
    pub accept_type_name_aliases: bool,
    pub unknown_variants: UnknownVariantPolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self { accept_type_name_aliases: true, unknown_variants: UnknownVariantPolicy::Reject }
    }

    #[must_use]
    pub const fn with_type_name_aliases(mut self, accept: bool) -> Self {
        self.accept_type_name_aliases = accept;
        self
    }

    #[must_use]
    pub const fn with_unknown_variants(mut self, policy: UnknownVariantPolicy) -> Self {
        self.unknown_variants = policy;
        self
    }

    /// Build the config from the environment, falling back to the defaults
    /// for variables that are unset or can't be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env_vars::non_empty_var(key))
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        if let Some(value) = lookup(ACCEPT_ALIASES) {
            match value.trim().parse::<bool>() {
                Ok(accept) => config.accept_type_name_aliases = accept,
                Err(error) => tracing::warn!("Ignoring {ACCEPT_ALIASES}={value}: {error}"),
            }
        }
        if let Some(value) = lookup(UNKNOWN_VARIANTS) {
            match value.parse::<UnknownVariantPolicy>() {
                Ok(policy) => config.unknown_variants = policy,
                Err(error) => tracing::warn!("Ignoring {UNKNOWN_VARIANTS}: {error}"),
            }
        }
        config
    }
}
