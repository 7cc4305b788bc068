use chrono::{DateTime, Utc};
use gateway_codec::{record, Validate, Violation};

record! {
    /// The ledger state a response was computed against.
    pub struct LedgerState {
        network: required String,
        state_version: required i64,
        /// RFC 3339 timestamp of the round proposer, with millisecond precision.
        proposer_round_timestamp: required String,
        epoch: required i64,
        round: required i64,
    }
}

record! {
    /// Optional selector of a past ledger state.
    ///
    /// At most one of `state_version`, `timestamp` or `epoch` (optionally with
    /// `round`) should be set; see [`LedgerStateSelector::resolution`] for how
    /// a selector with several of them is interpreted anyway.
    pub struct LedgerStateSelector {
        state_version: optional i64,
        timestamp: optional DateTime<Utc>,
        epoch: optional i64,
        round: optional i64,
    }
}

/// Name used by older endpoints for the same selector.
pub type PartialLedgerStateIdentifier = LedgerStateSelector;

const SELECTOR_CONFLICT: &str = "only one of version/timestamp/epoch(+round) may be defined";

/// What a [`LedgerStateSelector`] points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedgerStateResolution {
    /// Nothing selected: the current top of the ledger.
    Latest,
    StateVersion(i64),
    Timestamp(DateTime<Utc>),
    EpochRound { epoch: i64, round: i64 },
}

impl LedgerStateSelector {
    #[must_use]
    pub const fn latest() -> Self {
        Self::new(None, None, None, None)
    }

    #[must_use]
    pub const fn at_state_version(state_version: i64) -> Self {
        Self::new(Some(state_version), None, None, None)
    }

    #[must_use]
    pub const fn at_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self::new(None, Some(timestamp), None, None)
    }

    #[must_use]
    pub const fn at_epoch(epoch: i64, round: Option<i64>) -> Self {
        Self::new(None, None, Some(epoch), round)
    }

    /// The state this selector points at.
    ///
    /// `state_version` wins over `timestamp`, which wins over `epoch`. A
    /// missing `round` means the first round of the epoch, and a `round`
    /// without an `epoch` is ignored.
    #[must_use]
    pub fn resolution(&self) -> LedgerStateResolution {
        match (self.state_version, self.timestamp, self.epoch) {
            (Some(state_version), _, _) => LedgerStateResolution::StateVersion(state_version),
            (None, Some(timestamp), _) => LedgerStateResolution::Timestamp(timestamp),
            (None, None, Some(epoch)) => {
                LedgerStateResolution::EpochRound { epoch, round: self.round.unwrap_or(0) }
            },
            (None, None, None) => LedgerStateResolution::Latest,
        }
    }
}

impl Default for LedgerStateSelector {
    fn default() -> Self {
        Self::latest()
    }
}

impl Validate for LedgerStateSelector {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        let defined = [
            self.state_version.map(|_| "state_version"),
            self.timestamp.map(|_| "timestamp"),
            (self.epoch.is_some() || self.round.is_some()).then_some("epoch"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
        if defined.len() > 1 {
            violations.push(Violation::new(defined.join(", "), SELECTOR_CONFLICT));
        }

        if self.round.is_some() && self.epoch.is_none() {
            violations.push(Violation::new("round", "round requires epoch to be defined"));
        }
        if let Some(state_version) = self.state_version.filter(|version| *version < 1) {
            violations.push(Violation::new(
                "state_version",
                format!("must be at least 1, found {state_version}"),
            ));
        }
        for (field, value) in [("epoch", self.epoch), ("round", self.round)] {
            if let Some(value) = value.filter(|value| *value < 0) {
                violations.push(Violation::new(field, format!("must not be negative, found {value}")));
            }
        }
        violations
    }
}
