use std::{fmt::Display, str::FromStr};

/// A failed cross-field or format rule. Reported as data, never raised.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Violation {
    /// Path of the offending field, e.g. `typed.values[2].key_hex`.
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }

    /// Prefix the field path with the name of the containing field.
    #[must_use]
    pub fn within(self, parent: &str) -> Self {
        Self { field: format!("{parent}.{}", self.field), message: self.message }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Semantic checks beyond what decoding enforces.
pub trait Validate {
    /// Every violation found; empty when the value is valid.
    fn validate(&self) -> Vec<Violation>;
}

/// Run every check of `value`.
pub fn validate<T: Validate + ?Sized>(value: &T) -> Vec<Violation> {
    value.validate()
}

/// Violations of `value`, reported under the field `parent`.
pub fn nested<T: Validate + ?Sized>(parent: &str, value: &T) -> Vec<Violation> {
    value.validate().into_iter().map(|violation| violation.within(parent)).collect()
}

/// Violations of each element of `values`, reported as `parent[index].field`.
pub fn nested_each<T: Validate>(parent: &str, values: &[T]) -> Vec<Violation> {
    values
        .iter()
        .enumerate()
        .flat_map(|(index, value)| nested(&indexed(parent, index), value))
        .collect()
}

#[must_use]
pub fn indexed(field: &str, index: usize) -> String {
    format!("{field}[{index}]")
}

/// Check that `value` is bare hex, optionally of an exact decoded length.
///
/// A `0x` prefix is rejected.
pub fn check_hex(field: &str, value: &str, expected_bytes: Option<usize>) -> Option<Violation> {
    if value.starts_with("0x") || value.starts_with("0X") {
        return Some(Violation::new(field, "not valid hex: unexpected `0x` prefix"));
    }
    match const_hex::decode(value) {
        Err(error) => Some(Violation::new(field, format!("not valid hex: {error}"))),
        Ok(bytes) => match expected_bytes {
            Some(expected) if bytes.len() != expected => Some(Violation::new(
                field,
                format!("expected {expected} bytes, found {}", bytes.len()),
            )),
            _ => None,
        },
    }
}

/// Check that `value` parses as `T`, whose name is `type_label` in the message.
pub fn check_parse<T: FromStr>(field: &str, value: &str, type_label: &str) -> Option<Violation> {
    match value.parse::<T>() {
        Ok(_) => None,
        Err(_) => Some(Violation::new(field, format!("`{value}` is not a valid {type_label}"))),
    }
}

/// Check that `value` is a plain decimal number: optional sign, digits, optional fraction.
pub fn check_decimal(field: &str, value: &str) -> Option<Violation> {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if digits(integer) && fraction.map_or(true, digits) {
        None
    } else {
        Some(Violation::new(field, format!("`{value}` is not a valid decimal")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Key(&'static str);

    impl Validate for Key {
        fn validate(&self) -> Vec<Violation> {
            check_hex("key_hex", self.0, Some(2)).into_iter().collect()
        }
    }

    #[test]
    fn hex_checks() {
        assert_eq!(check_hex("raw_hex", "deadbeef", None), None);
        assert!(check_hex("raw_hex", "xyz", None).is_some());
        assert_eq!(
            check_hex("raw_hex", "0xdeadbeef", None),
            Some(Violation::new("raw_hex", "not valid hex: unexpected `0x` prefix"))
        );
        assert!(check_hex("key_hex", "0Xdead", Some(2)).is_some());
        let violation = check_hex("key_hex", "dead", Some(33)).unwrap();
        assert_eq!(violation.message, "expected 33 bytes, found 2");
    }

    #[test]
    fn number_checks() {
        assert_eq!(check_parse::<u8>("value", "255", "u8"), None);
        assert_eq!(
            check_parse::<u8>("value", "256", "u8"),
            Some(Violation::new("value", "`256` is not a valid u8"))
        );
        assert_eq!(check_decimal("value", "-10.5"), None);
        assert_eq!(check_decimal("value", "10"), None);
        assert!(check_decimal("value", "1e5").is_some());
        assert!(check_decimal("value", "1.").is_some());
        assert!(check_decimal("value", "").is_some());
    }

    #[test]
    fn nested_paths() {
        let keys = [Key("beef"), Key("be"), Key("zz")];
        let violations = nested_each("values", &keys);
        let fields = violations.iter().map(|v| v.field.as_str()).collect::<Vec<_>>();
        assert_eq!(fields, ["values[1].key_hex", "values[2].key_hex"]);
        assert_eq!(nested("typed", &keys[1])[0].field, "typed.key_hex");
    }
}
