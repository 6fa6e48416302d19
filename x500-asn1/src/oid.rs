use serde::{de, ser};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OidError {
    /// fewer than two arcs
    #[error("an object identifier needs at least two arcs, found {found}")]
    TooFewArcs { found: usize },

    /// arc is empty or contains something else than decimal digits
    #[error("arc `{arc}` is not a non-negative decimal number")]
    InvalidArc { arc: String },

    /// arc is larger than what a `u64` holds
    #[error("arc `{arc}` is too large")]
    ArcOverflow { arc: String },

    /// root arc outside of `0..=2`
    #[error("first arc must be 0, 1 or 2 (found {first})")]
    InvalidFirstArc { first: u64 },

    /// second arc of `0` and `1` roots must be lower than 40
    #[error("second arc under root {first} must be lower than 40 (found {second})")]
    InvalidSecondArc { first: u64, second: u64 },
}

/// ASN.1 OBJECT IDENTIFIER held as its list of arcs.
///
/// Ordering is arc by arc, a proper prefix sorting before the longer identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier(Cow<'static, [u64]>);

impl ObjectIdentifier {
    /// Builds a well-known identifier at compile time.
    ///
    /// Panics (at compile time when used in a `const`) if the arcs don't form a valid identifier.
    pub const fn from_static(arcs: &'static [u64]) -> Self {
        assert!(arcs.len() >= 2, "an object identifier needs at least two arcs");
        assert!(arcs[0] <= 2, "first arc must be 0, 1 or 2");
        assert!(arcs[0] == 2 || arcs[1] < 40, "second arc must be lower than 40");
        Self(Cow::Borrowed(arcs))
    }

    pub fn from_arcs(arcs: Vec<u64>) -> Result<Self, OidError> {
        check_arcs(&arcs)?;
        Ok(Self(Cow::Owned(arcs)))
    }

    pub fn arcs(&self) -> &[u64] {
        &self.0
    }
}

fn check_arcs(arcs: &[u64]) -> Result<(), OidError> {
    match *arcs {
        [] | [_] => Err(OidError::TooFewArcs { found: arcs.len() }),
        [first, ..] if first > 2 => Err(OidError::InvalidFirstArc { first }),
        [first, second, ..] if first < 2 && second >= 40 => Err(OidError::InvalidSecondArc { first, second }),
        _ => Ok(()),
    }
}

impl FromStr for ObjectIdentifier {
    type Err = OidError;

    /// Parses the dotted decimal form. Leading zeros in an arc are accepted and dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|arc| {
                if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(OidError::InvalidArc { arc: arc.to_owned() });
                }
                arc.parse::<u64>()
                    .map_err(|_| OidError::ArcOverflow { arc: arc.to_owned() })
            })
            .collect::<Result<Vec<u64>, OidError>>()?;

        Self::from_arcs(arcs)
    }
}

impl TryFrom<&str> for ObjectIdentifier {
    type Error = OidError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<&ObjectIdentifier> for String {
    fn from(oid: &ObjectIdentifier) -> Self {
        oid.to_string()
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in self.arcs() {
            if first {
                first = false;
            } else {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectIdentifier({})", self)
    }
}

impl ser::Serialize for ObjectIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<<S as ser::Serializer>::Ok, <S as ser::Serializer>::Error>
    where
        S: ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> de::Deserialize<'de> for ObjectIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = ObjectIdentifier;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a dotted decimal object identifier")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &"a valid object identifier"))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}
