//! Attribute type keywords and the formats they may be written in.

use crate::error::NameError;
use crate::format::NameFormat;
use crate::oids;
use std::borrow::Cow;
use std::collections::HashMap;
use x500_asn1::ObjectIdentifier;

struct KeywordEntry {
    keyword: &'static str,
    oid: ObjectIdentifier,
    rfc1779: bool,
    rfc2253: bool,
}

macro_rules! keywords {
    ( $( $keyword:literal => $oid:expr, $rfc1779:literal, $rfc2253:literal; )+ ) => {
        &[ $( KeywordEntry { keyword: $keyword, oid: $oid, rfc1779: $rfc1779, rfc2253: $rfc2253 }, )+ ]
    };
}

// First entry compliant with a format is the one used when rendering.
const KEYWORDS: &[KeywordEntry] = keywords! {
    "CN" => oids::AT_COMMON_NAME, true, true;
    "C" => oids::AT_COUNTRY_NAME, true, true;
    "L" => oids::AT_LOCALITY_NAME, true, true;
    "ST" => oids::AT_STATE_OR_PROVINCE_NAME, true, true;
    "S" => oids::AT_STATE_OR_PROVINCE_NAME, false, false;
    "O" => oids::AT_ORGANIZATION_NAME, true, true;
    "OU" => oids::AT_ORGANIZATIONAL_UNIT_NAME, true, true;
    "STREET" => oids::AT_STREET_ADDRESS, true, true;
    "DC" => oids::DOMAIN_COMPONENT, false, true;
    "UID" => oids::USER_ID, false, true;
    "T" => oids::AT_TITLE, false, false;
    "DNQ" => oids::AT_DN_QUALIFIER, false, false;
    "DNQUALIFIER" => oids::AT_DN_QUALIFIER, false, false;
    "SURNAME" => oids::AT_SURNAME, false, false;
    "GIVENNAME" => oids::AT_GIVEN_NAME, false, false;
    "INITIALS" => oids::AT_INITIALS, false, false;
    "GENERATION" => oids::AT_GENERATION_QUALIFIER, false, false;
    "EMAIL" => oids::EMAIL_ADDRESS, false, false;
    "EMAILADDRESS" => oids::EMAIL_ADDRESS, false, false;
    "SERIALNUMBER" => oids::AT_SERIAL_NUMBER, false, false;
    "IP" => oids::IP_ADDRESS, false, false;
};

impl KeywordEntry {
    fn is_compliant(&self, format: NameFormat) -> bool {
        match format {
            NameFormat::Rfc1779 => self.rfc1779,
            NameFormat::Rfc2253 => self.rfc2253,
            NameFormat::Canonical => false,
        }
    }
}

/// Looks up a keyword usable in `format` (case-insensitive).
///
/// `Canonical` has no keywords at all.
pub fn keyword_to_oid(keyword: &str, format: NameFormat) -> Option<ObjectIdentifier> {
    KEYWORDS
        .iter()
        .find(|entry| entry.is_compliant(format) && entry.keyword.eq_ignore_ascii_case(keyword))
        .map(|entry| entry.oid.clone())
}

/// Preferred keyword for `oid` in `format`, an entry of `oid_map` winning over the built-in table.
///
/// `oid_map` keys are dotted decimal OIDs without leading zeros. Entries are expected to have been
/// checked with [`check_keyword`].
pub fn oid_to_keyword<'a>(
    oid: &ObjectIdentifier,
    format: NameFormat,
    oid_map: &'a HashMap<String, String>,
) -> Option<Cow<'a, str>> {
    if format == NameFormat::Canonical {
        return None;
    }

    if !oid_map.is_empty() {
        if let Some(keyword) = oid_map.get(&oid.to_string()) {
            return Some(Cow::Borrowed(keyword.as_str()));
        }
    }

    builtin_keyword(oid, format).map(Cow::Borrowed)
}

/// Built-in keyword for `oid` in `format`.
pub(crate) fn builtin_keyword(oid: &ObjectIdentifier, format: NameFormat) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|entry| entry.is_compliant(format) && entry.oid == *oid)
        .map(|entry| entry.keyword)
}

/// Any built-in keyword, whatever the format visibility.
pub(crate) fn lookup_any(keyword: &str) -> Option<ObjectIdentifier> {
    KEYWORDS
        .iter()
        .find(|entry| entry.keyword.eq_ignore_ascii_case(keyword))
        .map(|entry| entry.oid.clone())
}

/// Looks `keyword` up in a caller supplied keyword → OID map.
///
/// An exact key match is preferred, otherwise keys are compared case-insensitively.
pub(crate) fn lookup_override(
    keyword: &str,
    keyword_map: &HashMap<String, String>,
) -> Option<Result<ObjectIdentifier, NameError>> {
    let oid = keyword_map.get(keyword).or_else(|| {
        keyword_map
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(keyword))
            .map(|(_, oid)| oid)
    })?;

    Some(oid.trim().parse().map_err(|source| NameError::InvalidOidSyntax {
        oid: oid.clone(),
        source,
    }))
}

/// A keyword must start with an ASCII letter and only contain ASCII letters, digits and `_`.
pub(crate) fn check_keyword(oid: &ObjectIdentifier, keyword: &str) -> Result<(), NameError> {
    let mut chars = keyword.chars();
    let valid = chars.next().map_or(false, |c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(NameError::InvalidKeyword {
            oid: oid.to_string(),
            keyword: keyword.to_owned(),
        })
    }
}
