//! Rendering of names as RFC 1779, RFC 2253 and canonical strings.

use crate::attribute::{AttributeTypeAndValue, AttributeValue};
use crate::error::NameError;
use crate::keyword;
use crate::rdn::RelativeDistinguishedName;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use x500_asn1::StringKind;

/// Output forms of a distinguished name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameFormat {
    /// [RFC 1779](https://tools.ietf.org/html/rfc1779): `CN=Duke, OU=JavaSoft, O=Sun Microsystems, C=US`
    Rfc1779,
    /// [RFC 2253](https://tools.ietf.org/html/rfc2253): `CN=Duke,OU=JavaSoft,O=Sun Microsystems,C=US`
    Rfc2253,
    /// RFC 2253 based form used to compare names, every attribute type written as an OID:
    /// `2.5.4.3=duke,2.5.4.11=javasoft,2.5.4.10=sun microsystems,2.5.4.6=us`
    Canonical,
}

impl FromStr for NameFormat {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("RFC1779") {
            Ok(NameFormat::Rfc1779)
        } else if s.eq_ignore_ascii_case("RFC2253") {
            Ok(NameFormat::Rfc2253)
        } else if s.eq_ignore_ascii_case("CANONICAL") {
            Ok(NameFormat::Canonical)
        } else {
            Err(NameError::UnsupportedFormat { format: s.to_owned() })
        }
    }
}

impl fmt::Display for NameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFormat::Rfc1779 => write!(f, "RFC1779"),
            NameFormat::Rfc2253 => write!(f, "RFC2253"),
            NameFormat::Canonical => write!(f, "CANONICAL"),
        }
    }
}

/// Fails on the first `oid_map` keyword used by `rdns` that isn't a valid attribute type keyword.
pub(crate) fn check_oid_map(
    rdns: &[RelativeDistinguishedName],
    format: NameFormat,
    oid_map: &HashMap<String, String>,
) -> Result<(), NameError> {
    if format == NameFormat::Canonical || oid_map.is_empty() {
        return Ok(());
    }

    for ava in rdns.iter().flatten() {
        if let Some(keyword) = oid_map.get(&ava.ty.to_string()) {
            keyword::check_keyword(&ava.ty, keyword)?;
        }
    }

    Ok(())
}

/// Renders `rdns` (stored root first) most specific first.
pub(crate) fn render(
    rdns: &[RelativeDistinguishedName],
    format: NameFormat,
    oid_map: &HashMap<String, String>,
) -> String {
    match format {
        NameFormat::Rfc1779 => join(rdns, ", ", " + ", |ava| rfc1779_ava(ava, oid_map)),
        NameFormat::Rfc2253 => join(rdns, ",", "+", |ava| rfc2253_ava(ava, oid_map)),
        NameFormat::Canonical => canonical(rdns),
    }
}

fn join(
    rdns: &[RelativeDistinguishedName],
    rdn_separator: &str,
    ava_separator: &str,
    render_ava: impl Fn(&AttributeTypeAndValue) -> String,
) -> String {
    rdns.iter()
        .rev()
        .map(|rdn| rdn.iter().map(&render_ava).collect::<Vec<_>>().join(ava_separator))
        .collect::<Vec<_>>()
        .join(rdn_separator)
}

fn rfc2253_ava(ava: &AttributeTypeAndValue, oid_map: &HashMap<String, String>) -> String {
    let ty = keyword::oid_to_keyword(&ava.ty, NameFormat::Rfc2253, oid_map)
        .map(|keyword| keyword.into_owned())
        .unwrap_or_else(|| ava.ty.to_string());

    let value = match ava.value.as_string() {
        Some(text) => escape_rfc2253(&text),
        None => ava.value.to_hex_string(),
    };

    format!("{ty}={value}")
}

fn escape_rfc2253(text: &str) -> String {
    let leading = text.len() - text.trim_start_matches(' ').len();
    let trailing_start = text.trim_end_matches(' ').len().max(leading);

    let mut out = String::with_capacity(text.len());
    for (idx, c) in text.char_indices() {
        match c {
            ' ' if idx < leading || idx >= trailing_start => out.push_str("\\ "),
            ',' | '=' | '+' | '<' | '>' | '#' | ';' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\00"),
            c => out.push(c),
        }
    }
    out
}

fn rfc1779_ava(ava: &AttributeTypeAndValue, oid_map: &HashMap<String, String>) -> String {
    let ty = keyword::oid_to_keyword(&ava.ty, NameFormat::Rfc1779, oid_map)
        .map(|keyword| keyword.into_owned())
        .unwrap_or_else(|| format!("OID.{}", ava.ty));

    let value = match ava.value.as_string() {
        Some(text) => escape_rfc1779(&text),
        None => ava.value.to_hex_string(),
    };

    format!("{ty}={value}")
}

fn escape_rfc1779(text: &str) -> String {
    let needs_quotes = text.contains([',', '+', '=', '\n', '<', '>', '#', ';'])
        || text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || has_repeated_whitespace(text);

    let mut out = String::with_capacity(text.len() + 2);
    if needs_quotes {
        out.push('"');
    }
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    if needs_quotes {
        out.push('"');
    }
    out
}

fn has_repeated_whitespace(text: &str) -> bool {
    let mut previous_blank = false;
    for c in text.chars() {
        let blank = c.is_whitespace();
        if blank && previous_blank {
            return true;
        }
        previous_blank = blank;
    }
    false
}

/// Canonical string: attribute types as OIDs, values folded and normalized, attributes of
/// multi-valued RDNs sorted.
pub(crate) fn canonical(rdns: &[RelativeDistinguishedName]) -> String {
    rdns.iter()
        .rev()
        .map(canonical_rdn)
        .collect::<Vec<_>>()
        .join(",")
}

fn canonical_rdn(rdn: &RelativeDistinguishedName) -> String {
    let mut avas: Vec<(&AttributeTypeAndValue, String)> = rdn.iter().map(|ava| (ava, canonical_ava(ava))).collect();
    avas.sort_by(|(a, a_canonical), (b, b_canonical)| compare_avas(a, b).then_with(|| a_canonical.cmp(b_canonical)));
    avas.into_iter()
        .map(|(_, canonical)| canonical)
        .collect::<Vec<_>>()
        .join("+")
}

/// Attributes with an RFC 2253 keyword first, by keyword, then the others by OID.
fn compare_avas(a: &AttributeTypeAndValue, b: &AttributeTypeAndValue) -> Ordering {
    let a_keyword = keyword::builtin_keyword(&a.ty, NameFormat::Rfc2253);
    let b_keyword = keyword::builtin_keyword(&b.ty, NameFormat::Rfc2253);
    match (a_keyword, b_keyword) {
        (Some(a_keyword), Some(b_keyword)) => a_keyword.cmp(b_keyword),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.ty.cmp(&b.ty),
    }
}

fn canonical_ava(ava: &AttributeTypeAndValue) -> String {
    format!("{}={}", ava.ty, canonical_value(&ava.value))
}

/// Text values are folded and normalized before whitespace collapsing and escaping: compatibility
/// forms of special characters such as `，` (U+FF0C) come out escaped.
fn canonical_value(value: &AttributeValue) -> String {
    let text = match value.string_kind() {
        Some(StringKind::Printable | StringKind::Utf8) => value.as_string(),
        _ => None,
    };

    match text {
        Some(text) => escape_canonical(&collapse_whitespace(&fold(&text))),
        None => value.to_hex_string(),
    }
}

fn fold(text: &str) -> String {
    // upper-casing first folds ß to ss and similar
    text.to_uppercase().to_lowercase().nfkd().collect()
}

/// Trims and collapses whitespace runs to one space. Text made only of whitespace becomes a single space.
fn collapse_whitespace(text: &str) -> String {
    if !text.is_empty() && text.chars().all(char::is_whitespace) {
        return " ".to_owned();
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_canonical(text: &str) -> String {
    let last = text.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(text.len());
    for (idx, c) in text.chars().enumerate() {
        let escape = match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => true,
            '#' => idx == 0,
            ' ' => idx == 0 || idx == last,
            _ => false,
        };
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
