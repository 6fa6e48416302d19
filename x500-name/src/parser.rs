//! RFC 1779 / RFC 2253 textual names.
//!
//! The accepted grammar is the union of both RFCs: `,` and `;` separate RDNs, `+` separates the
//! attributes of a multi-valued RDN, values may be quoted, backslash-escaped or given as `#` followed
//! by the hex of a DER value, and types may be keywords, dotted decimal OIDs or `OID.`-prefixed OIDs.

use crate::attribute::{AttributeTypeAndValue, AttributeValue};
use crate::error::NameError;
use crate::keyword;
use crate::rdn::RelativeDistinguishedName;
use std::collections::HashMap;
use thiserror::Error;
use x500_asn1::restricted_string::is_printable_str;
use x500_asn1::{ObjectIdentifier, OidError, Tag};
use x500_asn1_der::Asn1DerError;

#[derive(Debug, Error)]
pub enum SyntaxError {
    /// a double quote is never closed
    #[error("unterminated quoted value")]
    UnterminatedQuote,

    /// the name ends with a backslash
    #[error("dangling escape at end of name")]
    DanglingEscape,

    /// nothing between two RDN separators
    #[error("empty relative distinguished name")]
    EmptyRdn,

    /// nothing around a `+`
    #[error("empty attribute in multi-valued relative distinguished name")]
    EmptyAva,

    /// attribute written without `=`
    #[error("attribute `{ava}` has no `=`")]
    MissingEquals { ava: String },

    /// nothing before `=`
    #[error("empty attribute type")]
    EmptyKeyword,

    /// type is neither a known keyword nor an object identifier
    #[error("unknown attribute type `{keyword}`")]
    UnknownKeyword { keyword: String },

    /// type looks like an object identifier but isn't a valid one
    #[error("invalid object identifier `{oid}`: {source}")]
    InvalidOid { oid: String, source: OidError },

    /// `#` with no hex digits after it
    #[error("empty hex value")]
    EmptyHexValue,

    /// `#` followed by an odd number of hex digits
    #[error("odd number of hex digits in value")]
    OddHexLength,

    /// character that isn't a hex digit in a hex value or a `\xx` escape
    #[error("invalid hex digit `{found}`")]
    InvalidHexDigit { found: char },

    /// hex value isn't exactly one DER encoded value
    #[error("hex value is not a single DER value: {source}")]
    InvalidDerValue { source: Asn1DerError },

    /// backslash before a character that doesn't need escaping
    #[error("invalid escape `\\{found}`")]
    InvalidEscape { found: char },

    /// `\xx` escapes don't form valid UTF-8
    #[error("escaped bytes are not valid UTF-8")]
    InvalidUtf8,

    /// double quote inside an unquoted value
    #[error("unescaped `\"` in value")]
    UnexpectedQuote,

    /// something else than whitespace follows a closing quote
    #[error("unexpected `{found}` after quoted value")]
    TrailingCharacters { found: char },
}

/// Parses a textual name into RDNs stored root first.
pub(crate) fn parse(
    input: &str,
    keyword_map: &HashMap<String, String>,
) -> Result<Vec<RelativeDistinguishedName>, NameError> {
    let syntax = |source: SyntaxError| NameError::InvalidNameSyntax {
        input: input.to_owned(),
        source,
    };

    if input.is_empty() {
        return Ok(Vec::new());
    }

    let tokens = split(input).map_err(syntax)?;

    let mut rdns = Vec::with_capacity(tokens.len());
    for rdn_tokens in tokens {
        let mut avas = Vec::with_capacity(rdn_tokens.len());
        for token in rdn_tokens {
            avas.push(parse_ava(token, keyword_map).map_err(|e| match e {
                AvaError::Syntax(source) => syntax(source),
                AvaError::Name(e) => e,
            })?);
        }
        // split never yields an RDN without attributes
        if let Some(rdn) = RelativeDistinguishedName::new(avas) {
            rdns.push(rdn);
        }
    }

    // most specific first in text, root first in storage
    rdns.reverse();

    Ok(rdns)
}

enum AvaError {
    Syntax(SyntaxError),
    Name(NameError),
}

impl From<SyntaxError> for AvaError {
    fn from(e: SyntaxError) -> Self {
        AvaError::Syntax(e)
    }
}

/// Splits on unescaped `,`, `;` and `+` outside of double quotes.
fn split(input: &str) -> Result<Vec<Vec<&str>>, SyntaxError> {
    let mut rdns = Vec::new();
    let mut avas = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' | ';' | '+' if !in_quotes => {
                avas.push(&input[start..idx]);
                start = idx + 1;
                if c != '+' {
                    rdns.push(finish_rdn(std::mem::take(&mut avas))?);
                }
            }
            _ => {}
        }
    }

    if escaped {
        return Err(SyntaxError::DanglingEscape);
    }
    if in_quotes {
        return Err(SyntaxError::UnterminatedQuote);
    }

    avas.push(&input[start..]);
    rdns.push(finish_rdn(avas)?);

    Ok(rdns)
}

fn finish_rdn(avas: Vec<&str>) -> Result<Vec<&str>, SyntaxError> {
    let blank = |ava: &&str| ava.trim().is_empty();
    match avas.as_slice() {
        [single] if blank(single) => Err(SyntaxError::EmptyRdn),
        _ if avas.iter().any(blank) => Err(SyntaxError::EmptyAva),
        _ => Ok(avas),
    }
}

fn parse_ava(token: &str, keyword_map: &HashMap<String, String>) -> Result<AttributeTypeAndValue, AvaError> {
    let (keyword, value) = token.split_once('=').ok_or_else(|| SyntaxError::MissingEquals {
        ava: token.trim().to_owned(),
    })?;

    let ty = resolve_type(keyword.trim(), keyword_map)?;
    let value = parse_value(value)?;

    Ok(AttributeTypeAndValue::new(ty, value))
}

fn resolve_type(keyword: &str, keyword_map: &HashMap<String, String>) -> Result<ObjectIdentifier, AvaError> {
    if keyword.is_empty() {
        return Err(SyntaxError::EmptyKeyword.into());
    }

    if let Some(oid) = keyword::lookup_override(keyword, keyword_map) {
        return oid.map_err(AvaError::Name);
    }

    if let Some(oid) = keyword::lookup_any(keyword) {
        return Ok(oid);
    }

    let numeric = match keyword.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("OID.") => &keyword[4..],
        _ => keyword,
    };

    if !numeric.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(SyntaxError::UnknownKeyword {
            keyword: keyword.to_owned(),
        }
        .into());
    }

    numeric.parse().map_err(|source| {
        SyntaxError::InvalidOid {
            oid: numeric.to_owned(),
            source,
        }
        .into()
    })
}

fn parse_value(raw: &str) -> Result<AttributeValue, SyntaxError> {
    let value = raw.trim_start_matches([' ', '\n']);

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex_value(hex);
    }

    let text = match value.strip_prefix('"') {
        Some(quoted) => unquote(quoted)?,
        None => unescape(value)?,
    };

    let tag = if is_printable_str(&text) {
        Tag::PRINTABLE_STRING
    } else {
        Tag::UTF8_STRING
    };

    Ok(AttributeValue::from_utf8_bytes(tag, &text))
}

fn parse_hex_value(hex: &str) -> Result<AttributeValue, SyntaxError> {
    let digits = hex.trim_end_matches(' ');
    if digits.is_empty() {
        return Err(SyntaxError::EmptyHexValue);
    }

    let der = hex::decode(digits).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, .. } => SyntaxError::InvalidHexDigit { found: c },
        _ => SyntaxError::OddHexLength,
    })?;

    AttributeValue::from_der(&der).map_err(|source| SyntaxError::InvalidDerValue { source })
}

/// Characters allowed after a backslash, besides hex pairs.
const UNQUOTED_ESCAPES: &[char] = &[',', '=', '\n', '+', '<', '>', '#', ';', '\\', '"', ' '];
const QUOTED_ESCAPES: &[char] = &[',', '=', '\n', '+', '<', '>', '#', ';', '\\', '"'];

/// Resolves escapes of an unquoted value and drops its unescaped trailing spaces.
fn unescape(value: &str) -> Result<String, SyntaxError> {
    let mut out = Unescaper::default();
    let mut pending_spaces = 0;
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next().ok_or(SyntaxError::DanglingEscape)?;
                if escaped.is_ascii_hexdigit() {
                    if !out.has_pending_bytes() {
                        out.push_spaces(&mut pending_spaces);
                    }
                    out.push_hex_pair(escaped, chars.next())?;
                } else {
                    out.push_spaces(&mut pending_spaces);
                    if !UNQUOTED_ESCAPES.contains(&escaped) {
                        return Err(SyntaxError::InvalidEscape { found: escaped });
                    }
                    out.push(escaped)?;
                }
            }
            ' ' => {
                out.flush_bytes()?;
                pending_spaces += 1;
            }
            '"' => return Err(SyntaxError::UnexpectedQuote),
            c => {
                out.push_spaces(&mut pending_spaces);
                out.push(c)?;
            }
        }
    }

    out.finish()
}

/// Resolves escapes of a quoted value, `quoted` starting right after the opening quote.
fn unquote(quoted: &str) -> Result<String, SyntaxError> {
    let mut out = Unescaper::default();
    let mut chars = quoted.chars();

    loop {
        match chars.next().ok_or(SyntaxError::UnterminatedQuote)? {
            '\\' => {
                let escaped = chars.next().ok_or(SyntaxError::DanglingEscape)?;
                if escaped.is_ascii_hexdigit() {
                    out.push_hex_pair(escaped, chars.next())?;
                } else if QUOTED_ESCAPES.contains(&escaped) {
                    out.push(escaped)?;
                } else {
                    return Err(SyntaxError::InvalidEscape { found: escaped });
                }
            }
            '"' => break,
            c => out.push(c)?,
        }
    }

    if let Some(found) = chars.find(|c| !c.is_whitespace()) {
        return Err(SyntaxError::TrailingCharacters { found });
    }

    out.finish()
}

/// Accumulates value text, decoding runs of `\xx` escapes together as UTF-8.
#[derive(Default)]
struct Unescaper {
    text: String,
    bytes: Vec<u8>,
}

impl Unescaper {
    fn has_pending_bytes(&self) -> bool {
        !self.bytes.is_empty()
    }

    fn push_hex_pair(&mut self, high: char, low: Option<char>) -> Result<(), SyntaxError> {
        let low = low.ok_or(SyntaxError::DanglingEscape)?;
        let (Some(high), Some(low)) = (high.to_digit(16), low.to_digit(16)) else {
            return Err(SyntaxError::InvalidHexDigit { found: low });
        };
        // both digits are below 16
        self.bytes.push((high << 4 | low) as u8);
        Ok(())
    }

    fn push_spaces(&mut self, count: &mut usize) {
        if *count > 0 {
            self.text.extend(std::iter::repeat(' ').take(*count));
            *count = 0;
        }
    }

    fn push(&mut self, c: char) -> Result<(), SyntaxError> {
        self.flush_bytes()?;
        self.text.push(c);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), SyntaxError> {
        if !self.bytes.is_empty() {
            let decoded = std::str::from_utf8(&self.bytes).map_err(|_| SyntaxError::InvalidUtf8)?;
            self.text.push_str(decoded);
            self.bytes.clear();
        }
        Ok(())
    }

    fn finish(mut self) -> Result<String, SyntaxError> {
        self.flush_bytes()?;
        Ok(self.text)
    }
}
