//! Character string types allowed in a `DirectoryString` and friends.

use crate::tag::Tag;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("content is not a valid {kind}")]
pub struct CharSetError {
    pub kind: StringKind,
}

/// String types an attribute value may be encoded with.
///
/// ```not_rust
/// DirectoryString ::= CHOICE {
///       teletexString           TeletexString (SIZE (1..MAX)),
///       printableString         PrintableString (SIZE (1..MAX)),
///       universalString         UniversalString (SIZE (1..MAX)),
///       utf8String              UTF8String (SIZE (1..MAX)),
///       bmpString               BMPString (SIZE (1..MAX)) }
/// ```
///
/// `IA5String` is added since `emailAddress` and `domainComponent` values use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    Printable,
    Teletex,
    Ia5,
    Utf8,
    Bmp,
    Universal,
}

impl StringKind {
    pub const fn tag(self) -> Tag {
        match self {
            StringKind::Printable => Tag::PRINTABLE_STRING,
            StringKind::Teletex => Tag::TELETEX_STRING,
            StringKind::Ia5 => Tag::IA5_STRING,
            StringKind::Utf8 => Tag::UTF8_STRING,
            StringKind::Bmp => Tag::BMP_STRING,
            StringKind::Universal => Tag::UNIVERSAL_STRING,
        }
    }

    pub fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            Tag::PRINTABLE_STRING => Some(StringKind::Printable),
            Tag::TELETEX_STRING => Some(StringKind::Teletex),
            Tag::IA5_STRING => Some(StringKind::Ia5),
            Tag::UTF8_STRING => Some(StringKind::Utf8),
            Tag::BMP_STRING => Some(StringKind::Bmp),
            Tag::UNIVERSAL_STRING => Some(StringKind::Universal),
            _ => None,
        }
    }

    /// Decodes the content octets of a value of this kind.
    pub fn decode(self, content: &[u8]) -> Result<String, CharSetError> {
        let err = || CharSetError { kind: self };
        match self {
            StringKind::Printable | StringKind::Ia5 => {
                if content.is_ascii() {
                    Ok(content.iter().map(|&b| char::from(b)).collect())
                } else {
                    Err(err())
                }
            }
            // T.61 content is read as ISO 8859-1
            StringKind::Teletex => Ok(content.iter().map(|&b| char::from(b)).collect()),
            StringKind::Utf8 => String::from_utf8(content.to_vec()).map_err(|_| err()),
            StringKind::Bmp => {
                if content.len() % 2 != 0 {
                    return Err(err());
                }
                content
                    .chunks_exact(2)
                    .map(|chunk| char::from_u32(u32::from(u16::from_be_bytes([chunk[0], chunk[1]]))).ok_or_else(err))
                    .collect()
            }
            StringKind::Universal => {
                if content.len() % 4 != 0 {
                    return Err(err());
                }
                content
                    .chunks_exact(4)
                    .map(|chunk| {
                        char::from_u32(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])).ok_or_else(err)
                    })
                    .collect()
            }
        }
    }

    /// Encodes `value` into content octets of this kind.
    pub fn encode(self, value: &str) -> Result<Vec<u8>, CharSetError> {
        let err = || CharSetError { kind: self };
        match self {
            StringKind::Printable if is_printable_str(value) => Ok(value.as_bytes().to_vec()),
            StringKind::Ia5 if value.is_ascii() => Ok(value.as_bytes().to_vec()),
            StringKind::Printable | StringKind::Ia5 => Err(err()),
            StringKind::Teletex => value
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| err()))
                .collect(),
            StringKind::Utf8 => Ok(value.as_bytes().to_vec()),
            StringKind::Bmp => {
                let mut buffer = Vec::with_capacity(value.len() * 2);
                for c in value.chars() {
                    let unit = u16::try_from(u32::from(c)).map_err(|_| err())?;
                    buffer.extend_from_slice(&unit.to_be_bytes());
                }
                Ok(buffer)
            }
            StringKind::Universal => Ok(value.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect()),
        }
    }
}

impl fmt::Display for StringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tag(), f)
    }
}

/// PrintableString character class: `A-Z a-z 0-9 ' ( ) + , - . / : = ?` and space.
pub fn is_printable_char(c: char) -> bool {
    matches!(
        c,
        'A'..='Z' | 'a'..='z' | '0'..='9' | ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '?'
    )
}

pub fn is_printable_str(s: &str) -> bool {
    s.chars().all(is_printable_char)
}
