use crate::misc::{map_eof, read_one, Length};
use crate::{Asn1DerError, Result};
use std::io::Read;
use x500_asn1::{ObjectIdentifier, Tag};

/// One encoded value: identifier, content octets and the full encoding they were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub tag: Tag,
    pub content: &'a [u8],
    pub encoded: &'a [u8],
}

/// Walks the values laid out back to back in a byte slice.
#[derive(Debug, Clone)]
pub struct DerReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Reads the next value, whatever its tag.
    pub fn read_tlv(&mut self) -> Result<Tlv<'a>> {
        let start = self.pos;
        let rest = &self.data[start..];

        let tag = Tag::from(*rest.first().ok_or(Asn1DerError::TruncatedData)?);
        if tag.is_high_tag_number() {
            debug_log!("read_tlv: UNSUPPORTED high tag number form ({:#04x})", tag.number());
            return Err(Asn1DerError::UnsupportedTag(tag));
        }

        let (len, len_octets) = Length::decode(&rest[1..])?;
        let header = 1 + len_octets;
        let end = header.checked_add(len).ok_or(Asn1DerError::UnsupportedLength)?;
        if end > rest.len() {
            debug_log!("read_tlv: TRUNCATED DATA ({} needs {} bytes, {} left)", tag, end, rest.len());
            return Err(Asn1DerError::TruncatedData);
        }

        self.pos = start + end;
        debug_log!("{} ({} bytes)", tag, len);

        Ok(Tlv {
            tag,
            content: &rest[header..end],
            encoded: &rest[..end],
        })
    }

    /// Reads the next value and checks its tag.
    pub fn read_expected(&mut self, expected: Tag) -> Result<Tlv<'a>> {
        let tlv = self.read_tlv()?;
        if tlv.tag != expected {
            debug_log!("read_expected: INVALID (found {}, expected {})", tlv.tag, expected);
            return Err(Asn1DerError::UnexpectedTag {
                expected,
                actual: tlv.tag,
            });
        }
        Ok(tlv)
    }

    /// Fails if any byte is left unread.
    pub fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(Asn1DerError::TrailingData(n)),
        }
    }
}

/// Reads exactly one value from `reader` and returns its full encoding.
///
/// Nothing past the end of the value is consumed.
pub fn read_tlv_from(reader: &mut impl Read) -> Result<Vec<u8>> {
    debug_log!("reading one value using `read_tlv_from`");

    let tag = Tag::from(read_one(reader)?);
    if tag.is_high_tag_number() {
        return Err(Asn1DerError::UnsupportedTag(tag));
    }

    let mut encoded = vec![tag.number()];
    let len = Length::read_from(reader, &mut encoded)?;

    let header = encoded.len();
    let read = reader
        .take(len as u64)
        .read_to_end(&mut encoded)
        .map_err(map_eof)?;
    if read != len {
        debug_log!("read_tlv_from: TRUNCATED DATA ({} of {} content bytes)", read, len);
        return Err(Asn1DerError::TruncatedData);
    }
    debug_assert_eq!(encoded.len(), header + len);

    Ok(encoded)
}

/// Decodes OBJECT IDENTIFIER content octets.
pub fn decode_oid(content: &[u8]) -> Result<ObjectIdentifier> {
    if content.is_empty() {
        return Err(Asn1DerError::InvalidData("empty object identifier"));
    }

    let mut arcs = Vec::with_capacity(content.len() + 1);
    let mut value: u128 = 0;
    let mut at_start = true;

    for &byte in content {
        if at_start && byte == 0x80 {
            return Err(Asn1DerError::InvalidData("non-minimal object identifier subidentifier"));
        }
        if value > u128::MAX >> 7 {
            return Err(Asn1DerError::InvalidData("object identifier arc is too large"));
        }
        value = (value << 7) | u128::from(byte & 0x7F);
        at_start = byte & 0x80 == 0;

        if at_start {
            if arcs.is_empty() {
                let (first, second) = match value {
                    0..=39 => (0, value),
                    40..=79 => (1, value - 40),
                    _ => (2, value - 80),
                };
                arcs.push(first);
                arcs.push(h_arc(second)?);
            } else {
                arcs.push(h_arc(value)?);
            }
            value = 0;
        }
    }

    if !at_start {
        debug_log!("decode_oid: TRUNCATED DATA (last subidentifier is unterminated)");
        return Err(Asn1DerError::TruncatedData);
    }

    Ok(ObjectIdentifier::from_arcs(arcs)?)
}

fn h_arc(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| Asn1DerError::InvalidData("object identifier arc is too large"))
}
