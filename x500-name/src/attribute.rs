use std::fmt;
use x500_asn1::restricted_string::is_printable_str;
use x500_asn1::{CharSetError, ObjectIdentifier, StringKind, Tag};
use x500_asn1_der::{Asn1DerError, DerReader, DerWriter, Tlv};

/// The value of an attribute, kept as the complete DER encoding it was read from or built as.
///
/// ```not_rust
/// AttributeValue ::= ANY -- DEFINED BY AttributeType
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AttributeValue {
    encoded: Vec<u8>,
    header_len: usize,
}

impl AttributeValue {
    /// Takes exactly one DER value.
    pub fn from_der(encoded: &[u8]) -> Result<Self, Asn1DerError> {
        let mut reader = DerReader::new(encoded);
        let tlv = reader.read_tlv()?;
        reader.finish()?;
        Ok(Self::from_tlv(tlv))
    }

    pub(crate) fn from_tlv(tlv: Tlv<'_>) -> Self {
        Self {
            encoded: tlv.encoded.to_vec(),
            header_len: tlv.encoded.len() - tlv.content.len(),
        }
    }

    /// Encodes `value` as a string of the given kind.
    pub fn from_string(kind: StringKind, value: &str) -> Result<Self, CharSetError> {
        let content = kind.encode(value)?;
        let mut writer = DerWriter::new();
        writer.write_tlv(kind.tag(), &content);
        let encoded = writer.into_bytes();
        Ok(Self {
            header_len: encoded.len() - content.len(),
            encoded,
        })
    }

    /// PrintableString or UTF8String value. PrintableString is a subset of ASCII so both take the UTF-8 bytes as is.
    pub(crate) fn from_utf8_bytes(tag: Tag, value: &str) -> Self {
        let mut writer = DerWriter::new();
        writer.write_tlv(tag, value.as_bytes());
        let encoded = writer.into_bytes();
        Self {
            header_len: encoded.len() - value.len(),
            encoded,
        }
    }

    pub fn tag(&self) -> Tag {
        Tag::from(self.encoded[0])
    }

    pub fn content(&self) -> &[u8] {
        &self.encoded[self.header_len..]
    }

    /// Complete DER encoding, tag and length included.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn string_kind(&self) -> Option<StringKind> {
        StringKind::from_tag(self.tag())
    }

    /// Decoded text when the value is a string whose content is valid for its kind.
    pub fn as_string(&self) -> Option<String> {
        self.string_kind()?.decode(self.content()).ok()
    }

    /// `#` followed by the lowercase hex of the complete encoding.
    pub fn to_hex_string(&self) -> String {
        format!("#{}", hex::encode(&self.encoded))
    }

    /// Text of the value, falling back to the hex form for anything that isn't a decodable string.
    pub fn to_text(&self) -> String {
        self.as_string().unwrap_or_else(|| self.to_hex_string())
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_string() {
            Some(text) => write!(f, "AttributeValue({} {:?})", self.tag(), text),
            None => write!(f, "AttributeValue({})", self.to_hex_string()),
        }
    }
}

/// [RFC 5280 #4.1.2.4](https://tools.ietf.org/html/rfc5280#section-4.1.2.4)
///
/// ```not_rust
/// AttributeTypeAndValue ::= SEQUENCE {
///   type     AttributeType,
///   value    AttributeValue }
///
/// AttributeType ::= OBJECT IDENTIFIER
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeTypeAndValue {
    pub ty: ObjectIdentifier,
    pub value: AttributeValue,
}

impl AttributeTypeAndValue {
    pub fn new(ty: ObjectIdentifier, value: AttributeValue) -> Self {
        Self { ty, value }
    }

    /// Attribute with a string value, PrintableString when the text allows it and UTF8String otherwise.
    pub fn new_string(ty: ObjectIdentifier, value: &str) -> Self {
        let tag = if is_printable_str(value) {
            Tag::PRINTABLE_STRING
        } else {
            Tag::UTF8_STRING
        };
        Self {
            ty,
            value: AttributeValue::from_utf8_bytes(tag, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oids;
    use pretty_assertions::assert_eq;

    #[test]
    fn printable_value() {
        let value = AttributeValue::from_string(StringKind::Printable, "Duke").unwrap();
        assert_eq!(value.encoded(), &[0x13, 0x04, b'D', b'u', b'k', b'e']);
        assert_eq!(value.tag(), Tag::PRINTABLE_STRING);
        assert_eq!(value.content(), b"Duke");
        assert_eq!(value.as_string().as_deref(), Some("Duke"));
        assert_eq!(format!("{value:?}"), "AttributeValue(PrintableString \"Duke\")");
    }

    #[test]
    fn opaque_value() {
        let value = AttributeValue::from_der(&[0x04, 0x02, 0x48, 0x69]).unwrap();
        assert_eq!(value.string_kind(), None);
        assert_eq!(value.as_string(), None);
        assert_eq!(value.to_text(), "#04024869");
        assert_eq!(format!("{value:?}"), "AttributeValue(#04024869)");
    }

    #[test]
    fn undecodable_string_falls_back_to_hex() {
        let value = AttributeValue::from_der(&[0x0C, 0x01, 0xFF]).unwrap();
        assert_eq!(value.string_kind(), Some(StringKind::Utf8));
        assert_eq!(value.as_string(), None);
        assert_eq!(value.to_text(), "#0c01ff");
    }

    #[test]
    fn exactly_one_value() {
        assert!(matches!(
            AttributeValue::from_der(&[0x13, 0x01, 0x41, 0x00]),
            Err(Asn1DerError::TrailingData(1))
        ));
        assert!(matches!(
            AttributeValue::from_der(&[0x13, 0x02, 0x41]),
            Err(Asn1DerError::TruncatedData)
        ));
    }

    #[test]
    fn string_kind_choice() {
        let printable = AttributeTypeAndValue::new_string(oids::AT_COMMON_NAME, "J. Smith");
        assert_eq!(printable.value.tag(), Tag::PRINTABLE_STRING);

        let utf8 = AttributeTypeAndValue::new_string(oids::AT_COMMON_NAME, "duke@sun.com");
        assert_eq!(utf8.value.tag(), Tag::UTF8_STRING);
        assert_eq!(utf8.value.content(), b"duke@sun.com");
    }
}
