//! DER codec for `Name`.
//!
//! ```not_rust
//! Name ::= CHOICE { -- only one possibility for now --
//!       rdnSequence  RDNSequence }
//!
//! RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
//!
//! RelativeDistinguishedName ::= SET SIZE (1..MAX) OF AttributeTypeAndValue
//!
//! AttributeTypeAndValue ::= SEQUENCE {
//!   type     AttributeType,
//!   value    AttributeValue }
//! ```

use crate::attribute::{AttributeTypeAndValue, AttributeValue};
use crate::rdn::RelativeDistinguishedName;
use x500_asn1::Tag;
use x500_asn1_der::{decode_oid, Asn1DerError, DerReader, DerWriter};

/// Decodes a complete `Name`. RDNs come out root first, as encoded.
pub(crate) fn decode(der: &[u8]) -> Result<Vec<RelativeDistinguishedName>, Asn1DerError> {
    let mut outer = DerReader::new(der);
    let sequence = outer.read_expected(Tag::SEQUENCE)?;
    outer.finish()?;

    let mut rdns = Vec::new();
    let mut sets = DerReader::new(sequence.content);
    while !sets.is_empty() {
        let set = sets.read_expected(Tag::SET)?;

        let mut avas = Vec::new();
        let mut members = DerReader::new(set.content);
        while !members.is_empty() {
            avas.push(decode_ava(&mut members)?);
        }

        let rdn = RelativeDistinguishedName::new(avas)
            .ok_or(Asn1DerError::InvalidData("empty RelativeDistinguishedName"))?;
        rdns.push(rdn);
    }

    Ok(rdns)
}

fn decode_ava(members: &mut DerReader<'_>) -> Result<AttributeTypeAndValue, Asn1DerError> {
    let sequence = members.read_expected(Tag::SEQUENCE)?;
    let mut fields = DerReader::new(sequence.content);
    let ty = decode_oid(fields.read_expected(Tag::OID)?.content)?;
    let value = AttributeValue::from_tlv(fields.read_tlv()?);
    fields.finish()?;
    Ok(AttributeTypeAndValue::new(ty, value))
}

/// Encodes RDNs in stored order, attributes of a multi-valued RDN in their stored order too.
pub(crate) fn encode(rdns: &[RelativeDistinguishedName]) -> Vec<u8> {
    let mut writer = DerWriter::new();
    writer.write_constructed(Tag::SEQUENCE, |name| {
        for rdn in rdns {
            name.write_constructed(Tag::SET, |set| {
                for ava in rdn {
                    set.write_constructed(Tag::SEQUENCE, |sequence| {
                        sequence.write_oid(&ava.ty);
                        sequence.write_raw(ava.value.encoded());
                    });
                }
            });
        }
    });
    writer.into_bytes()
}
