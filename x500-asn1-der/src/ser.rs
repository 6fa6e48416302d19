use crate::misc::Length;
use x500_asn1::{ObjectIdentifier, Tag};

/// Appends DER values to an in-memory buffer.
#[derive(Debug, Default, Clone)]
pub struct DerWriter {
    buf: Vec<u8>,
}

impl DerWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a primitive or already assembled value.
    pub fn write_tlv(&mut self, tag: Tag, content: &[u8]) {
        debug_log!("{} ({} bytes)", tag, content.len());
        self.buf.push(tag.number());
        Length::encode(content.len(), &mut self.buf);
        self.buf.extend_from_slice(content);
    }

    /// Copies a complete encoding as is.
    pub fn write_raw(&mut self, encoded: &[u8]) {
        self.buf.extend_from_slice(encoded);
    }

    /// Writes a constructed value whose content is produced by `content`.
    pub fn write_constructed(&mut self, tag: Tag, content: impl FnOnce(&mut DerWriter)) {
        let mut inner = DerWriter::new();
        content(&mut inner);
        self.write_tlv(tag, &inner.buf);
    }

    pub fn write_oid(&mut self, oid: &ObjectIdentifier) {
        self.write_tlv(Tag::OID, &encode_oid(oid));
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Encodes the content octets of an OBJECT IDENTIFIER.
pub fn encode_oid(oid: &ObjectIdentifier) -> Vec<u8> {
    let arcs = oid.arcs();
    let mut out = Vec::with_capacity(arcs.len() * 2);

    // arcs() always holds at least two arcs
    let first = u128::from(arcs[0]) * 40 + u128::from(arcs[1]);
    h_encode_subidentifier(first, &mut out);
    for &arc in &arcs[2..] {
        h_encode_subidentifier(u128::from(arc), &mut out);
    }

    out
}

fn h_encode_subidentifier(mut value: u128, out: &mut Vec<u8>) {
    let mut tmp = [0u8; 19];
    let mut i = tmp.len();
    let mut continuation = 0;
    loop {
        i -= 1;
        tmp[i] = (value & 0x7F) as u8 | continuation;
        continuation = 0x80;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    out.extend_from_slice(&tmp[i..]);
}
