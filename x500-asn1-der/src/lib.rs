//! Minimal ASN.1-DER reader and writer.
//!
//! Only what X.500 names need is covered: definite lengths, low tag number form identifiers,
//! constructed values walked through [`DerReader`] and built through [`DerWriter`], and
//! OBJECT IDENTIFIER content octets.

#[macro_use]
mod debug_log;

mod de;
mod misc;
mod ser;

pub use de::{decode_oid, read_tlv_from, DerReader, Tlv};
pub use misc::Length;
pub use ser::{encode_oid, DerWriter};

use std::io;
use thiserror::Error;
use x500_asn1::{OidError, Tag};

pub type Result<T> = std::result::Result<T, Asn1DerError>;

#[derive(Debug, Error)]
pub enum Asn1DerError {
    /// input ended in the middle of a value
    #[error("truncated data")]
    TruncatedData,

    /// encoding is structurally invalid
    #[error("invalid data: {0}")]
    InvalidData(&'static str),

    /// a value of another type was found where a specific one is required
    #[error("expected {expected} but found {actual}")]
    UnexpectedTag { expected: Tag, actual: Tag },

    /// indefinite or reserved length form, or a length that doesn't fit in memory
    #[error("unsupported length encoding")]
    UnsupportedLength,

    /// high tag number form
    #[error("unsupported tag {0:?}")]
    UnsupportedTag(Tag),

    /// bytes left after the outermost value
    #[error("{0} trailing byte(s) after the encoded value")]
    TrailingData(usize),

    /// object identifier content decodes to an invalid identifier
    #[error(transparent)]
    InvalidOid(#[from] OidError),

    /// underlying reader failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
