use crate::parser::SyntaxError;
use std::io;
use thiserror::Error;
use x500_asn1::OidError;
use x500_asn1_der::Asn1DerError;

#[derive(Debug, Error)]
pub enum NameError {
    /// textual name doesn't follow the RFC 1779 / RFC 2253 grammar
    #[error("invalid name `{input}`: {source}")]
    InvalidNameSyntax { input: String, source: SyntaxError },

    /// bytes are not a well-formed DER `Name`
    #[error("invalid DER encoding: {source}")]
    InvalidDerEncoding {
        #[from]
        source: Asn1DerError,
    },

    /// object identifier supplied through a keyword map is malformed
    #[error("invalid object identifier `{oid}`: {source}")]
    InvalidOidSyntax { oid: String, source: OidError },

    /// format name is not one of RFC1779, RFC2253 or CANONICAL
    #[error("unsupported name format: {format}")]
    UnsupportedFormat { format: String },

    /// keyword supplied through an OID map can't be used as an attribute type
    #[error("invalid keyword `{keyword}` for {oid}")]
    InvalidKeyword { oid: String, keyword: String },

    /// reading from a stream failed and its position couldn't be restored
    #[error(
        "couldn't read name from stream: {source}{}",
        .reset_error.as_ref().map(|e| format!(" (stream reset failed: {e})")).unwrap_or_default()
    )]
    StreamReset {
        source: Box<NameError>,
        reset_error: Option<io::Error>,
    },
}
