//! X.500 distinguished names
//!
//! Parsing from RFC 1779 / RFC 2253 strings and from DER, rendering to the RFC 1779, RFC 2253 and
//! canonical string forms, and comparison through the canonical form.

mod der;
mod error;
mod format;
mod keyword;
mod name;
mod parser;

pub mod attribute;
pub mod oids;
pub mod rdn;

pub use attribute::{AttributeTypeAndValue, AttributeValue};
pub use error::NameError;
pub use format::NameFormat;
pub use keyword::{keyword_to_oid, oid_to_keyword};
pub use name::DistinguishedName;
pub use parser::SyntaxError;
pub use rdn::RelativeDistinguishedName;

pub use x500_asn1::{ObjectIdentifier, OidError, StringKind, Tag};
