//! ASN.1 primitive types shared by the X.500 name crates.

pub mod oid;
pub mod restricted_string;
pub mod tag;

pub use oid::{ObjectIdentifier, OidError};
pub use restricted_string::{CharSetError, StringKind};
pub use tag::Tag;
