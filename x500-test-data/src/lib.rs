//! Test data shared between the x500 crates.
//!
//! Each DER blob is a `Name` (RDNSequence) stored root first. The matching string constant is its
//! RFC 2253 rendering.

// CN=Duke, OU=JavaSoft, O=Sun Microsystems, C=US, all PrintableString
pub const DUKE_DER: &[u8] = include_bytes!("../test_assets/names/duke.der");
pub const DUKE_RFC2253: &str = "CN=Duke,OU=JavaSoft,O=Sun Microsystems,C=US";

// OU=Sales+CN=J. Smith, O=Widget Inc., C=US with the multi-valued RDN in that order
pub const MULTI_VALUED_DER: &[u8] = include_bytes!("../test_assets/names/multi_valued.der");
pub const MULTI_VALUED_RFC2253: &str = "OU=Sales+CN=J. Smith,O=Widget Inc.,C=US";

// CN=Émile, O=Café as UTF8String
pub const UTF8_DER: &[u8] = include_bytes!("../test_assets/names/utf8.der");
pub const UTF8_RFC2253: &str = "CN=\u{c9}mile,O=Caf\u{e9}";

// emailAddress and domainComponent values as IA5String
pub const EMAIL_DC_DER: &[u8] = include_bytes!("../test_assets/names/email_dc.der");
pub const EMAIL_DC_RFC2253: &str = "1.2.840.113549.1.9.1=duke@example.com+CN=Duke,DC=example,DC=com";

// CN=Zoë as BMPString
pub const BMP_DER: &[u8] = include_bytes!("../test_assets/names/bmp.der");
pub const BMP_RFC2253: &str = "CN=Zo\u{eb}";

// 1.2.3.4 bound to the OCTET STRING "Hi"
pub const OCTET_STRING_VALUE_DER: &[u8] = include_bytes!("../test_assets/names/octet_string_value.der");
pub const OCTET_STRING_VALUE_RFC2253: &str = "1.2.3.4=#04024869";

pub const EMPTY_DER: &[u8] = include_bytes!("../test_assets/names/empty.der");
