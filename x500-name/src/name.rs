use crate::attribute::AttributeValue;
use crate::error::NameError;
use crate::format::{self, NameFormat};
use crate::rdn::RelativeDistinguishedName;
use crate::{der, oids, parser};
use serde::{de, ser};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Seek, SeekFrom};
use std::str::FromStr;
use std::sync::OnceLock;
use x500_asn1::ObjectIdentifier;
use x500_asn1_der::read_tlv_from;

/// An X.500 distinguished name.
///
/// RDNs are held root first, the way they are DER encoded, while every string form lists them
/// most specific first. The DER encoding and the canonical string are computed at most once.
///
/// Two names are equal when their [canonical](NameFormat::Canonical) strings are equal.
///
/// ```
/// use x500_name::{DistinguishedName, NameFormat};
///
/// let name: DistinguishedName = "CN=Duke, OU=JavaSoft, O=Sun Microsystems, C=US".parse()?;
/// assert_eq!(name.name(NameFormat::Rfc2253), "CN=Duke,OU=JavaSoft,O=Sun Microsystems,C=US");
/// assert_eq!(name, "cn=duke,ou=javasoft,o=sun   microsystems,c=us".parse::<DistinguishedName>()?);
/// # Ok::<(), x500_name::NameError>(())
/// ```
#[derive(Clone)]
pub struct DistinguishedName {
    rdns: Vec<RelativeDistinguishedName>,
    der: OnceLock<Vec<u8>>,
    canonical: OnceLock<String>,
}

impl DistinguishedName {
    /// Builds a name from RDNs already ordered root first.
    pub(crate) fn from_rdns(rdns: Vec<RelativeDistinguishedName>) -> Self {
        Self {
            rdns,
            der: OnceLock::new(),
            canonical: OnceLock::new(),
        }
    }

    /// Parses an RFC 1779 or RFC 2253 string.
    pub fn parse(name: &str) -> Result<Self, NameError> {
        Self::parse_with_keywords(name, &HashMap::new())
    }

    /// Parses an RFC 1779 or RFC 2253 string, `keyword_map` adding keyword → OID mappings that
    /// take precedence over the built-in keywords.
    ///
    /// OIDs of `keyword_map` are only checked when their keyword is used.
    pub fn parse_with_keywords(name: &str, keyword_map: &HashMap<String, String>) -> Result<Self, NameError> {
        parser::parse(name, keyword_map)
            .map(Self::from_rdns)
            .map_err(|e| {
                log::debug!("couldn't parse distinguished name: {}", e);
                e
            })
    }

    /// Decodes a DER `Name`. The input is kept as the encoding returned by [`to_der`](Self::to_der).
    pub fn from_der(der: &[u8]) -> Result<Self, NameError> {
        Self::from_der_vec(der.to_vec())
    }

    fn from_der_vec(encoded: Vec<u8>) -> Result<Self, NameError> {
        let rdns = der::decode(&encoded).map_err(|source| {
            log::debug!("couldn't decode distinguished name: {}", source);
            NameError::InvalidDerEncoding { source }
        })?;

        Ok(Self {
            rdns,
            der: OnceLock::from(encoded),
            canonical: OnceLock::new(),
        })
    }

    /// Reads one DER `Name` from `stream`, leaving it positioned right after the value.
    ///
    /// On failure the stream is moved back to where it was. If that fails too, a
    /// [`NameError::StreamReset`] holding both errors is returned.
    pub fn from_stream<R: Read + Seek>(stream: &mut R) -> Result<Self, NameError> {
        let start = stream
            .stream_position()
            .map_err(|e| NameError::InvalidDerEncoding { source: e.into() })?;

        let result = read_tlv_from(stream)
            .map_err(|source| NameError::InvalidDerEncoding { source })
            .and_then(Self::from_der_vec);

        match result {
            Ok(name) => Ok(name),
            Err(e) => match stream.seek(SeekFrom::Start(start)) {
                Ok(_) => {
                    log::debug!("rewound stream to offset {} after failure", start);
                    Err(e)
                }
                Err(reset_error) => {
                    log::debug!("couldn't rewind stream to offset {}: {}", start, reset_error);
                    Err(NameError::StreamReset {
                        source: Box::new(e),
                        reset_error: Some(reset_error),
                    })
                }
            },
        }
    }

    /// Reads one DER `Name` from a stream that can't be rewound.
    ///
    /// Any failure is reported as a [`NameError::StreamReset`] since the consumed bytes are lost.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, NameError> {
        read_tlv_from(reader)
            .map_err(|source| NameError::InvalidDerEncoding { source })
            .and_then(Self::from_der_vec)
            .map_err(|e| NameError::StreamReset {
                source: Box::new(e),
                reset_error: None,
            })
    }

    /// String form of the name.
    pub fn name(&self, format: NameFormat) -> String {
        match format {
            NameFormat::Canonical => self.canonical().to_owned(),
            _ => format::render(&self.rdns, format, &HashMap::new()),
        }
    }

    /// String form of the name, `oid_map` adding OID → keyword mappings that take precedence over
    /// the built-in keywords. The canonical form ignores `oid_map`.
    pub fn name_with_oid_map(
        &self,
        format: NameFormat,
        oid_map: &HashMap<String, String>,
    ) -> Result<String, NameError> {
        format::check_oid_map(&self.rdns, format, oid_map)?;
        Ok(match format {
            NameFormat::Canonical => self.canonical().to_owned(),
            _ => format::render(&self.rdns, format, oid_map),
        })
    }

    fn canonical(&self) -> &str {
        self.canonical.get_or_init(|| format::canonical(&self.rdns))
    }

    fn der(&self) -> &[u8] {
        self.der.get_or_init(|| der::encode(&self.rdns))
    }

    /// DER encoding of the name. Names decoded from DER give back the exact input bytes.
    pub fn to_der(&self) -> Vec<u8> {
        self.der().to_vec()
    }

    /// RDNs, root first.
    pub fn rdns(&self) -> &[RelativeDistinguishedName] {
        &self.rdns
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }

    /// Finds the most specific common name contained in this name.
    pub fn find_common_name(&self) -> Option<String> {
        self.find_attribute(&oids::AT_COMMON_NAME).map(AttributeValue::to_text)
    }

    /// Finds the most specific value of attribute type `oid`.
    pub fn find_attribute(&self, oid: &ObjectIdentifier) -> Option<&AttributeValue> {
        self.rdns.iter().rev().find_map(|rdn| rdn.find(oid))
    }
}

impl FromStr for DistinguishedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for DistinguishedName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for DistinguishedName {}

impl Hash for DistinguishedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name(NameFormat::Rfc2253))
    }
}

impl fmt::Debug for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DistinguishedName({:?})", self.name(NameFormat::Rfc2253))
    }
}

impl ser::Serialize for DistinguishedName {
    fn serialize<S>(&self, serializer: S) -> Result<<S as ser::Serializer>::Ok, <S as ser::Serializer>::Error>
    where
        S: ser::Serializer,
    {
        ser::Serialize::serialize(serde_bytes::Bytes::new(self.der()), serializer)
    }
}

impl<'de> de::Deserialize<'de> for DistinguishedName {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        let encoded: serde_bytes::ByteBuf = de::Deserialize::deserialize(deserializer)?;
        Self::from_der_vec(encoded.into_vec()).map_err(|e| match e {
            NameError::InvalidDerEncoding { source } => {
                de::Error::custom(format!("invalid DER-encoded Name: {source}"))
            }
            other => de::Error::custom(other),
        })
    }
}
