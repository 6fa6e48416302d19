use crate::attribute::{AttributeTypeAndValue, AttributeValue};
use x500_asn1::ObjectIdentifier;

/// [RFC 5280 #4.1.2.4](https://tools.ietf.org/html/rfc5280#section-4.1.2.4)
///
/// ```not_rust
/// RelativeDistinguishedName ::= SET SIZE (1..MAX) OF AttributeTypeAndValue
/// ```
///
/// Attributes are kept in the order they were parsed or decoded in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelativeDistinguishedName(Vec<AttributeTypeAndValue>);

impl RelativeDistinguishedName {
    /// Returns `None` when `avas` is empty.
    pub fn new(avas: Vec<AttributeTypeAndValue>) -> Option<Self> {
        if avas.is_empty() {
            None
        } else {
            Some(Self(avas))
        }
    }

    pub fn avas(&self) -> &[AttributeTypeAndValue] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeTypeAndValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of the first attribute of type `oid`.
    pub fn find(&self, oid: &ObjectIdentifier) -> Option<&AttributeValue> {
        self.0.iter().find(|ava| ava.ty == *oid).map(|ava| &ava.value)
    }
}

impl<'a> IntoIterator for &'a RelativeDistinguishedName {
    type Item = &'a AttributeTypeAndValue;
    type IntoIter = std::slice::Iter<'a, AttributeTypeAndValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
