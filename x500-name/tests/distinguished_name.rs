use expect_test::{expect, Expect};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use x500_name::{DistinguishedName, NameError, NameFormat, SyntaxError};

fn render_all(input: &str) -> String {
    let name = DistinguishedName::parse(input).unwrap();
    let mut out = String::new();
    for format in [NameFormat::Rfc1779, NameFormat::Rfc2253, NameFormat::Canonical] {
        out.push_str(&format!("{format}: {}\n", name.name(format)));
    }
    out
}

const EXPECTED_DUKE: Expect = expect![[r#"
    RFC1779: CN=Duke, OU=JavaSoft, O=Sun Microsystems, C=US
    RFC2253: CN=Duke,OU=JavaSoft,O=Sun Microsystems,C=US
    CANONICAL: 2.5.4.3=duke,2.5.4.11=javasoft,2.5.4.10=sun microsystems,2.5.4.6=us
"#]];
const EXPECTED_MULTI_VALUED: Expect = expect![[r#"
    RFC1779: OU=Sales + CN=J. Smith, O=Widget Inc., C=US
    RFC2253: OU=Sales+CN=J. Smith,O=Widget Inc.,C=US
    CANONICAL: 2.5.4.3=j. smith+2.5.4.11=sales,2.5.4.10=widget inc.,2.5.4.6=us
"#]];
const EXPECTED_QUOTED_AND_RFC2253_ONLY: Expect = expect![[r#"
    RFC1779: CN="Sun, Inc.", STREET="1 Main  St", OID.0.9.2342.19200300.100.1.25=example
    RFC2253: CN=Sun\, Inc.,STREET=1 Main  St,DC=example
    CANONICAL: 2.5.4.3=sun\, inc.,2.5.4.9=1 main st,0.9.2342.19200300.100.1.25=example
"#]];
const EXPECTED_NUMERIC_TYPES: Expect = expect![[r#"
    RFC1779: OID.1.2.3.4=#04024869 + OID.2.5.4.4=Doe, OID.1.2.840.113549.1.9.1=jd@example.com
    RFC2253: 1.2.3.4=#04024869+2.5.4.4=Doe,1.2.840.113549.1.9.1=jd@example.com
    CANONICAL: 1.2.3.4=#04024869+2.5.4.4=doe,1.2.840.113549.1.9.1=jd@example.com
"#]];

#[rstest]
#[case("CN=Duke, OU=JavaSoft, O=Sun Microsystems, C=US", EXPECTED_DUKE)]
#[case("OU=Sales+CN=J. Smith, O=Widget Inc., C=US", EXPECTED_MULTI_VALUED)]
#[case(
    "CN=\"Sun, Inc.\", STREET=  1 Main  St , DC=example",
    EXPECTED_QUOTED_AND_RFC2253_ONLY
)]
#[case("1.2.3.4=#04024869+SURNAME=Doe, EMAIL=jd@example.com", EXPECTED_NUMERIC_TYPES)]
fn renderings(#[case] input: &str, #[case] expected: Expect) {
    expected.assert_eq(&render_all(input));
}

#[test]
fn duke() {
    let name = DistinguishedName::parse("CN=Duke, OU=JavaSoft, O=Sun Microsystems, C=US").unwrap();
    assert_eq!(name.name(NameFormat::Rfc2253), x500_test_data::DUKE_RFC2253);
    assert_eq!(name.to_der(), x500_test_data::DUKE_DER);
    assert_eq!(name.find_common_name().as_deref(), Some("Duke"));

    let decoded = DistinguishedName::from_der(&name.to_der()).unwrap();
    assert_eq!(decoded.name(NameFormat::Rfc2253), x500_test_data::DUKE_RFC2253);
    assert_eq!(decoded, name);
}

#[rstest]
#[case(x500_test_data::DUKE_DER, x500_test_data::DUKE_RFC2253)]
#[case(x500_test_data::MULTI_VALUED_DER, x500_test_data::MULTI_VALUED_RFC2253)]
#[case(x500_test_data::UTF8_DER, x500_test_data::UTF8_RFC2253)]
#[case(x500_test_data::EMAIL_DC_DER, x500_test_data::EMAIL_DC_RFC2253)]
#[case(x500_test_data::BMP_DER, x500_test_data::BMP_RFC2253)]
#[case(x500_test_data::OCTET_STRING_VALUE_DER, x500_test_data::OCTET_STRING_VALUE_RFC2253)]
#[case(x500_test_data::EMPTY_DER, "")]
fn der_round_trip(#[case] der: &[u8], #[case] rfc2253: &str) {
    let name = DistinguishedName::from_der(der).unwrap();
    assert_eq!(name.to_der(), der);
    assert_eq!(name.name(NameFormat::Rfc2253), rfc2253);

    let again = DistinguishedName::from_der(&name.to_der()).unwrap();
    assert_eq!(again.name(NameFormat::Rfc2253), rfc2253);
}

#[rstest]
#[case(x500_test_data::DUKE_DER)]
#[case(x500_test_data::MULTI_VALUED_DER)]
#[case(x500_test_data::UTF8_DER)]
#[case(x500_test_data::OCTET_STRING_VALUE_DER)]
fn text_round_trip_keeps_der(#[case] der: &[u8]) {
    // PrintableString and UTF8String values come back with the same string kind
    let name = DistinguishedName::from_der(der).unwrap();
    let reparsed = DistinguishedName::parse(&name.name(NameFormat::Rfc2253)).unwrap();
    assert_eq!(reparsed.to_der(), der);
    assert_eq!(reparsed, name);
}

#[test]
fn other_string_kinds_compare_as_hex() {
    let name = DistinguishedName::from_der(x500_test_data::EMAIL_DC_DER).unwrap();
    assert_eq!(
        name.name(NameFormat::Canonical),
        concat!(
            "2.5.4.3=duke+1.2.840.113549.1.9.1=#161064756b65406578616d706c652e636f6d,",
            "0.9.2342.19200300.100.1.25=#16076578616d706c65,",
            "0.9.2342.19200300.100.1.25=#1603636f6d",
        )
    );

    let bmp = DistinguishedName::from_der(x500_test_data::BMP_DER).unwrap();
    assert_eq!(bmp.name(NameFormat::Canonical), "2.5.4.3=#1e06005a006f00eb");
    assert_ne!(bmp, DistinguishedName::parse("CN=Zo\u{eb}").unwrap());
}

#[rstest]
#[case("CN=Duke, OU=JavaSoft, O=Sun Microsystems, C=US")]
#[case("OU=Eng+CN=Bob+1.2.3=x+DC=org")]
#[case("CN=a\\,b\\;c\\+d, O=\\\"quoted\\\" \\<x\\>")]
#[case("CN=\\#hash, O=  lots   of   space  ")]
#[case("CN=\\ ")]
#[case("CN=#160141")]
#[case("CN=\u{c9}mile \u{fb01}ne STRA\u{df}E")]
#[case("0.09.1=x, 2.5.4.3=a=b")]
#[case("CN=x\u{ff0c}y")]
#[case("CN=\u{ff03}x\u{fe68}y\u{ff0b}z")]
#[case("CN=\u{a8}x")]
#[case("")]
fn canonical_is_idempotent(#[case] input: &str) {
    let canonical = DistinguishedName::parse(input).unwrap().name(NameFormat::Canonical);
    let again = DistinguishedName::parse(&canonical).unwrap().name(NameFormat::Canonical);
    assert_eq!(again, canonical);
}

#[test]
fn compatibility_separators_stay_in_their_value() {
    let fullwidth_comma = DistinguishedName::parse("CN=x\u{ff0c}y").unwrap();
    assert_eq!(fullwidth_comma.name(NameFormat::Canonical), "2.5.4.3=x\\,y");
    assert_eq!(fullwidth_comma, DistinguishedName::parse("CN=x\\,y").unwrap());

    let one_rdn = DistinguishedName::parse("CN=a\u{ff0c}2.5.4.3=b").unwrap();
    let two_rdns = DistinguishedName::parse("CN=a, CN=b").unwrap();
    assert_eq!(one_rdn.name(NameFormat::Canonical), "2.5.4.3=a\\,2.5.4.3=b");
    assert_eq!(two_rdns.name(NameFormat::Canonical), "2.5.4.3=a,2.5.4.3=b");
    assert_ne!(one_rdn, two_rdns);
}

#[test]
fn leading_zeros_in_oid_arcs_are_dropped() {
    let name = DistinguishedName::parse("0.09.1=x").unwrap();
    assert_eq!(name.name(NameFormat::Canonical), "0.9.1=x");
    assert_eq!(name.name(NameFormat::Rfc2253), "0.9.1=x");
}

#[test]
fn oid_only_attribute_in_every_format() {
    let name = DistinguishedName::parse("1.2.3.4=X").unwrap();
    assert_eq!(name.name(NameFormat::Rfc2253), "1.2.3.4=X");
    assert_eq!(name.name(NameFormat::Rfc1779), "OID.1.2.3.4=X");
    assert_eq!(name.name(NameFormat::Canonical), "1.2.3.4=x");

    for format in [NameFormat::Rfc1779, NameFormat::Rfc2253, NameFormat::Canonical] {
        let reparsed = DistinguishedName::parse(&name.name(format)).unwrap();
        assert_eq!(reparsed, name, "{format}");
    }
}

#[test]
fn multi_valued_order_is_irrelevant() {
    let a = DistinguishedName::parse("OU=Eng+CN=Bob").unwrap();
    let b = DistinguishedName::parse("CN=Bob+OU=Eng").unwrap();
    assert_eq!(a.name(NameFormat::Canonical), "2.5.4.3=bob+2.5.4.11=eng");
    assert_eq!(a, b);
    assert_eq!(a.name(NameFormat::Rfc2253), "OU=Eng+CN=Bob");
    assert_eq!(b.name(NameFormat::Rfc2253), "CN=Bob+OU=Eng");
}

#[test]
fn case_and_whitespace() {
    let a = DistinguishedName::parse("CN=Duke, O=Sun").unwrap();
    let b = DistinguishedName::parse("cn=Duke,   o=Sun").unwrap();
    let shouting = DistinguishedName::parse("CN=DUKE, O=SUN").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, shouting);
    assert_eq!(b.name(NameFormat::Rfc2253), "CN=Duke,O=Sun");
    assert_eq!(shouting.name(NameFormat::Rfc2253), "CN=DUKE,O=SUN");
}

#[test]
fn equality_and_hash_follow_canonical_form() {
    fn hash_of(name: &DistinguishedName) -> u64 {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        hasher.finish()
    }

    let inputs = [
        "CN=Duke,O=Sun",
        "cn=duke, o=sun",
        "CN=  Duke , O=Sun  ",
        "2.5.4.3=Duke;2.5.4.10=Sun",
        "CN=Duke,O=Oracle",
        "CN=Duke",
    ];
    let names: Vec<DistinguishedName> = inputs.iter().map(|s| s.parse().unwrap()).collect();

    for a in &names {
        for b in &names {
            let same_canonical = a.name(NameFormat::Canonical) == b.name(NameFormat::Canonical);
            assert_eq!(a == b, same_canonical, "{a} / {b}");
            if same_canonical {
                assert_eq!(hash_of(a), hash_of(b));
            }
        }
    }

    let set: HashSet<DistinguishedName> = names.into_iter().collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn rfc1779_output_parses_back() {
    let name = DistinguishedName::parse("CN=Sun\\, Inc.+OU=\\\"Q\\\", O=a\\\\b, L=  two  spaces").unwrap();
    let rfc1779 = name.name(NameFormat::Rfc1779);
    assert_eq!(rfc1779, "CN=\"Sun, Inc.\" + OU=\\\"Q\\\", O=a\\\\b, L=\"two  spaces\"");
    assert_eq!(DistinguishedName::parse(&rfc1779).unwrap().to_der(), name.to_der());
}

#[test]
fn escaped_unicode() {
    let name = DistinguishedName::parse("CN=Caf\\C3\\A9 \\+ Bar").unwrap();
    assert_eq!(name.find_common_name().as_deref(), Some("Caf\u{e9} + Bar"));
    assert_eq!(name.name(NameFormat::Rfc2253), "CN=Caf\u{e9} \\+ Bar");
    assert_eq!(name.name(NameFormat::Rfc1779), "CN=\"Caf\u{e9} + Bar\"");
    assert_eq!(name.name(NameFormat::Canonical), "2.5.4.3=cafe\u{301} \\+ bar");
}

#[test]
fn syntax_errors() {
    let err = DistinguishedName::parse("CN=Duke, O").unwrap_err();
    assert!(matches!(
        err,
        NameError::InvalidNameSyntax {
            source: SyntaxError::MissingEquals { .. },
            ..
        }
    ));
    assert_eq!(err.to_string(), "invalid name `CN=Duke, O`: attribute `O` has no `=`");
    assert!(std::error::Error::source(&err).is_some());

    for input in ["CN=\"Duke", "CN=a,,O=b", "CN=Duke\\", "FOO=bar", "CN=#zz", "CN=\\C3\\28"] {
        assert!(
            matches!(DistinguishedName::parse(input), Err(NameError::InvalidNameSyntax { .. })),
            "{input}"
        );
    }
}

#[test]
fn der_errors() {
    for der in [&[0x31, 0x00][..], &[0x30, 0x02, 0x31, 0x00], &[0x30, 0x00, 0x00], &[0x30, 0x80]] {
        assert!(
            matches!(DistinguishedName::from_der(der), Err(NameError::InvalidDerEncoding { .. })),
            "{der:02x?}"
        );
    }
}

#[test]
fn unsupported_format() {
    let err = "RFC4514".parse::<NameFormat>().unwrap_err();
    assert!(matches!(&err, NameError::UnsupportedFormat { format } if format == "RFC4514"));
    assert_eq!("canonical".parse::<NameFormat>().unwrap(), NameFormat::Canonical);
}

#[test]
fn keyword_map_on_parse() {
    let keyword_map = HashMap::from([("SERIAL".to_owned(), "2.5.4.5".to_owned())]);
    let name = DistinguishedName::parse_with_keywords("serial=42, CN=Duke", &keyword_map).unwrap();
    assert_eq!(name.name(NameFormat::Rfc2253), "2.5.4.5=42,CN=Duke");

    let broken = HashMap::from([("SERIAL".to_owned(), "2.5.4".to_owned()), ("X".to_owned(), "a.b".to_owned())]);
    assert!(DistinguishedName::parse_with_keywords("SERIAL=42", &broken).is_ok());
    assert!(matches!(
        DistinguishedName::parse_with_keywords("X=42", &broken),
        Err(NameError::InvalidOidSyntax { oid, .. }) if oid == "a.b"
    ));
    // unused entries are never looked at
    assert!(DistinguishedName::parse_with_keywords("CN=42", &broken).is_ok());
}

#[test]
fn oid_map_on_output() {
    let name = DistinguishedName::parse("2.5.4.5=42, EMAIL=duke@sun.com, CN=Duke").unwrap();
    let oid_map = HashMap::from([
        ("2.5.4.5".to_owned(), "SERIALNUMBER".to_owned()),
        ("1.2.840.113549.1.9.1".to_owned(), "EMAILADDRESS".to_owned()),
    ]);
    assert_eq!(
        name.name_with_oid_map(NameFormat::Rfc2253, &oid_map).unwrap(),
        "SERIALNUMBER=42,EMAILADDRESS=duke@sun.com,CN=Duke"
    );
    assert_eq!(
        name.name_with_oid_map(NameFormat::Rfc1779, &oid_map).unwrap(),
        "SERIALNUMBER=42, EMAILADDRESS=duke@sun.com, CN=Duke"
    );
    assert_eq!(
        name.name_with_oid_map(NameFormat::Canonical, &oid_map).unwrap(),
        name.name(NameFormat::Canonical)
    );

    let bad = HashMap::from([("2.5.4.3".to_owned(), "common-name".to_owned())]);
    assert!(matches!(
        name.name_with_oid_map(NameFormat::Rfc2253, &bad),
        Err(NameError::InvalidKeyword { oid, keyword }) if oid == "2.5.4.3" && keyword == "common-name"
    ));
}

#[test]
fn serde_persists_der() {
    let name = DistinguishedName::from_der(x500_test_data::MULTI_VALUED_DER).unwrap();
    let json = serde_json::to_string(&name).unwrap();
    let back: DistinguishedName = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_der(), x500_test_data::MULTI_VALUED_DER);
    assert_eq!(back.name(NameFormat::Rfc2253), x500_test_data::MULTI_VALUED_RFC2253);

    assert_eq!(serde_json::to_string(&DistinguishedName::parse("").unwrap()).unwrap(), "[48,0]");
    assert!(serde_json::from_str::<DistinguishedName>("[49,0]").is_err());
}

#[test]
fn is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DistinguishedName>();
}
