//! Attribute type OIDs found in distinguished names

use x500_asn1::ObjectIdentifier;

macro_rules! define_oid {
    ($uppercase:ident => [$($arc:literal),+]) => {
        pub const $uppercase: ObjectIdentifier = ObjectIdentifier::from_static(&[$($arc),+]);
    };
    ( $( $uppercase:ident => [$($arc:literal),+], )+ ) => {
        $( define_oid! { $uppercase => [$($arc),+] } )+
    };
}

define_oid! {
    // X.520 attribute types
    AT_COMMON_NAME => [2, 5, 4, 3],
    AT_SURNAME => [2, 5, 4, 4],
    AT_SERIAL_NUMBER => [2, 5, 4, 5],
    AT_COUNTRY_NAME => [2, 5, 4, 6],
    AT_LOCALITY_NAME => [2, 5, 4, 7],
    AT_STATE_OR_PROVINCE_NAME => [2, 5, 4, 8],
    AT_STREET_ADDRESS => [2, 5, 4, 9],
    AT_ORGANIZATION_NAME => [2, 5, 4, 10],
    AT_ORGANIZATIONAL_UNIT_NAME => [2, 5, 4, 11],
    AT_TITLE => [2, 5, 4, 12],
    AT_GIVEN_NAME => [2, 5, 4, 42],
    AT_INITIALS => [2, 5, 4, 43],
    AT_GENERATION_QUALIFIER => [2, 5, 4, 44],
    AT_DN_QUALIFIER => [2, 5, 4, 46],

    // RFC 4519 (COSINE)
    USER_ID => [0, 9, 2342, 19200300, 100, 1, 1],
    DOMAIN_COMPONENT => [0, 9, 2342, 19200300, 100, 1, 25],

    // PKCS #9
    EMAIL_ADDRESS => [1, 2, 840, 113549, 1, 9, 1], // deprecated

    // Sun
    IP_ADDRESS => [1, 3, 6, 1, 4, 1, 42, 2, 11, 2, 1],
}
