use crate::{Asn1DerError, Result};
use std::io::{self, Read};

/// DER length octets.
///
/// Decoding accepts long form lengths with superfluous leading zero octets but rejects the
/// indefinite form (`0x80`) and the reserved `0xFF` initial octet.
pub struct Length;

impl Length {
    /// Decodes the length octets at the start of `bytes` and returns `(length, octets consumed)`.
    pub fn decode(bytes: &[u8]) -> Result<(usize, usize)> {
        let mut consumed = 0;
        let len = Self::h_decode(|| {
            let byte = *bytes.get(consumed).ok_or(Asn1DerError::TruncatedData)?;
            consumed += 1;
            Ok(byte)
        })?;
        Ok((len, consumed))
    }

    /// Reads length octets from `reader`, appending the raw octets to `raw`.
    pub fn read_from(reader: &mut impl Read, raw: &mut Vec<u8>) -> Result<usize> {
        Self::h_decode(|| {
            let byte = read_one(reader)?;
            raw.push(byte);
            Ok(byte)
        })
    }

    /// Appends the minimal encoding of `len` to `out`.
    pub fn encode(len: usize, out: &mut Vec<u8>) {
        if len < 0x80 {
            out.push(len as u8);
        } else {
            let bytes = len.to_be_bytes();
            let skip = bytes.iter().take_while(|&&b| b == 0).count();
            out.push(0x80 | (bytes.len() - skip) as u8);
            out.extend_from_slice(&bytes[skip..]);
        }
    }

    fn h_decode(mut next: impl FnMut() -> Result<u8>) -> Result<usize> {
        let first = next()?;
        match first {
            0x00..=0x7F => Ok(usize::from(first)),
            0x80 => {
                debug_log!("length: INDEFINITE FORM");
                Err(Asn1DerError::UnsupportedLength)
            }
            0xFF => Err(Asn1DerError::UnsupportedLength),
            _ => {
                let count = first & 0x7F;
                let mut len: usize = 0;
                for _ in 0..count {
                    let byte = next()?;
                    len = len
                        .checked_mul(256)
                        .and_then(|len| len.checked_add(usize::from(byte)))
                        .ok_or(Asn1DerError::UnsupportedLength)?;
                }
                Ok(len)
            }
        }
    }
}

pub(crate) fn read_one(reader: &mut impl Read) -> Result<u8> {
    let mut byte = [0u8];
    reader.read_exact(&mut byte).map_err(map_eof)?;
    Ok(byte[0])
}

pub(crate) fn map_eof(e: io::Error) -> Asn1DerError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Asn1DerError::TruncatedData
    } else {
        Asn1DerError::Io(e)
    }
}
