use crate::ParseError;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Shortest text `parse_mac` will look at, `0123.4567.89ab` being the
/// tightest full notation.
const MIN_ADDRESS_LEN: usize = 14;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

///
/// An IEEE 802 hardware address: MAC-48/EUI-48 (6 bytes) or EUI-64 (8 bytes).
///
/// The byte length is fixed at construction, equality is byte-wise. Displays
/// in canonical form: lowercase two-digit hex groups joined by `:`.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HardwareAddr {
    bytes: Vec<u8>,
}

impl HardwareAddr {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bits in the address, the width a prefix mask has to cover.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Bitwise AND of the address with `mask`, byte by byte.
    ///
    /// Returns `None` when `mask` is not exactly as long as the address; the
    /// two are never truncated or padded to fit.
    pub fn mask(&self, mask: &[u8]) -> Option<HardwareAddr> {
        if self.bytes.len() != mask.len() {
            return None;
        }
        let bytes = self
            .bytes
            .iter()
            .zip(mask.iter())
            .map(|(byte, m)| byte & m)
            .collect();
        Some(HardwareAddr { bytes })
    }
}

impl From<[u8; 6]> for HardwareAddr {
    fn from(bytes: [u8; 6]) -> Self {
        HardwareAddr {
            bytes: bytes.to_vec(),
        }
    }
}

impl From<[u8; 8]> for HardwareAddr {
    fn from(bytes: [u8; 8]) -> Self {
        HardwareAddr {
            bytes: bytes.to_vec(),
        }
    }
}

impl TryFrom<&[u8]> for HardwareAddr {
    type Error = ParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.len() {
            6 | 8 => Ok(HardwareAddr {
                bytes: bytes.to_vec(),
            }),
            len => Err(ParseError::InvalidLength {
                input: render_bytes(bytes),
                len,
            }),
        }
    }
}

impl AsRef<[u8]> for HardwareAddr {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for HardwareAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&render_bytes(&self.bytes))
    }
}

impl FromStr for HardwareAddr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mac(s)
    }
}

fn render_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 3).saturating_sub(1));
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0xf) as usize] as char);
    }
    out
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decodes exactly two hex digits into a byte.
fn hex_byte(digits: &[u8]) -> Option<u8> {
    match digits {
        [hi, lo] => Some(hex_value(*hi)? << 4 | hex_value(*lo)?),
        _ => None,
    }
}

/// Decodes `count` two-digit groups, each but the last followed by `sep`.
fn decode_pair_groups(s: &str, sep: u8, count: usize) -> Result<Vec<u8>, ParseError> {
    let raw = s.as_bytes();
    let mut bytes = Vec::with_capacity(count);
    for i in 0..count {
        let x = i * 3;
        if i + 1 < count && raw[x + 2] != sep {
            return Err(ParseError::BadSeparator(s.to_string()));
        }
        let byte =
            hex_byte(&raw[x..x + 2]).ok_or_else(|| ParseError::InvalidHex(s.to_string()))?;
        bytes.push(byte);
    }
    Ok(bytes)
}

fn is_pair_separator(c: u8) -> bool {
    c == b':' || c == b'-'
}

/// Parses `s` as an IEEE 802 MAC-48, EUI-48 or EUI-64 address in one of the
/// following notations:
///
/// ```text
/// 01:23:45:67:89:ab
/// 01:23:45:67:89:ab:cd:ef
/// 01-23-45-67-89-ab
/// 01-23-45-67-89-ab-cd-ef
/// 0123.4567.89ab
/// 0123.4567.89ab.cdef
/// ```
///
/// The notation is picked from the character at offset 2 (`:` or `-`) or
/// offset 4 (`.`). Anything shorter than 14 characters is rejected up front.
pub fn parse_mac(s: &str) -> Result<HardwareAddr, ParseError> {
    if s.len() < MIN_ADDRESS_LEN {
        return Err(ParseError::TooShort(s.to_string()));
    }

    let raw = s.as_bytes();
    let bytes = if is_pair_separator(raw[2]) {
        if (s.len() + 1) % 3 != 0 {
            return Err(ParseError::InvalidSyntax(s.to_string()));
        }
        let n = (s.len() + 1) / 3;
        if n != 6 && n != 8 {
            return Err(ParseError::InvalidLength {
                input: s.to_string(),
                len: n,
            });
        }
        decode_pair_groups(s, raw[2], n)?
    } else if raw[4] == b'.' {
        if (s.len() + 1) % 5 != 0 {
            return Err(ParseError::InvalidSyntax(s.to_string()));
        }
        let n = 2 * (s.len() + 1) / 5;
        if n != 6 && n != 8 {
            return Err(ParseError::InvalidLength {
                input: s.to_string(),
                len: n,
            });
        }
        let mut bytes = Vec::with_capacity(n);
        for group in 0..n / 2 {
            let x = group * 5;
            if group + 1 < n / 2 && raw[x + 4] != b'.' {
                return Err(ParseError::BadSeparator(s.to_string()));
            }
            let hi = hex_byte(&raw[x..x + 2]);
            let lo = hex_byte(&raw[x + 2..x + 4]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    bytes.push(hi);
                    bytes.push(lo);
                }
                _ => return Err(ParseError::InvalidHex(s.to_string())),
            }
        }
        bytes
    } else {
        return Err(ParseError::InvalidSyntax(s.to_string()));
    };

    Ok(HardwareAddr { bytes })
}

/// Parses a partial address such as `00:1b:c5` into a `size`-byte address,
/// zero-filling the bytes the pattern leaves out.
///
/// Only the colon/hyphen notation is accepted, with at least two groups and
/// no more groups than `size`. Unlike [`parse_mac`] there is no length floor.
/// `size` must be 6 or 8.
pub fn parse_oui(s: &str, size: usize) -> Result<HardwareAddr, ParseError> {
    if size != 6 && size != 8 {
        return Err(ParseError::InvalidLength {
            input: s.to_string(),
            len: size,
        });
    }

    let raw = s.as_bytes();
    if raw.len() < 5 || !is_pair_separator(raw[2]) {
        return Err(ParseError::InvalidSyntax(s.to_string()));
    }
    if (s.len() + 1) % 3 != 0 {
        return Err(ParseError::InvalidSyntax(s.to_string()));
    }
    let n = (s.len() + 1) / 3;
    if n > size {
        return Err(ParseError::InvalidLength {
            input: s.to_string(),
            len: n,
        });
    }

    let mut bytes = decode_pair_groups(s, raw[2], n)?;
    bytes.resize(size, 0);
    Ok(HardwareAddr { bytes })
}
