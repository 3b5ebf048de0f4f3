use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::value::RawValue;

use crate::CodecError;

/// Packed drawing: one UTF-16 code unit per 16 pixels.
///
/// Units are kept raw rather than as a Rust `String` because a group can land
/// in the surrogate range (0xD800..=0xDFFF), which no `char` can hold.
///
/// JSON form is always a string; lone surrogates travel as `\uXXXX` escapes.
/// An array of integer units is also accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PackedPixels(Vec<u16>);

impl PackedPixels {
    pub fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Length in code units, the same length a browser reports for the string.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Storage form: two big-endian bytes per unit.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|u| u.to_be_bytes()).collect()
    }

    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() % 2 != 0 {
            return Err(CodecError::OddByteCount(bytes.len()));
        }
        Ok(Self(
            bytes
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect(),
        ))
    }
}

impl From<&str> for PackedPixels {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

/// Lossy for lone surrogates, which render as U+FFFD.
impl fmt::Display for PackedPixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in char::decode_utf16(self.0.iter().copied()) {
            write!(f, "{}", c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl Serialize for PackedPixels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(json_string(&self.0)).map_err(ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PackedPixels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get().trim();
        if text.starts_with('[') {
            return serde_json::from_str::<Vec<u16>>(text)
                .map(PackedPixels)
                .map_err(de::Error::custom);
        }
        units_from_json_string(text).map(PackedPixels).ok_or_else(|| {
            de::Error::invalid_type(
                de::Unexpected::Other(text),
                &"a packed pixel string or an array of UTF-16 code units",
            )
        })
    }
}

/// Quote `units` as a JSON string. Lone surrogates become `\uXXXX` escapes,
/// the same text a browser's `JSON.stringify` produces.
fn json_string(units: &[u16]) -> String {
    let mut out = String::with_capacity(units.len() + 2);
    out.push('"');
    for c in char::decode_utf16(units.iter().copied()) {
        match c {
            Ok('"') => out.push_str("\\\""),
            Ok('\\') => out.push_str("\\\\"),
            Ok(c) if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            Ok(c) => out.push(c),
            Err(e) => out.push_str(&format!("\\u{:04x}", e.unpaired_surrogate())),
        }
    }
    out.push('"');
    out
}

/// Decode a JSON string literal into UTF-16 units without pairing `\u`
/// escapes, so lone surrogates survive.
fn units_from_json_string(text: &str) -> Option<Vec<u16>> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut units = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let unit = match chars.next()? {
            '"' => 0x22,
            '\\' => 0x5C,
            '/' => 0x2F,
            'b' => 0x08,
            'f' => 0x0C,
            'n' => 0x0A,
            'r' => 0x0D,
            't' => 0x09,
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                u16::from_str_radix(&hex, 16).ok()?
            }
            _ => return None,
        };
        units.push(unit);
    }
    Some(units)
}
