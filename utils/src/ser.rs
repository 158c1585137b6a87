//! Wire formats for the espresso sequencer's JSON APIs.

use std::{fmt, str::FromStr};

use serde::{de::Error as _, Deserialize, Serialize};

/// Errors from decoding wire-format values.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum WireError {
    /// The input does not have the expected shape or syntax.
    #[error("malformed wire value: {0}")]
    Format(String),
    /// A numeric value lies outside the representable range.
    #[error("out of range: {0}")]
    Range(String),
}

/// A bytes type which serializes to JSON as an array of integers, rather than
/// a base64 string. This ensures compatibility with the Espresso APIs.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Converts from the integer-array wire form. Elements outside a byte's
    /// range are an error, never clamped.
    pub fn from_ints(ints: &[i64]) -> Result<Self, WireError> {
        let mut bytes = Vec::with_capacity(ints.len());
        for &n in ints {
            if !(0..=255).contains(&n) {
                return Err(WireError::Range(format!("byte out of range: {n}")));
            }
            bytes.push(n as u8);
        }
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // A plain byte sequence, which `serde_json` renders as an array of
        // integers.
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ints = <Vec<i64> as Deserialize>::deserialize(deserializer)?;
        Self::from_ints(&ints).map_err(D::Error::custom)
    }
}

/// An unsigned 256-bit integer which serializes to JSON as a `0x`-prefixed
/// hex string. This ensures compatibility with the Espresso APIs.
///
/// Output is canonical: lowercase, no redundant leading zeros, zero rendered
/// as `"0x0"`. Input is lenient: uppercase digits, odd digit counts and
/// leading zeros are all accepted.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct U256(pub primitive_types::U256);

impl U256 {
    /// Little-endian fixed-width form, as committed to by the sequencer.
    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_little_endian(&mut bytes);
        bytes
    }
}

impl From<u64> for U256 {
    fn from(n: u64) -> Self {
        Self(primitive_types::U256::from(n))
    }
}

impl From<primitive_types::U256> for U256 {
    fn from(n: primitive_types::U256) -> Self {
        Self(n)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl FromStr for U256 {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| WireError::Format(format!("missing 0x prefix: {s:?}")))?;
        if digits.is_empty() {
            return Err(WireError::Format(format!("no digits after 0x prefix: {s:?}")));
        }
        let digits = digits.trim_start_matches('0');
        if digits.len() > 64 {
            return Err(WireError::Range(format!(
                "integer does not fit in 256 bits: {s:?}"
            )));
        }
        let mut padded = String::with_capacity(digits.len() + 1);
        if digits.len() % 2 == 1 {
            padded.push('0');
        }
        padded.push_str(digits);
        let bytes = hex::decode(&padded)
            .map_err(|err| WireError::Format(format!("invalid hex digits in {s:?}: {err}")))?;
        Ok(Self(primitive_types::U256::from_big_endian(&bytes)))
    }
}

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, RngCore};

    use super::{Bytes, U256, WireError};

    #[test]
    fn u256_encodes_minimal_lowercase_hex() {
        assert_eq!(U256::from(0u64).to_string(), "0x0");
        assert_eq!(U256::from(42u64).to_string(), "0x2a");
        assert_eq!(U256::from(0xdead_beefu64).to_string(), "0xdeadbeef");
    }

    #[test]
    fn u256_decodes_leniently() {
        assert_eq!("0x0".parse::<U256>().unwrap(), U256::from(0u64));
        assert_eq!("0x2a".parse::<U256>().unwrap(), U256::from(42u64));
        // Uppercase digits, leading zeros and odd digit counts are accepted
        // on input even though they are never produced on output.
        assert_eq!("0x2A".parse::<U256>().unwrap(), U256::from(42u64));
        assert_eq!("0x002a".parse::<U256>().unwrap(), U256::from(42u64));
        assert_eq!("0xabc".parse::<U256>().unwrap(), U256::from(0xabcu64));
        assert_eq!("0x0000".parse::<U256>().unwrap(), U256::from(0u64));
    }

    #[test]
    fn u256_rejects_malformed_strings() {
        for s in ["", "42", "0x", "x2a", "0X2a", "0xzz", " 0x1"] {
            assert!(
                matches!(s.parse::<U256>(), Err(WireError::Format(_))),
                "accepted {s:?}"
            );
        }
    }

    #[test]
    fn u256_rejects_values_wider_than_256_bits() {
        let s = format!("0x1{}", "0".repeat(64));
        assert!(matches!(s.parse::<U256>(), Err(WireError::Range(_))));
        // Redundant leading zeros do not count against the width.
        let s = format!("0x{}2a", "0".repeat(64));
        assert_eq!(s.parse::<U256>().unwrap(), U256::from(42u64));
    }

    #[test]
    fn u256_max_value_round_trips() {
        let s = format!("0x{}", "f".repeat(64));
        assert_eq!(s.parse::<U256>().unwrap().to_string(), s);
    }

    #[test]
    fn u256_json_form_is_a_hex_string() {
        assert_eq!(serde_json::to_string(&U256::from(0u64)).unwrap(), "\"0x0\"");
        assert_eq!(
            serde_json::from_str::<U256>("\"0x1f\"").unwrap(),
            U256::from(31u64)
        );
        // A bare JSON number is not the wire form.
        assert!(serde_json::from_str::<U256>("31").is_err());
    }

    #[test]
    fn u256_little_endian_bytes() {
        let bytes = U256::from(0x0123_4567u64).to_le_bytes();
        assert_eq!(&bytes[..4], &[0x67, 0x45, 0x23, 0x01]);
        assert_eq!(&bytes[4..], &[0u8; 28][..]);
    }

    #[test]
    fn bytes_json_form_is_an_integer_array() {
        assert_eq!(
            serde_json::to_string(&Bytes(vec![0, 255, 16])).unwrap(),
            "[0,255,16]"
        );
        assert_eq!(serde_json::to_string(&Bytes(vec![])).unwrap(), "[]");
        assert_eq!(
            serde_json::from_str::<Bytes>("[0,255,16]").unwrap(),
            Bytes(vec![0, 255, 16])
        );
    }

    #[test]
    fn bytes_rejects_out_of_range_elements() {
        assert!(matches!(
            Bytes::from_ints(&[0, 256]),
            Err(WireError::Range(_))
        ));
        assert!(matches!(Bytes::from_ints(&[-1]), Err(WireError::Range(_))));
        assert!(serde_json::from_str::<Bytes>("[256]").is_err());
        assert!(serde_json::from_str::<Bytes>("[-1]").is_err());
    }

    #[test]
    fn bytes_rejects_other_json_shapes() {
        // No base64 strings, hex strings or fractional elements.
        assert!(serde_json::from_str::<Bytes>("\"AAEC\"").is_err());
        assert!(serde_json::from_str::<Bytes>("\"0x0001\"").is_err());
        assert!(serde_json::from_str::<Bytes>("16").is_err());
        assert!(serde_json::from_str::<Bytes>("[1.5]").is_err());
    }

    #[test]
    fn wire_values_round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..32 {
            let mut raw = [0u8; 32];
            rng.fill_bytes(&mut raw);
            let value = U256(primitive_types::U256::from_big_endian(&raw));
            assert_eq!(value.to_string().parse::<U256>().unwrap(), value);
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(serde_json::from_str::<U256>(&json).unwrap(), value);

            let mut data = vec![0u8; rng.gen_range(0..64)];
            rng.fill_bytes(&mut data);
            let value = Bytes(data);
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(serde_json::from_str::<Bytes>(&json).unwrap(), value);
        }
    }
}
