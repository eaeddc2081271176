//! Entity hash - the 256-bit seed and durable identity of every generated entity.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Hex characters in a valid hash
pub const HASH_HEX_LEN: usize = 64;

/// 256-bit hash, always rendered as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityHash {
    bytes: [u8; 32],
}

impl EntityHash {
    /// Parse a 64 character hex string. Uppercase digits are accepted and
    /// normalized; any other length or character is `InvalidHash`.
    pub fn parse(hex: &str) -> EngineResult<Self> {
        if hex.len() != HASH_HEX_LEN {
            return Err(EngineError::InvalidHash(format!(
                "expected {HASH_HEX_LEN} hex characters, got {}",
                hex.len()
            )));
        }

        let mut bytes = [0u8; 32];
        for (i, pair) in hex.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_value(pair[0]).ok_or_else(|| bad_char(hex))?;
            let lo = hex_value(pair[1]).ok_or_else(|| bad_char(hex))?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// The all-zero hash. Every stream draw from it is 0.
    pub fn zero() -> Self {
        Self { bytes: [0; 32] }
    }

    /// Derive a hash from arbitrary seed material (user id, timestamp, salt...).
    /// Parts are length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
    pub fn from_seed<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut hasher = Sha3_256::new();
        for part in parts {
            let part = part.as_ref();
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        Self {
            bytes: hasher.finalize().into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Hex nibble at `index` (0..64)
    pub(crate) fn nibble(&self, index: usize) -> u32 {
        let byte = self.bytes[index / 2];
        if index % 2 == 0 {
            (byte >> 4) as u32
        } else {
            (byte & 0x0f) as u32
        }
    }

    /// First 8 hex characters, for log lines
    pub fn short(&self) -> String {
        self.to_string()[..8].to_string()
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn bad_char(hex: &str) -> EngineError {
    EngineError::InvalidHash(format!("non-hex character in {hex:?}"))
}

impl fmt::Display for EntityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for EntityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityHash({self})")
    }
}

impl FromStr for EntityHash {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityHash {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntityHash> for String {
    fn from(hash: EntityHash) -> Self {
        hash.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";

    #[test]
    fn test_parse_roundtrip_display() {
        let hash = EntityHash::parse(SAMPLE).unwrap();
        assert_eq!(hash.to_string(), SAMPLE);
        assert_eq!(hash.short(), "a1b2c3d4");
    }

    #[test]
    fn test_uppercase_normalized() {
        let hash = EntityHash::parse(&SAMPLE.to_uppercase()).unwrap();
        assert_eq!(hash.to_string(), SAMPLE);
    }

    #[test]
    fn test_rejects_short_and_non_hex() {
        assert!(matches!(
            EntityHash::parse("zz"),
            Err(EngineError::InvalidHash(_))
        ));
        let bad = format!("{}zz", &SAMPLE[..62]);
        assert!(matches!(
            EntityHash::parse(&bad),
            Err(EngineError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_nibbles() {
        let hash = EntityHash::parse(SAMPLE).unwrap();
        assert_eq!(hash.nibble(0), 0xa);
        assert_eq!(hash.nibble(1), 0x1);
        assert_eq!(hash.nibble(63), 0x0);
    }

    #[test]
    fn test_from_seed_deterministic_and_length_prefixed() {
        let a = EntityHash::from_seed(["user-7", "1700000000", "salt"]);
        let b = EntityHash::from_seed(["user-7", "1700000000", "salt"]);
        assert_eq!(a, b);

        let c = EntityHash::from_seed(["ab", "c"]);
        let d = EntityHash::from_seed(["a", "bc"]);
        assert_ne!(c, d);
    }

    #[test]
    fn test_serde_as_string() {
        let hash = EntityHash::parse(SAMPLE).unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));
        let back: EntityHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
        assert!(serde_json::from_str::<EntityHash>("\"zz\"").is_err());
    }
}
