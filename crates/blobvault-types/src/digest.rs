use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256, Sha512};

use crate::error::DigestError;

/// Hash algorithms a digest can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    Sha256,
    Sha512,
    Blake3,
}

impl Algorithm {
    /// Canonical lowercase name used in the `algorithm:hex` rendering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }

    /// Expected hex length of a digest produced by this algorithm.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Sha256 | Self::Blake3 => 64,
            Self::Sha512 => 128,
        }
    }

    /// Compute the digest of raw bytes under this algorithm.
    pub fn digest(&self, data: &[u8]) -> Digest {
        let hex = match self {
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
            Self::Blake3 => blake3::hash(data).to_hex().to_string(),
        };
        Digest {
            algorithm: *self,
            hex,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            other => Err(DigestError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// An algorithm-tagged content hash, rendered as `algorithm:hex`.
///
/// Construction and parsing are lenient about the hex payload so that a
/// malformed digest can still be represented and handed to a cache or store,
/// which rejects it through [`Digest::validate`]. Code that needs a
/// known-good digest should validate at the boundary, the way the descriptor
/// cache does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest {
    algorithm: Algorithm,
    hex: String,
}

impl Digest {
    /// Create a digest from an algorithm tag and a hex payload.
    ///
    /// The payload is not checked; see [`Digest::validate`].
    pub fn new(algorithm: Algorithm, hex: impl Into<String>) -> Self {
        Self {
            algorithm,
            hex: hex.into(),
        }
    }

    /// Parse the `algorithm:hex` rendering.
    ///
    /// Fails on an empty string, a missing `:` separator, or an unknown
    /// algorithm tag. The hex payload itself is not checked here.
    pub fn parse(s: &str) -> Result<Self, DigestError> {
        if s.is_empty() {
            return Err(DigestError::Empty);
        }
        let (algorithm, hex) = s.split_once(':').ok_or(DigestError::MissingSeparator)?;
        Ok(Self {
            algorithm: algorithm.parse()?,
            hex: hex.to_string(),
        })
    }

    /// Strict syntactic validation of the hex payload.
    ///
    /// The payload must be non-empty, of the algorithm's expected length,
    /// and consist only of lowercase `[0-9a-f]`.
    pub fn validate(&self) -> Result<(), DigestError> {
        if self.hex.is_empty() {
            return Err(DigestError::Empty);
        }
        let expected = self.algorithm.hex_len();
        if self.hex.len() != expected {
            return Err(DigestError::WrongLength {
                algorithm: self.algorithm,
                expected,
                actual: self.hex.len(),
            });
        }
        for ch in self.hex.chars() {
            if !matches!(ch, '0'..='9' | 'a'..='f') {
                return Err(DigestError::InvalidHexCharacter { found: ch });
            }
        }
        Ok(())
    }

    /// The algorithm tag.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The hex payload.
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Digests cross the wire as a single `algorithm:hex` string, not a struct.
impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const BLAKE3_EMPTY: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

    #[test]
    fn compute_is_deterministic() {
        let d1 = Algorithm::Sha256.digest(b"hello world");
        let d2 = Algorithm::Sha256.digest(b"hello world");
        assert_eq!(d1, d2);
    }

    #[test]
    fn different_data_produces_different_digests() {
        let d1 = Algorithm::Sha256.digest(b"hello");
        let d2 = Algorithm::Sha256.digest(b"world");
        assert_ne!(d1, d2);
    }

    #[test]
    fn same_data_different_algorithms_differ() {
        let sha = Algorithm::Sha256.digest(b"content");
        let b3 = Algorithm::Blake3.digest(b"content");
        assert_ne!(sha, b3);
        assert_eq!(sha.hex().len(), b3.hex().len());
    }

    #[test]
    fn known_answer_vectors() {
        assert_eq!(Algorithm::Sha256.digest(b"").hex(), SHA256_EMPTY);
        assert_eq!(Algorithm::Blake3.digest(b"").hex(), BLAKE3_EMPTY);
        assert_eq!(Algorithm::Sha512.digest(b"").hex().len(), 128);
    }

    #[test]
    fn computed_digests_validate() {
        for algorithm in [Algorithm::Sha256, Algorithm::Sha512, Algorithm::Blake3] {
            assert_eq!(algorithm.digest(b"payload").validate(), Ok(()));
        }
    }

    #[test]
    fn display_parse_roundtrip() {
        let digest = Algorithm::Sha256.digest(b"roundtrip");
        let rendered = digest.to_string();
        assert!(rendered.starts_with("sha256:"));
        assert_eq!(rendered.parse::<Digest>().unwrap(), digest);
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Digest::parse(""), Err(DigestError::Empty));
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert_eq!(
            Digest::parse(SHA256_EMPTY),
            Err(DigestError::MissingSeparator)
        );
    }

    #[test]
    fn parse_rejects_unknown_algorithm() {
        assert_eq!(
            Digest::parse("md5:0123"),
            Err(DigestError::UnsupportedAlgorithm("md5".to_string()))
        );
    }

    #[test]
    fn validate_rejects_empty_hex() {
        let digest = Digest::new(Algorithm::Sha256, "");
        assert_eq!(digest.validate(), Err(DigestError::Empty));
    }

    #[test]
    fn validate_rejects_wrong_length() {
        let digest = Digest::new(Algorithm::Sha256, "abcd");
        assert_eq!(
            digest.validate(),
            Err(DigestError::WrongLength {
                algorithm: Algorithm::Sha256,
                expected: 64,
                actual: 4,
            })
        );
    }

    #[test]
    fn validate_rejects_uppercase_hex() {
        let digest = Digest::new(Algorithm::Sha256, SHA256_EMPTY.to_uppercase());
        assert_eq!(
            digest.validate(),
            Err(DigestError::InvalidHexCharacter { found: 'E' })
        );
    }

    #[test]
    fn validate_rejects_non_hex_character() {
        let mut hex = SHA256_EMPTY.to_string();
        hex.replace_range(0..1, "z");
        let digest = Digest::new(Algorithm::Sha256, hex);
        assert_eq!(
            digest.validate(),
            Err(DigestError::InvalidHexCharacter { found: 'z' })
        );
    }

    #[test]
    fn serde_is_string_form() {
        let digest = Algorithm::Sha256.digest(b"serde");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{digest}\""));
        let parsed: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<Digest>("\"not-a-digest\"").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn valid_hex_of_right_length_validates(hex in "[0-9a-f]{64}") {
                prop_assert_eq!(Digest::new(Algorithm::Sha256, hex).validate(), Ok(()));
            }

            #[test]
            fn hex_with_invalid_character_fails(
                prefix in "[0-9a-f]{0,63}",
                bad in "[g-zA-Z]",
            ) {
                let mut hex = prefix;
                hex.push_str(&bad);
                while hex.len() < 64 {
                    hex.push('0');
                }
                prop_assert!(Digest::new(Algorithm::Sha256, hex).validate().is_err());
            }
        }
    }
}
