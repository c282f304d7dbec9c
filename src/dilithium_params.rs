// ML-DSA parameter sets (FIPS 204, Table 2): byte sizes of the encoded
// public key, expanded secret key and signature.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::kat_error::{KatError, Result};

/// Seed (xi) length for every parameter set.
pub const SEED_BYTES: usize = 32;
/// Signing randomness (rnd) length for every parameter set.
pub const RND_BYTES: usize = 32;
/// Length of tr and of mu.
pub const MU_BYTES: usize = 64;
/// Largest context string accepted by ML-DSA.Sign / ML-DSA.Verify.
pub const MAX_CONTEXT_BYTES: usize = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterSet {
    #[serde(rename = "ML-DSA-44")]
    MlDsa44,
    #[serde(rename = "ML-DSA-65")]
    MlDsa65,
    #[serde(rename = "ML-DSA-87")]
    MlDsa87,
}

impl ParameterSet {
    pub const ALL: [ParameterSet; 3] = [
        ParameterSet::MlDsa44,
        ParameterSet::MlDsa65,
        ParameterSet::MlDsa87,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ParameterSet::MlDsa44 => "ML-DSA-44",
            ParameterSet::MlDsa65 => "ML-DSA-65",
            ParameterSet::MlDsa87 => "ML-DSA-87",
        }
    }

    pub const fn public_key_bytes(self) -> usize {
        match self {
            ParameterSet::MlDsa44 => 1312,
            ParameterSet::MlDsa65 => 1952,
            ParameterSet::MlDsa87 => 2592,
        }
    }

    /// Expanded (not seed-form) secret key size.
    pub const fn secret_key_bytes(self) -> usize {
        match self {
            ParameterSet::MlDsa44 => 2560,
            ParameterSet::MlDsa65 => 4032,
            ParameterSet::MlDsa87 => 4896,
        }
    }

    pub const fn signature_bytes(self) -> usize {
        match self {
            ParameterSet::MlDsa44 => 2420,
            ParameterSet::MlDsa65 => 3309,
            ParameterSet::MlDsa87 => 4627,
        }
    }

    /// The public key length is the only thing that identifies the parameter set of a KAT record.
    pub fn from_public_key_len(len: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.public_key_bytes() == len)
            .ok_or(KatError::UnsupportedParameterSet { len })
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_fips204() {
        assert_eq!(
            (
                ParameterSet::MlDsa44.public_key_bytes(),
                ParameterSet::MlDsa44.secret_key_bytes(),
                ParameterSet::MlDsa44.signature_bytes()
            ),
            (1312, 2560, 2420)
        );
        assert_eq!(
            (
                ParameterSet::MlDsa65.public_key_bytes(),
                ParameterSet::MlDsa65.secret_key_bytes(),
                ParameterSet::MlDsa65.signature_bytes()
            ),
            (1952, 4032, 3309)
        );
        assert_eq!(
            (
                ParameterSet::MlDsa87.public_key_bytes(),
                ParameterSet::MlDsa87.secret_key_bytes(),
                ParameterSet::MlDsa87.signature_bytes()
            ),
            (2592, 4896, 4627)
        );
    }

    #[test]
    fn public_key_length_resolves_uniquely() {
        for p in ParameterSet::ALL {
            assert_eq!(ParameterSet::from_public_key_len(p.public_key_bytes()).unwrap(), p);
        }
        match ParameterSet::from_public_key_len(1313) {
            Err(KatError::UnsupportedParameterSet { len: 1313 }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn display_and_serde_use_standard_names() {
        assert_eq!(ParameterSet::MlDsa65.to_string(), "ML-DSA-65");
        assert_eq!(
            serde_json::to_string(&ParameterSet::MlDsa87).unwrap(),
            "\"ML-DSA-87\""
        );
        let parsed: ParameterSet = serde_json::from_str("\"ML-DSA-44\"").unwrap();
        assert_eq!(parsed, ParameterSet::MlDsa44);
    }
}
