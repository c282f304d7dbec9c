//! Converts hedged, pure-mode ML-DSA known-answer test files (`key = value`
//! records) into self-describing JSON test vectors.
//!
//! Every record is re-derived from its seed and cross-checked before it is
//! emitted: the expanded keys must match the recorded ones, the recorded
//! signature must verify, and the external mu computed here must verify the
//! same signature.

pub mod kat_error;
pub mod kat_hex;
pub mod kat_config;

pub mod dilithium_params;
pub mod dilithium_mldsa;
pub mod xof_stream;
pub mod dilithium_mu;

pub mod kat_scan;
pub mod kat_vector;
pub mod kat_convert;

pub use dilithium_mldsa::{ExpandedPrivateKey, ExpandedPublicKey, MlDsaBackend, RustCryptoMlDsa};
pub use dilithium_mu::{compute_external_mu, external_mu};
pub use dilithium_params::ParameterSet;
pub use kat_convert::{convert_file, convert_kats, to_json_pretty};
pub use kat_error::{KatError, KeyKind, Result};
pub use kat_scan::{stream_kats, KatInput, KatScanner, RawRecord};
pub use kat_vector::{compute_test_vector, TestVector};
pub use xof_stream::{ShakeStream, Xof};
