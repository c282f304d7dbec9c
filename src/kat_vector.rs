//! Test vector records and their derivation from KAT inputs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dilithium_mldsa::MlDsaBackend;
use crate::dilithium_mu::external_mu;
use crate::dilithium_params::{ParameterSet, RND_BYTES, SEED_BYTES};
use crate::kat_error::{KatError, KeyKind, Result};
use crate::kat_hex::{decode_and_check, decode_array, decode_field};
use crate::kat_scan::KatInput;

/// One entry of the output JSON array. Byte fields are lowercase hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestVector {
    pub parameter_set: ParameterSet,
    /// Seed that derives the keypair.
    #[serde(with = "hex::serde")]
    pub seed: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,
    /// Expanded secret key.
    #[serde(with = "hex::serde")]
    pub secret_key: Vec<u8>,
    /// Randomness used during signing.
    #[serde(with = "hex::serde")]
    pub entropy: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub message: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub context: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub mu: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
}

/// Decode, cross-check and re-verify one KAT record, computing mu along the way.
///
/// `sm` is only split by length: the trailing message copy is not compared
/// against `msg`.
pub fn compute_test_vector(input: &KatInput, backend: &dyn MlDsaBackend) -> Result<TestVector> {
    let seed: [u8; SEED_BYTES] = decode_array("xi", &input.xi)?;
    let entropy: [u8; RND_BYTES] = decode_array("rng", &input.rng)?;

    let public_key = decode_field("pk", &input.pk)?;
    let params = ParameterSet::from_public_key_len(public_key.len())?;

    let secret_key = decode_and_check("sk", &input.sk, params.secret_key_bytes())?;
    let message = decode_field("msg", &input.msg)?;
    let context = decode_field("ctx", &input.ctx)?;
    let mut signature = decode_and_check(
        "sm",
        &input.sm,
        params.signature_bytes() + message.len(),
    )?;
    signature.truncate(params.signature_bytes());

    let sk = backend.expand_seed(params, &seed);
    let derived_sk = sk.encode_expanded();
    if derived_sk != secret_key {
        return Err(KatError::KeyMismatch {
            key: KeyKind::Secret,
            recorded: hex::encode(&secret_key),
            derived: hex::encode(&derived_sk),
        });
    }
    let pk = sk.public_key();
    let derived_pk = pk.to_bytes();
    if derived_pk != public_key {
        return Err(KatError::KeyMismatch {
            key: KeyKind::Public,
            recorded: hex::encode(&public_key),
            derived: hex::encode(&derived_pk),
        });
    }

    if !pk.verify(&message, &signature, &context) {
        return Err(KatError::SignatureInvalid { params });
    }

    let mu = external_mu(&public_key, &context, &message)?;
    if !pk.verify_with_external_mu(&mu, &signature) {
        return Err(KatError::DigestVerificationFailed { params });
    }

    debug!(%params, msg_len = message.len(), ctx_len = context.len(), "composed test vector");
    Ok(TestVector {
        parameter_set: params,
        seed: seed.to_vec(),
        public_key: derived_pk,
        secret_key: derived_sk,
        entropy: entropy.to_vec(),
        message,
        context,
        mu: mu.to_vec(),
        signature,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dilithium_mldsa::{ExpandedPrivateKey, ExpandedPublicKey};
    use crate::dilithium_params::MU_BYTES;
    use std::cell::Cell;

    /// Keys are the seed repeated to the table sizes; verification answers are scripted.
    pub(crate) struct StubBackend {
        pub verify_ok: bool,
        pub mu_ok: bool,
        pub expansions: Cell<usize>,
    }

    impl StubBackend {
        pub(crate) fn accepting() -> Self {
            Self {
                verify_ok: true,
                mu_ok: true,
                expansions: Cell::new(0),
            }
        }
    }

    struct StubKey {
        sk: Vec<u8>,
        public: StubPublic,
    }

    struct StubPublic {
        pk: Vec<u8>,
        verify_ok: bool,
        mu_ok: bool,
    }

    pub(crate) fn stub_bytes(seed: &[u8; 32], len: usize) -> Vec<u8> {
        seed.iter().copied().cycle().take(len).collect()
    }

    impl MlDsaBackend for StubBackend {
        fn expand_seed(
            &self,
            params: ParameterSet,
            seed: &[u8; SEED_BYTES],
        ) -> Box<dyn ExpandedPrivateKey> {
            self.expansions.set(self.expansions.get() + 1);
            Box::new(StubKey {
                sk: stub_bytes(seed, params.secret_key_bytes()),
                public: StubPublic {
                    pk: stub_bytes(seed, params.public_key_bytes()),
                    verify_ok: self.verify_ok,
                    mu_ok: self.mu_ok,
                },
            })
        }
    }

    impl ExpandedPrivateKey for StubKey {
        fn encode_expanded(&self) -> Vec<u8> {
            self.sk.clone()
        }

        fn public_key(&self) -> &dyn ExpandedPublicKey {
            &self.public
        }
    }

    impl ExpandedPublicKey for StubPublic {
        fn to_bytes(&self) -> Vec<u8> {
            self.pk.clone()
        }

        fn verify(&self, _msg: &[u8], _sig: &[u8], _ctx: &[u8]) -> bool {
            self.verify_ok
        }

        fn verify_with_external_mu(&self, _mu: &[u8; MU_BYTES], _sig: &[u8]) -> bool {
            self.mu_ok
        }
    }

    /// A record the stub backend accepts.
    pub(crate) fn stub_input(params: ParameterSet, msg: &[u8], ctx: &[u8]) -> KatInput {
        let seed = [0x5au8; 32];
        let sig = vec![0xa5u8; params.signature_bytes()];
        KatInput {
            xi: hex::encode(seed),
            rng: hex::encode([0x11u8; 32]),
            pk: hex::encode(stub_bytes(&seed, params.public_key_bytes())),
            sk: hex::encode(stub_bytes(&seed, params.secret_key_bytes())),
            msg: hex::encode(msg),
            sm: hex::encode([sig, msg.to_vec()].concat()),
            ctx: hex::encode(ctx),
        }
    }

    #[test]
    fn composes_every_parameter_set() {
        let backend = StubBackend::accepting();
        for params in ParameterSet::ALL {
            let input = stub_input(params, b"message", b"context");
            let tv = compute_test_vector(&input, &backend).unwrap();
            assert_eq!(tv.parameter_set, params);
            assert_eq!(tv.seed, vec![0x5a; 32]);
            assert_eq!(tv.entropy, vec![0x11; 32]);
            assert_eq!(tv.signature, vec![0xa5; params.signature_bytes()]);
            assert_eq!(tv.message, b"message");
            assert_eq!(tv.context, b"context");
            assert_eq!(
                tv.mu,
                external_mu(&tv.public_key, b"context", b"message").unwrap().to_vec()
            );
        }
        assert_eq!(backend.expansions.get(), 3);
    }

    #[test]
    fn trailing_message_copy_is_not_compared() {
        let mut input = stub_input(ParameterSet::MlDsa44, b"abc", b"");
        // same length, different bytes after the signature
        input.sm = format!("{}{}", &input.sm[..input.sm.len() - 6], "ffffff");
        assert!(compute_test_vector(&input, &StubBackend::accepting()).is_ok());
    }

    #[test]
    fn unknown_public_key_length() {
        let mut input = stub_input(ParameterSet::MlDsa44, b"", b"");
        input.pk.push_str("00");
        let backend = StubBackend::accepting();
        match compute_test_vector(&input, &backend) {
            Err(KatError::UnsupportedParameterSet { len: 1313 }) => {}
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(backend.expansions.get(), 0);
    }

    #[test]
    fn field_sizes_are_enforced() {
        let backend = StubBackend::accepting();

        let mut input = stub_input(ParameterSet::MlDsa65, b"m", b"");
        input.xi.truncate(62);
        assert!(matches!(
            compute_test_vector(&input, &backend),
            Err(KatError::LengthMismatch { field: "xi", expected: 32, actual: 31 })
        ));

        let mut input = stub_input(ParameterSet::MlDsa65, b"m", b"");
        input.rng.push_str("00");
        assert!(matches!(
            compute_test_vector(&input, &backend),
            Err(KatError::LengthMismatch { field: "rng", .. })
        ));

        let mut input = stub_input(ParameterSet::MlDsa65, b"m", b"");
        input.sk.truncate(input.sk.len() - 2);
        assert!(matches!(
            compute_test_vector(&input, &backend),
            Err(KatError::LengthMismatch { field: "sk", expected: 4032, actual: 4031 })
        ));

        let mut input = stub_input(ParameterSet::MlDsa65, b"m", b"");
        input.sm.truncate(input.sm.len() - 2);
        assert!(matches!(
            compute_test_vector(&input, &backend),
            Err(KatError::LengthMismatch { field: "sm", expected: 3310, actual: 3309 })
        ));

        let mut input = stub_input(ParameterSet::MlDsa65, b"m", b"");
        input.msg = "0g".into();
        assert!(matches!(
            compute_test_vector(&input, &backend),
            Err(KatError::Decode { field: "msg", .. })
        ));
    }

    #[test]
    fn key_mismatches_are_reported_with_both_values() {
        let backend = StubBackend::accepting();

        let mut input = stub_input(ParameterSet::MlDsa44, b"", b"");
        input.sk.replace_range(0..2, "00");
        match compute_test_vector(&input, &backend) {
            Err(KatError::KeyMismatch { key: KeyKind::Secret, recorded, derived }) => {
                assert!(recorded.starts_with("00"));
                assert!(derived.starts_with("5a"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let mut input = stub_input(ParameterSet::MlDsa44, b"", b"");
        input.pk.replace_range(0..2, "00");
        assert!(matches!(
            compute_test_vector(&input, &backend),
            Err(KatError::KeyMismatch { key: KeyKind::Public, .. })
        ));
    }

    #[test]
    fn verification_failures() {
        let input = stub_input(ParameterSet::MlDsa87, b"m", b"c");

        let backend = StubBackend {
            verify_ok: false,
            ..StubBackend::accepting()
        };
        assert!(matches!(
            compute_test_vector(&input, &backend),
            Err(KatError::SignatureInvalid { params: ParameterSet::MlDsa87 })
        ));

        let backend = StubBackend {
            mu_ok: false,
            ..StubBackend::accepting()
        };
        assert!(matches!(
            compute_test_vector(&input, &backend),
            Err(KatError::DigestVerificationFailed { params: ParameterSet::MlDsa87 })
        ));
    }

    #[test]
    fn oversized_context_fails_after_signature_check() {
        let input = stub_input(ParameterSet::MlDsa44, b"m", &[0u8; 256]);
        assert!(matches!(
            compute_test_vector(&input, &StubBackend::accepting()),
            Err(KatError::ContextTooLarge { len: 256 })
        ));
    }

    #[test]
    fn json_field_layout() {
        let input = stub_input(ParameterSet::MlDsa44, &[0xab], &[]);
        let tv = compute_test_vector(&input, &StubBackend::accepting()).unwrap();
        let value = serde_json::to_value(&tv).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "ParameterSet", "Seed", "PublicKey", "SecretKey", "Entropy", "Message", "Context",
            "Mu", "Signature",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(value["ParameterSet"], "ML-DSA-44");
        assert_eq!(value["Message"], "ab");
        assert_eq!(value["Context"], "");
        assert_eq!(value["Seed"], "5a".repeat(32));

        let back: TestVector = serde_json::from_value(value).unwrap();
        assert_eq!(back, tv);
    }
}
