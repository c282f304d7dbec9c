//! ML-DSA primitives seen through the capabilities the converter needs:
//! seed expansion, canonical key encodings, verification with a context
//! string and verification against an externally computed mu.
//!
//! [`RustCryptoMlDsa`] is the reference backend built on the RustCrypto
//! `ml-dsa` crate; tests substitute their own [`MlDsaBackend`].

use ml_dsa::{
    EncodedSignature, KeyGen, KeyPair, MlDsa44, MlDsa65, MlDsa87, MlDsaParams, Signature,
    VerifyingKey,
};

use crate::dilithium_params::{ParameterSet, MU_BYTES, SEED_BYTES};

/// Expands a 32-byte seed into a keypair for a given parameter set.
pub trait MlDsaBackend {
    fn expand_seed(&self, params: ParameterSet, seed: &[u8; SEED_BYTES])
        -> Box<dyn ExpandedPrivateKey>;
}

pub trait ExpandedPrivateKey {
    /// Expanded secret key encoding (skEncode).
    fn encode_expanded(&self) -> Vec<u8>;

    fn public_key(&self) -> &dyn ExpandedPublicKey;
}

pub trait ExpandedPublicKey {
    /// pkEncode.
    fn to_bytes(&self) -> Vec<u8>;

    /// ML-DSA.Verify with a context string. Malformed signatures verify as false.
    fn verify(&self, msg: &[u8], sig: &[u8], ctx: &[u8]) -> bool;

    /// Verify against a precomputed mu instead of (pk, ctx, msg).
    fn verify_with_external_mu(&self, mu: &[u8; MU_BYTES], sig: &[u8]) -> bool;
}

/// Backend on top of the RustCrypto `ml-dsa` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustCryptoMlDsa;

impl MlDsaBackend for RustCryptoMlDsa {
    fn expand_seed(
        &self,
        params: ParameterSet,
        seed: &[u8; SEED_BYTES],
    ) -> Box<dyn ExpandedPrivateKey> {
        match params {
            ParameterSet::MlDsa44 => Box::new(MlDsaPrivateKey::<MlDsa44>::from_seed(seed)),
            ParameterSet::MlDsa65 => Box::new(MlDsaPrivateKey::<MlDsa65>::from_seed(seed)),
            ParameterSet::MlDsa87 => Box::new(MlDsaPrivateKey::<MlDsa87>::from_seed(seed)),
        }
    }
}

struct MlDsaPrivateKey<P: MlDsaParams> {
    pair: KeyPair<P>,
    public: MlDsaPublicKey<P>,
}

struct MlDsaPublicKey<P: MlDsaParams>(VerifyingKey<P>);

impl<P: MlDsaParams> MlDsaPrivateKey<P> {
    fn from_seed(seed: &[u8; SEED_BYTES]) -> Self {
        let pair = P::from_seed(&(*seed).into());
        let public = MlDsaPublicKey(pair.verifying_key().clone());
        Self { pair, public }
    }
}

impl<P: MlDsaParams> ExpandedPrivateKey for MlDsaPrivateKey<P> {
    #[allow(deprecated)]
    fn encode_expanded(&self) -> Vec<u8> {
        self.pair.signing_key().to_expanded().to_vec()
    }

    fn public_key(&self) -> &dyn ExpandedPublicKey {
        &self.public
    }
}

impl<P: MlDsaParams> MlDsaPublicKey<P> {
    fn decode_signature(sig: &[u8]) -> Option<Signature<P>> {
        let encoded = EncodedSignature::<P>::try_from(sig).ok()?;
        Signature::<P>::decode(&encoded)
    }
}

impl<P: MlDsaParams> ExpandedPublicKey for MlDsaPublicKey<P> {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.encode().to_vec()
    }

    fn verify(&self, msg: &[u8], sig: &[u8], ctx: &[u8]) -> bool {
        match Self::decode_signature(sig) {
            Some(sig) => self.0.verify_with_context(msg, ctx, &sig),
            None => false,
        }
    }

    fn verify_with_external_mu(&self, mu: &[u8; MU_BYTES], sig: &[u8]) -> bool {
        match Self::decode_signature(sig) {
            Some(sig) => self.0.verify_mu(&(*mu).into(), &sig),
            None => false,
        }
    }
}
