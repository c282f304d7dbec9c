//! External mu for the pure (non pre-hash) ML-DSA signing mode.
//!
//! FIPS 204:
//! - Algorithm 2, line 10: `M' = IntegerToBytes(0, 1) || IntegerToBytes(|ctx|, 1) || ctx || M`
//! - Algorithm 6, line 9:  `tr = H(pk, 64)`
//! - Algorithm 7, line 6:  `mu = H(tr || M', 64)`
//!
//! where `H` is SHAKE256.

use crate::dilithium_params::{MAX_CONTEXT_BYTES, MU_BYTES};
use crate::kat_error::{KatError, Result};
use crate::xof_stream::{ShakeStream, Xof};

/// Domain byte of M' for pure ML-DSA (1 would mean HashML-DSA).
const PURE_DOMAIN: u8 = 0;

/// Compute mu on a caller-supplied XOF. Nothing is absorbed if `ctx` is too long.
pub fn compute_external_mu<X: Xof + ?Sized>(
    xof: &mut X,
    pk: &[u8],
    ctx: &[u8],
    msg: &[u8],
) -> Result<[u8; MU_BYTES]> {
    if ctx.len() > MAX_CONTEXT_BYTES {
        return Err(KatError::ContextTooLarge { len: ctx.len() });
    }
    let ctx_len = ctx.len() as u8;

    let mut tr = [0u8; MU_BYTES];
    xof.absorb(pk);
    xof.squeeze(&mut tr);
    xof.reset();

    xof.absorb(&tr);
    xof.absorb(&[PURE_DOMAIN]);
    xof.absorb(&[ctx_len]);
    xof.absorb(ctx);
    xof.absorb(msg);

    let mut mu = [0u8; MU_BYTES];
    xof.squeeze(&mut mu);
    Ok(mu)
}

/// [`compute_external_mu`] on a fresh SHAKE256 stream.
pub fn external_mu(pk: &[u8], ctx: &[u8], msg: &[u8]) -> Result<[u8; MU_BYTES]> {
    compute_external_mu(&mut ShakeStream::shake256(), pk, ctx, msg)
}
