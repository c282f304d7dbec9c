// Incremental SHAKE256 stream used for the ML-DSA H function.
// - absorb(...) any number of times, then squeeze(...) any number of times.
// - reset() returns to a fresh absorbing state (needed between tr and mu).
//
// The Xof trait is the seam the mu computation is written against, so it
// can be driven by an instrumented stream in tests.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake256, Shake256Reader};

/// Extendable-output hash in absorb/squeeze form.
pub trait Xof {
    /// Feed more input. Only valid before the first squeeze after a reset.
    fn absorb(&mut self, data: &[u8]);

    /// Fill `out` with the next output bytes; consecutive calls continue the same stream.
    fn squeeze(&mut self, out: &mut [u8]);

    /// Discard all absorbed input and squeezed output.
    fn reset(&mut self);
}

#[derive(Default)]
pub struct ShakeStream {
    hasher: Shake256,
    reader: Option<Shake256Reader>, // Some once squeezing has started
}

impl ShakeStream {
    pub fn shake256() -> Self {
        Self::default()
    }
}

impl Xof for ShakeStream {
    fn absorb(&mut self, data: &[u8]) {
        debug_assert!(self.reader.is_none(), "absorb after squeeze without reset");
        self.hasher.update(data);
    }

    fn squeeze(&mut self, out: &mut [u8]) {
        let hasher = &mut self.hasher;
        self.reader
            .get_or_insert_with(|| core::mem::take(hasher).finalize_xof())
            .read(out);
    }

    fn reset(&mut self) {
        self.hasher = Shake256::default();
        self.reader = None;
    }
}
