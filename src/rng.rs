//! The process-wide random source behind ephemeral scalars and salts.
//!
//! One DRBG serves every session, seeded from the operating system on first
//! use and serialised by a mutex so concurrent sessions never interleave its
//! state advances. [`reseed`] folds caller-provided bytes into fresh OS
//! entropy for explicit freshness; the OS entropy source itself is reached
//! only through this module and is never re-initialised.

use num_bigint::RandBigInt;
use once_cell::sync::Lazy;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::big_number::BigNumber;

static SEEDED: AtomicBool = AtomicBool::new(false);

static DRBG: Lazy<Mutex<StdRng>> = Lazy::new(|| {
    SEEDED.store(true, Ordering::Relaxed);
    Mutex::new(StdRng::from_entropy())
});

/// whether the DRBG has been seeded, by first use or by [`reseed`]
pub fn is_seeded() -> bool {
    SEEDED.load(Ordering::Relaxed)
}

/// Replaces the DRBG state with one derived from fresh OS entropy mixed with
/// the caller's bytes. Idempotent with respect to correctness; sessions in
/// flight keep their already-drawn scalars.
pub fn reseed(extra: &[u8]) {
    let mut entropy = [0_u8; 32];
    OsRng.fill_bytes(&mut entropy);

    let seed: [u8; 32] = Sha256::new()
        .chain_update(entropy)
        .chain_update(extra)
        .finalize()
        .into();

    let mut drbg = DRBG.lock().expect("rng mutex poisoned");
    *drbg = StdRng::from_seed(seed);
    SEEDED.store(true, Ordering::Relaxed);
}

/// `n_bytes` of DRBG output
pub(crate) fn fill_random(buf: &mut [u8]) {
    DRBG.lock().expect("rng mutex poisoned").fill_bytes(buf);
}

/// a uniform number below `2^(8 * n_bytes)`
pub(crate) fn random_number(n_bytes: usize) -> BigNumber {
    let mut drbg = DRBG.lock().expect("rng mutex poisoned");
    drbg.gen_biguint((n_bytes * 8) as u64).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_are_distinct() {
        let a = random_number(32);
        let b = random_number(32);
        assert_ne!(a, b);
    }

    #[test]
    fn reseed_marks_seeded_and_keeps_drawing() {
        reseed(b"extra bytes from the caller");
        assert!(is_seeded());

        let mut buf = [0_u8; 16];
        fill_random(&mut buf);
        assert_ne!(buf, [0_u8; 16]);
    }
}
