// OS-entropy source.
//
// Every call reads fresh bytes from the operating system's CSPRNG through
// `getrandom` (`getrandom(2)` on Linux, `getentropy` on macOS,
// `BCryptGenRandom` on Windows). No state is kept between calls, so there is
// nothing to seed and nothing to reproduce. The unit-interval floats reuse
// the Number Factory transforms so both sources shape their bits the same way.
//
// Calls may block in the kernel and are noticeably slower than the
// deterministic engine.

use leevox_prng::number_factory::{make_f32, make_f64, u32_from_array, u64_from_array};

use crate::source::RandomSource;

/// Random source backed by the operating system's secure generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OsEntropy;

impl OsEntropy {
    pub fn new() -> Self {
        OsEntropy
    }
}

impl RandomSource for OsEntropy {
    fn raw_bytes(&mut self, out: &mut [u8]) {
        sys_random(out);
    }

    fn uniform_f32(&mut self) -> f32 {
        let mut bytes = [0u8; 4];
        sys_random(&mut bytes);
        make_f32(u32_from_array(bytes))
    }

    fn uniform_f64(&mut self) -> f64 {
        let mut bytes = [0u8; 8];
        sys_random(&mut bytes);
        make_f64(u64_from_array(bytes))
    }
}

/// Fill `buf` with bytes from the OS secure generator.
///
/// # Panics
/// Panics if the OS refuses to provide entropy. That indicates a broken
/// platform rather than a recoverable condition.
pub fn sys_random(buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }
    if let Err(err) = getrandom::getrandom(buf) {
        panic!("OS entropy source failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_in_unit_range() {
        let mut source = OsEntropy::new();
        for _ in 0..1000 {
            let f = source.uniform_f32();
            let d = source.uniform_f64();
            assert!((0.0..1.0).contains(&f), "f32 out of range: {f}");
            assert!((0.0..1.0).contains(&d), "f64 out of range: {d}");
        }
    }

    #[test]
    fn bytes_are_not_all_zero() {
        let mut source = OsEntropy::new();
        let mut out = [0u8; 64];
        source.raw_bytes(&mut out);
        assert!(out.iter().any(|&b| b != 0));
    }

    #[test]
    fn consecutive_draws_differ() {
        let mut source = OsEntropy::new();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        source.raw_bytes(&mut a);
        source.raw_bytes(&mut b);
        assert_ne!(a, b);
    }
}
