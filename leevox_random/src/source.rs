// The narrow capability every generator behind `Random` must provide.
//
// `Random<S>` derives all of its typed draws from these three primitives, so a
// new source only has to produce raw bytes and the two unit-interval floats.
// The deterministic engine implements them here; the OS-entropy source lives
// in `secure.rs`.

use leevox_prng::Xoshiro256StarStar;

/// Raw uniform output: bytes and [0, 1) floats.
pub trait RandomSource {
    /// Fill `out` with uniformly distributed bytes.
    fn raw_bytes(&mut self, out: &mut [u8]);

    /// Uniform `f32` in [0, 1).
    fn uniform_f32(&mut self) -> f32;

    /// Uniform `f64` in [0, 1).
    fn uniform_f64(&mut self) -> f64;
}

impl RandomSource for Xoshiro256StarStar {
    fn raw_bytes(&mut self, out: &mut [u8]) {
        self.fill_bytes(out);
    }

    fn uniform_f32(&mut self) -> f32 {
        self.next_f32()
    }

    fn uniform_f64(&mut self) -> f64 {
        self.next_f64()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn raw_bytes(&mut self, out: &mut [u8]) {
        (**self).raw_bytes(out);
    }

    fn uniform_f32(&mut self) -> f32 {
        (**self).uniform_f32()
    }

    fn uniform_f64(&mut self) -> f64 {
        (**self).uniform_f64()
    }
}
