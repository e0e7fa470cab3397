// xoshiro256** engine (Blackman & Vigna, 2019).
//
// Ported from the Apache Commons RNG `XoShiRo256StarStar` source so that the
// output matches its published test vectors bit for bit. Seeding of short
// seeds follows the same library's "scramble well" fill (see `seed.rs`).
//
// 32-bit and 16-bit draws are carved out of wider words through a sub-word
// cache: one `next_u64` feeds two `next_u32` calls (high half first), and one
// `next_u32` feeds two `next_u16` calls. The caches only change how narrow
// outputs interleave; the 64-bit stream is unaffected by them.
//
// **Not cryptographically secure.** The state is recoverable from a handful of
// outputs. **Not thread-safe.** Every draw mutates the state; share an engine
// across threads only behind external synchronization.

use crate::error::{RandomError, Result};
use crate::number_factory::{
    extract_high, extract_high16, extract_low, extract_low16, make_f32, make_f64,
};
use crate::seed::{STATE_WORDS, Seed};

/// Deterministic xoshiro256** generator.
///
/// Two engines built from the same seed produce identical sequences for the
/// same sequence of calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xoshiro256StarStar {
    s: [u64; STATE_WORDS],
    /// Low half of the last 64-bit word, pending after its high half was
    /// returned by `next_u32`.
    pending_u32: Option<u32>,
    /// Low half of the last 32-bit word, pending after `next_u16`.
    pending_u16: Option<u16>,
}

impl Xoshiro256StarStar {
    /// Create an engine from a seed of zero or more words.
    ///
    /// Seeds shorter than four words are expanded deterministically; see
    /// [`Seed::expand`].
    pub fn new(seed: impl Into<Seed>) -> Self {
        Self::from_state(seed.into().expand())
    }

    /// Install a raw 256-bit state verbatim, with empty sub-word caches.
    pub fn from_state(s: [u64; STATE_WORDS]) -> Self {
        Self {
            s,
            pending_u32: None,
            pending_u16: None,
        }
    }

    /// Seed from the system clock.
    pub fn from_time() -> Self {
        Self::new(Seed::from_time())
    }

    /// Current state words (sub-word caches excluded).
    pub fn state(&self) -> [u64; STATE_WORDS] {
        self.s
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = self.s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a `u32`: the high half of a fresh `u64`, then its low half on
    /// the following call.
    pub fn next_u32(&mut self) -> u32 {
        if let Some(low) = self.pending_u32.take() {
            return low;
        }
        let word = self.next_u64();
        self.pending_u32 = Some(extract_low(word));
        extract_high(word)
    }

    /// Generate a `u16`: the high half of a `next_u32` draw, then its low half.
    pub fn next_u16(&mut self) -> u16 {
        if let Some(low) = self.pending_u16.take() {
            return low;
        }
        let word = self.next_u32();
        self.pending_u16 = Some(extract_low16(word));
        extract_high16(word)
    }

    /// Uniform `f32` in [0, 1) from the top 24 bits of `next_u32`.
    pub fn next_f32(&mut self) -> f32 {
        make_f32(self.next_u32())
    }

    /// Uniform `f64` in [0, 1) from the top 53 bits of `next_u64`.
    pub fn next_f64(&mut self) -> f64 {
        make_f64(self.next_u64())
    }

    pub fn next_u32_vec(&mut self, len: usize) -> Vec<u32> {
        (0..len).map(|_| self.next_u32()).collect()
    }

    pub fn next_u64_vec(&mut self, len: usize) -> Vec<u64> {
        (0..len).map(|_| self.next_u64()).collect()
    }

    pub fn next_f32_vec(&mut self, len: usize) -> Vec<f32> {
        (0..len).map(|_| self.next_f32()).collect()
    }

    pub fn next_f64_vec(&mut self, len: usize) -> Vec<f64> {
        (0..len).map(|_| self.next_f64()).collect()
    }

    /// Fill `bytes` with little-endian `next_u64` words.
    ///
    /// A trailing partial group consumes one more full word; its unused high
    /// bytes are discarded.
    pub fn fill_bytes(&mut self, bytes: &mut [u8]) {
        let mut chunks = bytes.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_u64().to_le_bytes());
        }
        let tail = chunks.into_remainder();
        if !tail.is_empty() {
            let word = self.next_u64().to_le_bytes();
            tail.copy_from_slice(&word[..tail.len()]);
        }
    }

    /// Fill `bytes[start..start + length]`, leaving the rest of the buffer
    /// untouched.
    pub fn fill_bytes_range(
        &mut self,
        bytes: &mut [u8],
        start: usize,
        length: usize,
    ) -> Result<()> {
        let region = checked_region(bytes.len(), start, length)?;
        self.fill_bytes(&mut bytes[region]);
        Ok(())
    }
}

/// Validate that `[start, start + length)` lies inside a buffer of `len` bytes.
pub fn checked_region(len: usize, start: usize, length: usize) -> Result<std::ops::Range<usize>> {
    if start > len {
        return Err(RandomError::IndexOutOfRange {
            name: "start",
            index: start,
            min: 0,
            max: len,
        });
    }
    let available = len - start;
    if length > available {
        return Err(RandomError::IndexOutOfRange {
            name: "length",
            index: length,
            min: 0,
            max: available,
        });
    }
    Ok(start..start + length)
}
