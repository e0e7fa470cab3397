// Seed words and their expansion into the 256-bit engine state.
//
// A `Seed` is zero or more `u64` words. Narrower unsigned integers widen
// losslessly through `From`; signed values are never reinterpreted. When a
// seed is shorter than the state, the missing words are derived with the
// Apache Commons RNG "scramble well" rule so that the same seed always yields
// the same state, including the empty seed.

use std::time::{SystemTime, UNIX_EPOCH};

/// Number of 64-bit words in a xoshiro256 state.
pub const STATE_WORDS: usize = 4;

const SCRAMBLE_MULTIPLIER: i64 = 1_812_433_253;
const SCRAMBLE_SHIFT: u32 = 30;

/// Ordered seed words for a deterministic engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Seed {
    words: Vec<u64>,
}

impl Seed {
    /// The empty seed. Expands to the state `[0, 1, 2, 3]`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a seed from any sequence of losslessly widenable words.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<u64>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// A one-word seed taken from the system clock's nanoseconds since the
    /// Unix epoch. A clock set before the epoch yields the zero word.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self::from(nanos as u64)
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Expand into exactly `STATE_WORDS` state words.
    ///
    /// Supplied words fill the front of the state (extra words are ignored).
    /// Each missing slot `i` becomes `scramble(state[i - len], i)`.
    pub fn expand(&self) -> [u64; STATE_WORDS] {
        let mut state = [0u64; STATE_WORDS];
        let len = self.words.len().min(STATE_WORDS);
        state[..len].copy_from_slice(&self.words[..len]);
        for i in len..STATE_WORDS {
            state[i] = scramble_well(state[i - len], i as u64);
        }
        state
    }
}

/// `1812433253 * (n ^ (n >> 30)) + add`, evaluated as signed 64-bit
/// arithmetic: the shift is arithmetic and the multiply/add wrap.
pub fn scramble_well(n: u64, add: u64) -> u64 {
    let signed = n as i64;
    SCRAMBLE_MULTIPLIER
        .wrapping_mul(signed ^ (signed >> SCRAMBLE_SHIFT))
        .wrapping_add(add as i64) as u64
}

impl From<u64> for Seed {
    fn from(word: u64) -> Self {
        Self { words: vec![word] }
    }
}

impl From<u32> for Seed {
    fn from(word: u32) -> Self {
        Self::from(u64::from(word))
    }
}

impl From<Vec<u64>> for Seed {
    fn from(words: Vec<u64>) -> Self {
        Self { words }
    }
}

impl From<&[u64]> for Seed {
    fn from(words: &[u64]) -> Self {
        Self {
            words: words.to_vec(),
        }
    }
}

impl<const N: usize> From<[u64; N]> for Seed {
    fn from(words: [u64; N]) -> Self {
        Self {
            words: words.to_vec(),
        }
    }
}
