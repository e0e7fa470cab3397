// Deterministic pseudo-random number core for LeeVox.
//
// Implements xoshiro256** (Blackman & Vigna, 2019) as ported by Apache Commons
// RNG, together with the pure bit conversions that turn raw generator words
// into booleans, narrowed integers, floats and byte streams. The typed,
// range-bounded API lives in `leevox_random`, which builds on this crate.
//
// Module overview:
// - `number_factory.rs`: stateless word/float/byte conversions.
// - `seed.rs`:           `Seed` and the short-seed expansion rule.
// - `xoshiro.rs`:        the engine, its sub-word caches and byte fill.
// - `error.rs`:          `RandomError`, shared with `leevox_random`.
//
// **Critical constraint: bit-exact reproducibility.** Every method on
// `Xoshiro256StarStar` must produce identical output given the same prior
// state, regardless of platform or optimization level, and must match the
// Apache Commons RNG reference vectors. The float conversions multiply by
// constants built from exact IEEE-754 bit patterns for the same reason.

pub mod error;
pub mod number_factory;
pub mod seed;
pub mod xoshiro;

pub use error::{RandomError, Result};
pub use seed::Seed;
pub use xoshiro::Xoshiro256StarStar;
