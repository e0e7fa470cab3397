// Typed random-value facade for LeeVox.
//
// Builds range-bounded draws for every integer width, floats, decimals,
// date/times, characters and strings on top of a narrow `RandomSource`
// capability (raw bytes plus [0, 1) floats). Two sources ship with the crate:
// the deterministic xoshiro256** engine from `leevox_prng`, and `OsEntropy`,
// which reads the operating system's secure generator on every call.
//
// Architecture:
// - `source.rs`:   `RandomSource` and its impl for `Xoshiro256StarStar`.
// - `secure.rs`:   `OsEntropy`, the `getrandom`-backed source.
// - `random.rs`:   `Random<S>`, the facade, plus the `XoshiroRandom` and
//                  `SecureRandom` aliases.
// - `datetime.rs`: `DateTime`, a 100 ns tick timestamp for date/time draws.
// - `charset.rs`:  the default ASCII printable charset for string draws.
//
// Collaborators such as salt or token generators only need `next_bytes`,
// `fill_bytes` and the typed draws; they never touch engine internals.

pub mod charset;
pub mod datetime;
pub mod random;
pub mod secure;
pub mod source;

pub use charset::ASCII_PRINTABLE;
pub use datetime::DateTime;
pub use leevox_prng::{RandomError, Result, Seed, Xoshiro256StarStar};
pub use random::{Random, SecureRandom, XoshiroRandom};
pub use secure::OsEntropy;
pub use source::RandomSource;
