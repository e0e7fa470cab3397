// Typed, range-bounded draws over any `RandomSource`.
//
// `Random<S>` owns a source and derives every draw from its three primitives.
// Bounded draws are linear interpolations, `min + (max - min) * u` with `u` a
// [0, 1) float, narrowed to the target type. This is not rejection sampling:
// once a span exceeds 2^53 the `f64` sample cannot reach every integer in it,
// so the largest spans are very slightly non-uniform. Streams produced this
// way are part of the reproducibility contract of the deterministic engine,
// so the formula must not be swapped for an unbiased sampler.
//
// Two details keep results inside `[min, max)` without changing the formula:
// integer spans are computed in `i128` (so `i64::MIN..i64::MAX` does not
// wrap), and the truncated offset is capped at `span - 1` because `f64`
// rounding of a large span can land on the span itself.
//
// `next_bool` reads the LOW bit of one drawn byte. The Number Factory's
// `make_bool_*` reads the HIGH bit of a word. Recorded `next_bool` streams
// depend on the low-bit rule.

use leevox_prng::xoshiro::checked_region;
use leevox_prng::{RandomError, Result, Seed, Xoshiro256StarStar};
use rust_decimal::Decimal;

use crate::charset::ASCII_PRINTABLE;
use crate::datetime::DateTime;
use crate::secure::OsEntropy;
use crate::source::RandomSource;

/// Deterministic facade, reproducible from its seed. Not cryptographically
/// secure.
pub type XoshiroRandom = Random<Xoshiro256StarStar>;

/// Facade over the operating system's secure generator.
pub type SecureRandom = Random<OsEntropy>;

// Unicode scalar values with the surrogate block squeezed out, so that a
// contiguous index range maps onto valid `char`s only.
const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;

/// Typed random draws over a primitive source.
///
/// Not thread-safe: every draw mutates the source. Use one `Random` per
/// thread, or wrap it in a `Mutex`.
#[derive(Clone, Debug)]
pub struct Random<S> {
    source: S,
}

impl Random<Xoshiro256StarStar> {
    /// Deterministic generator from an explicit seed.
    pub fn seeded(seed: impl Into<Seed>) -> Self {
        Self::new(Xoshiro256StarStar::new(seed))
    }

    /// Deterministic generator seeded from the system clock.
    pub fn from_time() -> Self {
        Self::new(Xoshiro256StarStar::from_time())
    }
}

impl Random<OsEntropy> {
    pub fn secure() -> Self {
        Self::new(OsEntropy::new())
    }
}

macro_rules! integer_draws {
    ($($t:ty => $next:ident, $below:ident, $range:ident;)*) => {
        $(
            #[doc = concat!("Uniform `", stringify!($t), "` in `[0, ", stringify!($t), "::MAX)`.")]
            pub fn $next(&mut self) -> $t {
                self.scaled(0, <$t>::MAX as i128) as $t
            }

            #[doc = concat!("Uniform `", stringify!($t), "` in `[0, max)`.")]
            pub fn $below(&mut self, max: $t) -> Result<$t> {
                self.$range(0, max)
            }

            #[doc = concat!(
                "Uniform `", stringify!($t), "` in `[min, max)`; `min` when they are equal."
            )]
            pub fn $range(&mut self, min: $t, max: $t) -> Result<$t> {
                if max < min {
                    return Err(RandomError::inverted_range(min, max));
                }
                if max == min {
                    return Ok(min);
                }
                Ok(self.scaled(min as i128, max as i128) as $t)
            }
        )*
    };
}

impl<S: RandomSource> Random<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// `min + trunc((max - min) * u)`, for `min < max`.
    fn scaled(&mut self, min: i128, max: i128) -> i128 {
        let span = (max - min) as u128;
        let offset = (span as f64 * self.source.uniform_f64()) as u128;
        min + offset.min(span - 1) as i128
    }

    // -----------------------------------------------------------------------
    // Booleans and bytes
    // -----------------------------------------------------------------------

    /// Low bit of one drawn byte.
    pub fn next_bool(&mut self) -> bool {
        let mut byte = [0u8; 1];
        self.source.raw_bytes(&mut byte);
        byte[0] & 1 == 1
    }

    pub fn next_bytes(&mut self, length: usize) -> Vec<u8> {
        let mut out = vec![0u8; length];
        self.source.raw_bytes(&mut out);
        out
    }

    /// Fill `data[offset..offset + count]`, leaving the rest untouched.
    pub fn fill_bytes(&mut self, data: &mut [u8], offset: usize, count: usize) -> Result<()> {
        let region = checked_region(data.len(), offset, count)?;
        self.source.raw_bytes(&mut data[region]);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Integers
    // -----------------------------------------------------------------------

    integer_draws! {
        u8 => next_u8, next_u8_below, next_u8_range;
        i8 => next_i8, next_i8_below, next_i8_range;
        u16 => next_u16, next_u16_below, next_u16_range;
        i16 => next_i16, next_i16_below, next_i16_range;
        u32 => next_u32, next_u32_below, next_u32_range;
        i32 => next_i32, next_i32_below, next_i32_range;
        u64 => next_u64, next_u64_below, next_u64_range;
        i64 => next_i64, next_i64_below, next_i64_range;
    }

    // -----------------------------------------------------------------------
    // Floating point
    // -----------------------------------------------------------------------

    /// Uniform `f32` in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.source.uniform_f32()
    }

    /// Uniform `f32` in `[min, max)`. Bounds must be finite.
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> Result<f32> {
        check_float_bounds(min.is_finite() && max.is_finite(), min, max)?;
        if max < min {
            return Err(RandomError::inverted_range(min, max));
        }
        if max == min {
            return Ok(min);
        }
        let u = self.source.uniform_f32();
        let span = max - min;
        let value = if span.is_finite() {
            min + span * u
        } else {
            min * (1.0 - u) + max * u
        };
        Ok(value.clamp(min, step_down_f32(max)))
    }

    /// Uniform `f64` in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.source.uniform_f64()
    }

    /// Uniform `f64` in `[min, max)`. Bounds must be finite.
    pub fn next_f64_range(&mut self, min: f64, max: f64) -> Result<f64> {
        check_float_bounds(min.is_finite() && max.is_finite(), min, max)?;
        if max < min {
            return Err(RandomError::inverted_range(min, max));
        }
        if max == min {
            return Ok(min);
        }
        let u = self.source.uniform_f64();
        let span = max - min;
        let value = if span.is_finite() {
            min + span * u
        } else {
            min * (1.0 - u) + max * u
        };
        Ok(value.clamp(min, step_down_f64(max)))
    }

    // -----------------------------------------------------------------------
    // Decimal
    // -----------------------------------------------------------------------

    /// Uniform decimal in [0, 1), carrying the precision of one `f64` sample.
    pub fn next_decimal(&mut self) -> Decimal {
        unit_decimal(self.source.uniform_f64())
    }

    /// Uniform decimal in `[min, max)`.
    ///
    /// The fraction comes from a single `f64` sample, so a drawn value has at
    /// most 53 bits of randomness however wide the decimal range is.
    pub fn next_decimal_range(&mut self, min: Decimal, max: Decimal) -> Result<Decimal> {
        if max < min {
            return Err(RandomError::inverted_range(min, max));
        }
        if max == min {
            return Ok(min);
        }
        let u = unit_decimal(self.source.uniform_f64());
        let value = match max.checked_sub(min) {
            Some(span) => min + span * u,
            // Span wider than Decimal::MAX: interpolate from both ends.
            None => min * (Decimal::ONE - u) + max * u,
        };
        // Rounding to 28 significant digits can land on `max` itself.
        Ok(if value < max {
            value.max(min)
        } else {
            step_down_decimal(max, min)
        })
    }

    // -----------------------------------------------------------------------
    // Date and time
    // -----------------------------------------------------------------------

    /// Uniform tick in `[DateTime::MIN, DateTime::MAX)`.
    pub fn next_date_time(&mut self) -> DateTime {
        let ticks = self.scaled(DateTime::MIN.ticks() as i128, DateTime::MAX.ticks() as i128);
        DateTime::from_ticks_in_range(ticks as i64)
    }

    /// `min` plus a uniform tick offset in `[0, max - min)`.
    pub fn next_date_time_range(&mut self, min: DateTime, max: DateTime) -> Result<DateTime> {
        if max < min {
            return Err(RandomError::inverted_range(min, max));
        }
        let offset = self.next_i64_range(0, max.ticks_since(min))?;
        min.add_ticks(offset)
    }

    // -----------------------------------------------------------------------
    // Characters and strings
    // -----------------------------------------------------------------------

    /// Uniform `char` in `['\0', char::MAX)`, never a surrogate.
    pub fn next_char(&mut self) -> char {
        let index = self.scaled(0, scalar_index(char::MAX) as i128);
        scalar_at(index as u32)
    }

    /// Uniform `char` in `[min, max)` over Unicode scalar values; the
    /// surrogate block is skipped rather than rejected.
    pub fn next_char_range(&mut self, min: char, max: char) -> Result<char> {
        if max < min {
            return Err(RandomError::inverted_range(min.escape_unicode(), max.escape_unicode()));
        }
        if max == min {
            return Ok(min);
        }
        let index = self.scaled(scalar_index(min) as i128, scalar_index(max) as i128);
        Ok(scalar_at(index as u32))
    }

    /// `length` characters from the ASCII printable set.
    pub fn next_string(&mut self, length: usize) -> String {
        self.pick_chars(length, &ASCII_PRINTABLE)
    }

    /// `length` independent picks from `charset`, which must not be empty.
    pub fn next_string_from(&mut self, length: usize, charset: &[char]) -> Result<String> {
        if charset.is_empty() {
            return Err(RandomError::InvalidArgument {
                name: "chars",
                reason: "`chars` must have at least 1 element".to_string(),
            });
        }
        Ok(self.pick_chars(length, charset))
    }

    pub fn next_string_from_str(&mut self, length: usize, chars: &str) -> Result<String> {
        let charset: Vec<char> = chars.chars().collect();
        self.next_string_from(length, &charset)
    }

    fn pick_chars(&mut self, length: usize, charset: &[char]) -> String {
        let last = charset.len() - 1;
        (0..length)
            .map(|_| {
                let index = (self.source.uniform_f64() * charset.len() as f64) as usize;
                charset[index.min(last)]
            })
            .collect()
    }
}

fn check_float_bounds(
    finite: bool,
    min: impl std::fmt::Display,
    max: impl std::fmt::Display,
) -> Result<()> {
    if finite {
        return Ok(());
    }
    Err(RandomError::InvalidArgument {
        name: "max",
        reason: format!("bounds must be finite, got [{min}, {max})"),
    })
}

// Largest float strictly below a finite `x`.
fn step_down_f32(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

fn step_down_f64(x: f64) -> f64 {
    if x == 0.0 {
        -f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

const TWO_POW_53: u64 = 1 << 53;

// `u` as a count of 2^-53 steps, divided out in decimal. The divisor is a
// non-zero constant and the quotient is below one, so this cannot fail.
// Bits of `u` finer than 2^-53 are dropped.
fn unit_decimal(u: f64) -> Decimal {
    let steps = ((u * TWO_POW_53 as f64) as u64).min(TWO_POW_53 - 1);
    Decimal::from(steps) / Decimal::from(TWO_POW_53)
}

// Nearest decimal below `max` that is one unit smaller in some decimal place,
// never below `min`.
fn step_down_decimal(max: Decimal, min: Decimal) -> Decimal {
    (0..=28u32)
        .rev()
        .filter_map(|scale| max.checked_sub(Decimal::new(1, scale)))
        .find(|candidate| *candidate < max)
        .map_or(min, |candidate| candidate.max(min))
}

fn scalar_index(c: char) -> u32 {
    let v = c as u32;
    if v >= SURROGATE_START + SURROGATE_LEN {
        v - SURROGATE_LEN
    } else {
        v
    }
}

fn scalar_at(index: u32) -> char {
    let v = if index >= SURROGATE_START {
        index + SURROGATE_LEN
    } else {
        index
    };
    char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that always yields the same unit value and byte.
    struct FixedSource {
        unit: f64,
        byte: u8,
    }

    impl RandomSource for FixedSource {
        fn raw_bytes(&mut self, out: &mut [u8]) {
            out.fill(self.byte);
        }

        fn uniform_f32(&mut self) -> f32 {
            (self.unit as f32).min(1.0 - f32::EPSILON / 2.0)
        }

        fn uniform_f64(&mut self) -> f64 {
            self.unit
        }
    }

    fn fixed(unit: f64) -> Random<FixedSource> {
        Random::new(FixedSource { unit, byte: 0 })
    }

    const TOP_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;

    #[test]
    fn linear_interpolation_formula() {
        let mut rng = fixed(0.5);
        assert_eq!(rng.next_i32_range(10, 20), Ok(15));
        assert_eq!(rng.next_u8_range(0, 3), Ok(1));
        assert_eq!(rng.next_f64_range(-2.0, 2.0), Ok(0.0));
        assert_eq!(rng.next_i64_range(i64::MIN, i64::MAX), Ok(0));
    }

    #[test]
    fn top_sample_stays_below_max() {
        let mut rng = fixed(TOP_UNIT);
        assert_eq!(rng.next_u64(), u64::MAX - 2047);
        assert_eq!(rng.next_i8_range(-128, 127), Ok(126));
        // 2^60 + 1 rounds to 2^60 as an f64.
        assert_eq!(rng.next_u64_range(0, (1 << 60) + 1), Ok((1 << 60) - 128));
        let near = rng.next_f64_range(0.0, 1.0).unwrap();
        assert!(near < 1.0);
        let tiny = rng.next_f64_range(1.0, 1.0 + f64::EPSILON).unwrap();
        assert_eq!(tiny, 1.0);
    }

    #[test]
    fn zero_sample_returns_min() {
        let mut rng = fixed(0.0);
        assert_eq!(rng.next_i16_range(-300, 300), Ok(-300));
        assert_eq!(rng.next_f32_range(-1.5, 3.0), Ok(-1.5));
        assert_eq!(rng.next_char(), '\0');
    }

    #[test]
    fn equal_bounds_skip_sampling() {
        let mut rng = Random::seeded(3u64);
        let before = rng.source().state();
        assert_eq!(rng.next_u32_range(7, 7), Ok(7));
        assert_eq!(rng.next_f64_range(2.5, 2.5), Ok(2.5));
        assert_eq!(rng.next_char_range('x', 'x'), Ok('x'));
        assert_eq!(
            rng.next_decimal_range(Decimal::ONE, Decimal::ONE),
            Ok(Decimal::ONE)
        );
        assert_eq!(rng.source().state(), before);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let mut rng = Random::seeded(3u64);
        assert_eq!(
            rng.next_i32_range(5, 3),
            Err(RandomError::inverted_range(5, 3))
        );
        assert!(rng.next_i32_below(-1).is_err());
        assert!(rng.next_f32_range(1.0, 0.0).is_err());
        assert!(rng.next_f64_range(f64::NAN, 1.0).is_err());
        assert!(rng.next_f64_range(0.0, f64::INFINITY).is_err());
        assert!(rng.next_decimal_range(Decimal::new(10, 0), Decimal::ONE).is_err());
        assert!(rng.next_char_range('b', 'a').is_err());
        assert!(
            rng.next_date_time_range(DateTime::MAX, DateTime::MIN)
                .is_err()
        );
    }

    #[test]
    fn full_float_range_does_not_overflow() {
        for unit in [0.0, 0.25, 0.5, TOP_UNIT] {
            let mut rng = fixed(unit);
            let d = rng.next_f64_range(f64::MIN, f64::MAX).unwrap();
            assert!(d.is_finite() && d < f64::MAX, "{d}");
            let f = rng.next_f32_range(f32::MIN, f32::MAX).unwrap();
            assert!(f.is_finite() && f < f32::MAX, "{f}");
        }
    }

    #[test]
    fn full_decimal_range_does_not_overflow() {
        for unit in [0.0, 0.5, TOP_UNIT] {
            let mut rng = fixed(unit);
            let d = rng.next_decimal_range(Decimal::MIN, Decimal::MAX).unwrap();
            assert!(d >= Decimal::MIN && d < Decimal::MAX);
        }
    }

    #[test]
    fn decimal_draw_stays_below_max_after_rounding() {
        let mut rng = fixed(TOP_UNIT);
        let min = Decimal::new(1_000_000_000_000_000, 0);
        let max = min + Decimal::ONE;
        let v = rng.next_decimal_range(min, max).unwrap();
        assert!(v >= min && v < max, "{v}");

        let tiny = Decimal::new(1, 28);
        assert_eq!(rng.next_decimal_range(Decimal::ZERO, tiny), Ok(Decimal::ZERO));
    }

    #[test]
    fn unit_decimal_is_below_one() {
        assert_eq!(unit_decimal(0.0), Decimal::ZERO);
        assert_eq!(unit_decimal(0.5), Decimal::new(5, 1));
        assert!(unit_decimal(TOP_UNIT) < Decimal::ONE);
        assert!(unit_decimal(TOP_UNIT) > Decimal::new(9_999_999, 7));
    }

    #[test]
    fn step_down_decimal_picks_the_nearest_lower_value() {
        let max = Decimal::new(25, 1);
        assert_eq!(
            step_down_decimal(max, Decimal::ZERO),
            max - Decimal::new(1, 28)
        );
        assert_eq!(step_down_decimal(max, max), max);
    }

    #[test]
    fn next_bool_reads_low_bit_of_byte() {
        let mut odd = Random::new(FixedSource { unit: 0.0, byte: 0x01 });
        let mut high = Random::new(FixedSource { unit: 0.0, byte: 0x80 });
        assert!(odd.next_bool());
        // The high bit alone does not make a `true`.
        assert!(!high.next_bool());
    }

    #[test]
    fn next_bool_uses_one_byte_of_engine_output() {
        let mut rng = Random::seeded(11u64);
        let mut engine = Xoshiro256StarStar::new(11u64);
        let expected = engine.next_u64() as u8 & 1 == 1;
        assert_eq!(rng.next_bool(), expected);
    }

    #[test]
    fn char_draws_skip_surrogates() {
        let mut below = fixed(0.5);
        // With the gap removed the index space is [0xD000, 0xE800); its
        // midpoint lands past the surrogate block.
        let c = below.next_char_range('\u{D000}', '\u{F000}').unwrap();
        assert_eq!(c as u32, 0xD000 + 0x1800 / 2 + 0x800);

        let mut rng = Random::seeded(21u64);
        for _ in 0..10_000 {
            let c = rng.next_char_range('\u{D7FF}', '\u{E001}').unwrap();
            assert!(c == '\u{D7FF}' || c == '\u{E000}', "{:?}", c);
        }
    }

    #[test]
    fn strings_pick_from_charset() {
        let mut rng = fixed(0.5);
        assert_eq!(rng.next_string_from_str(3, "abc"), Ok("bbb".to_string()));
        assert_eq!(rng.next_string(2), "OO");

        let mut top = fixed(TOP_UNIT);
        assert_eq!(top.next_string_from(2, &['x', 'y']), Ok("yy".to_string()));
        assert_eq!(top.next_string(0), "");
    }

    #[test]
    fn empty_charset_is_rejected() {
        let mut rng = Random::seeded(1u64);
        assert!(rng.next_string_from(4, &[]).is_err());
        assert!(rng.next_string_from_str(0, "").is_err());
    }

    #[test]
    fn date_time_offsets_from_min() {
        let mut rng = fixed(0.5);
        let min = DateTime::UNIX_EPOCH;
        let max = min.add_ticks(1_000).unwrap();
        assert_eq!(
            rng.next_date_time_range(min, max),
            Ok(min.add_ticks(500).unwrap())
        );
        assert_eq!(rng.next_date_time_range(min, min), Ok(min));
        let mut top = fixed(TOP_UNIT);
        assert_eq!(
            top.next_date_time().ticks(),
            DateTime::MAX.ticks() - 1 - 510
        );
    }

    #[test]
    fn fill_bytes_checks_region() {
        let mut rng = Random::seeded(9u64);
        let mut buf = [0u8; 8];
        assert!(rng.fill_bytes(&mut buf, 4, 5).is_err());
        assert!(rng.fill_bytes(&mut buf, 4, 4).is_ok());
        assert_eq!(&buf[..4], &[0, 0, 0, 0]);
        assert_eq!(rng.next_bytes(0), Vec::<u8>::new());
    }
}
