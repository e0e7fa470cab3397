// Bit-exact conversions between raw generator words and typed values.
//
// Everything here is a pure function: no state, no randomness. The engine in
// `xoshiro.rs` feeds raw words through these to produce floats and byte
// streams, and the facade's OS-entropy source (`leevox_random::secure`) uses
// the same transforms on bytes read from the kernel, so both sources shape
// their output identically.
//
// The float multipliers are built from their IEEE-754 bit patterns rather
// than from decimal literals so the conversion reproduces the Apache Commons
// RNG reference sequences bit for bit.
//
// All byte marshaling is little-endian (low byte first).

use crate::error::{RandomError, Result};

const U32_SIZE: usize = 4;
const U64_SIZE: usize = 8;

/// 2^-24, the spacing of `f32` values in [0.5, 1) shifted down to [0, 1).
pub const FLOAT_MULTIPLIER: f32 = f32::from_bits(0x3380_0000);

/// 2^-53, the spacing of `f64` values produced by `make_f64`.
pub const DOUBLE_MULTIPLIER: f64 = f64::from_bits(0x3ca0_0000_0000_0000);

// ---------------------------------------------------------------------------
// Sub-words
// ---------------------------------------------------------------------------

/// Low 32 bits of a 64-bit word.
#[inline]
pub fn extract_low(v: u64) -> u32 {
    v as u32
}

/// High 32 bits of a 64-bit word.
#[inline]
pub fn extract_high(v: u64) -> u32 {
    (v >> 32) as u32
}

/// Low 16 bits of a 32-bit word.
#[inline]
pub fn extract_low16(v: u32) -> u16 {
    v as u16
}

/// High 16 bits of a 32-bit word.
#[inline]
pub fn extract_high16(v: u32) -> u16 {
    (v >> 16) as u16
}

// ---------------------------------------------------------------------------
// Booleans and integers
// ---------------------------------------------------------------------------

/// `true` iff the most significant bit is set.
///
/// Reads the top bit, not the bottom one: high bits of a scrambled generator
/// word are the best mixed.
#[inline]
pub fn make_bool_u32(v: u32) -> bool {
    (v >> 31) != 0
}

/// `true` iff the most significant bit is set.
#[inline]
pub fn make_bool_u64(v: u64) -> bool {
    (v >> 63) != 0
}

/// Fold a 64-bit sample into 32 bits by XOR-ing its halves.
#[inline]
pub fn make_u32(v: u64) -> u32 {
    extract_high(v) ^ extract_low(v)
}

/// Join two 32-bit halves into one word, `high` in the upper bits.
#[inline]
pub fn make_u64(high: u32, low: u32) -> u64 {
    ((high as u64) << 32) | low as u64
}

// ---------------------------------------------------------------------------
// Floating point
// ---------------------------------------------------------------------------

/// Uniform `f32` in [0, 1) from the top 24 bits of `v`.
#[inline]
pub fn make_f32(v: u32) -> f32 {
    (v >> 8) as f32 * FLOAT_MULTIPLIER
}

/// Uniform `f64` in [0, 1) from the top 53 bits of `v`.
#[inline]
pub fn make_f64(v: u64) -> f64 {
    (v >> 11) as f64 * DOUBLE_MULTIPLIER
}

/// Uniform `f64` in [0, 1) from two 32-bit samples.
///
/// The top 26 bits of `v` land above the top 27 bits of `w`, giving the same
/// 53 bits of mantissa as `make_f64`.
#[inline]
pub fn make_f64_from_pair(v: u32, w: u32) -> f64 {
    let high = ((v >> 6) as u64) << 27;
    let low = (w >> 5) as u64;
    (high | low) as f64 * DOUBLE_MULTIPLIER
}

// ---------------------------------------------------------------------------
// Byte marshaling
// ---------------------------------------------------------------------------

pub fn u32_to_bytes(v: u32) -> [u8; U32_SIZE] {
    v.to_le_bytes()
}

pub fn u64_to_bytes(v: u64) -> [u8; U64_SIZE] {
    v.to_le_bytes()
}

pub fn u32s_to_bytes(input: &[u32]) -> Vec<u8> {
    input.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn u64s_to_bytes(input: &[u64]) -> Vec<u8> {
    input.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn u32_from_array(bytes: [u8; U32_SIZE]) -> u32 {
    u32::from_le_bytes(bytes)
}

pub fn u64_from_array(bytes: [u8; U64_SIZE]) -> u64 {
    u64::from_le_bytes(bytes)
}

/// Read one `u32` from exactly four bytes.
pub fn u32_from_bytes(input: &[u8]) -> Result<u32> {
    let bytes: [u8; U32_SIZE] = input
        .try_into()
        .map_err(|_| RandomError::size_mismatch("input", U32_SIZE, input.len()))?;
    Ok(u32_from_array(bytes))
}

/// Read one `u64` from exactly eight bytes.
pub fn u64_from_bytes(input: &[u8]) -> Result<u64> {
    let bytes: [u8; U64_SIZE] = input
        .try_into()
        .map_err(|_| RandomError::size_mismatch("input", U64_SIZE, input.len()))?;
    Ok(u64_from_array(bytes))
}

/// Read a `u32` array from a buffer whose length is an exact multiple of four.
pub fn u32s_from_bytes(input: &[u8]) -> Result<Vec<u32>> {
    check_multiple(U32_SIZE, input.len())?;
    input.chunks_exact(U32_SIZE).map(u32_from_bytes).collect()
}

/// Read a `u64` array from a buffer whose length is an exact multiple of eight.
pub fn u64s_from_bytes(input: &[u8]) -> Result<Vec<u64>> {
    check_multiple(U64_SIZE, input.len())?;
    input.chunks_exact(U64_SIZE).map(u64_from_bytes).collect()
}

fn check_multiple(size: usize, actual: usize) -> Result<()> {
    let expected = actual / size * size;
    if expected != actual {
        return Err(RandomError::size_mismatch("input", expected, actual));
    }
    Ok(())
}
