//! `fixed<M>x<N>` / `ufixed<M>x<N>`: decimals scaled by `10^N` and stored as
//! an integer word.
//!
//! The parser refuses these types, so only direct callers reach this module.
//! Values travel as decimal text (`"-1.25"`) so that scaling is exact.

use calldata_primitives::{U256, WORD_SIZE};

use crate::error::{AbiError, Result};
use crate::signature::check_bits;
use crate::types::{NumericOpts, I256};
use crate::word::{ensure_capacity, read_u256, write_u256};

use super::{int, uint};

/// Encode a signed decimal as `fixed<bit_width>x<exponent>`
pub fn encode_signed(
    value: &str,
    opts: NumericOpts,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    let scaled = scale(value, opts)?;
    let bits = usize::from(opts.bit_width);
    if !scaled.fits_bits(bits) {
        return Err(AbiError::OutOfRange(format!(
            "{value} does not fit in fixed{bits}x{}",
            opts.exponent
        )));
    }
    int::encode(&scaled, 256, buf, offset)
}

/// Decode a `fixed<bit_width>x<exponent>` word into decimal text
pub fn decode_signed(opts: NumericOpts, data: &[u8], offset: usize) -> Result<(String, usize)> {
    let (scaled, read) = int::decode(usize::from(opts.bit_width), data, offset)?;
    Ok((unscale(&scaled, opts.exponent), read))
}

/// Encode a non-negative decimal as `ufixed<bit_width>x<exponent>`
pub fn encode_unsigned(
    value: &str,
    opts: NumericOpts,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    let scaled = scale(value, opts)?;
    if scaled.is_negative() {
        return Err(AbiError::OutOfRange(format!("negative value {value} for ufixed")));
    }
    let bits = usize::from(opts.bit_width);
    if !uint::fits_bits(&scaled.abs(), bits) {
        return Err(AbiError::OutOfRange(format!(
            "{value} does not fit in ufixed{bits}x{}",
            opts.exponent
        )));
    }
    ensure_capacity(buf, offset, WORD_SIZE)?;
    write_u256(buf, offset, scaled.abs());
    Ok(WORD_SIZE)
}

/// Decode a `ufixed<bit_width>x<exponent>` word into decimal text
pub fn decode_unsigned(opts: NumericOpts, data: &[u8], offset: usize) -> Result<(String, usize)> {
    let bits = usize::from(opts.bit_width);
    check_bits(bits)?;
    let word = read_u256(data, offset)?;
    if !uint::fits_bits(&word, bits) {
        return Err(AbiError::MalformedInput(format!(
            "word at byte {offset} exceeds ufixed{bits}"
        )));
    }
    Ok((unscale(&I256::new(word, false), opts.exponent), WORD_SIZE))
}

/// Always one word
pub fn encoding_length() -> usize {
    WORD_SIZE
}

/// `value * 10^exponent` as an integer; digits beyond the exponent must be zero
fn scale(value: &str, opts: NumericOpts) -> Result<I256> {
    check_bits(usize::from(opts.bit_width))?;
    let text = value.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(AbiError::mismatch("decimal number", value));
    }

    let exponent = usize::from(opts.exponent);
    let significant = fraction.trim_end_matches('0');
    if significant.len() > exponent {
        return Err(AbiError::OutOfRange(format!(
            "{value} has more than {exponent} decimal places"
        )));
    }

    let mut digits = String::with_capacity(whole.len() + exponent);
    digits.push_str(whole);
    digits.push_str(significant);
    digits.extend(std::iter::repeat('0').take(exponent - significant.len()));
    if digits.is_empty() {
        digits.push('0');
    }
    let magnitude = U256::from_dec_str(&digits)
        .map_err(|_| AbiError::OutOfRange(format!("{value} scaled by 10^{exponent} overflows")))?;
    Ok(I256::new(magnitude, negative))
}

/// Inverse of [`scale`], trimming trailing fractional zeros
fn unscale(scaled: &I256, exponent: u16) -> String {
    let exponent = usize::from(exponent);
    let mut digits = scaled.abs().to_string();
    if digits.len() <= exponent {
        digits = format!("{}{digits}", "0".repeat(exponent + 1 - digits.len()));
    }
    let (whole, fraction) = digits.split_at(digits.len() - exponent);
    let fraction = fraction.trim_end_matches('0');

    let sign = if scaled.is_negative() { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}
