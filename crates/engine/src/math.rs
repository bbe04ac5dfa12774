//! Fixed-point arithmetic on raw token amounts.
//!
//! Every on-chain quantity is a [`U256`] in the token's smallest unit. All arithmetic in
//! this module is integer arithmetic with truncating division, so results match what the
//! contracts compute. Ratios and rates are WAD-scaled (`1e18` = `1.0`).
//!
//! Conversions between raw amounts and human decimal strings are done on the decimal
//! digits directly, which keeps them exact for any number of decimals.

use alloy_primitives::{I256, U256, U512};

use crate::error::{EngineError, Result};

/// 1.0 in WAD fixed-point (1e18)
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Decimals of ether and of the engine's WAD-scaled values
pub const BASE_DECIMALS: u8 = 18;

/// Upper bound on decimals accepted by the formatter
pub const MAX_DISPLAY_DECIMALS: u8 = 18;

/// Returns `10^exp`, or `None` if it does not fit in 256 bits.
pub fn pow10(exp: u32) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

/// Computes `x * y / d` rounded down, with a 512-bit intermediate product.
///
/// Returns zero when `d` is zero. Saturates at `U256::MAX` if the quotient does not fit.
pub fn mul_div_down(x: U256, y: U256, d: U256) -> U256 {
    if d.is_zero() {
        return U256::ZERO;
    }
    if let Some(product) = x.checked_mul(y) {
        return product / d;
    }
    let wide = U512::from(x) * U512::from(y) / U512::from(d);
    U256::saturating_from(wide)
}

/// WAD multiplication rounded down: `x * y / WAD`
pub fn w_mul_down(x: U256, y: U256) -> U256 {
    mul_div_down(x, y, WAD)
}

/// WAD division rounded down: `x * WAD / y`, zero when `y` is zero
pub fn w_div_down(x: U256, y: U256) -> U256 {
    mul_div_down(x, WAD, y)
}

/// Subtraction floored at zero
pub fn zero_floor_sub(x: U256, y: U256) -> U256 {
    x.saturating_sub(y)
}

/// Reinterprets an unsigned value as signed, saturating at `I256::MAX`.
pub fn to_signed(value: U256) -> I256 {
    I256::try_from(value).unwrap_or(I256::MAX)
}

/// Number of base-10 digits of `value` (zero has one digit).
pub fn digit_count(value: U256) -> u32 {
    value.to_string().len() as u32
}

/// Fractional digits to display so that a value keeps a roughly constant number of
/// significant digits: `18 - digits(raw) + 1`, floored at zero.
///
/// Large amounts get few decimals, dust amounts get many. The result only depends on the
/// digit count of `raw`, so unlike [`to_human`] this takes no `decimals` argument; the
/// formatter applies it to amounts of any base.
pub fn adaptive_precision(raw: U256) -> u32 {
    signed_adaptive_precision(raw).max(0) as u32
}

/// Unfloored form of [`adaptive_precision`]; the formatter compares against it.
pub(crate) fn signed_adaptive_precision(raw: U256) -> i64 {
    i64::from(MAX_DISPLAY_DECIMALS) - i64::from(digit_count(raw)) + 1
}

/// Parses a human decimal numeral (e.g. `"1.25"`) into raw units with `decimals` decimals.
///
/// Accepts digits with at most one `.`; either side of the point may be empty but not
/// both. Fails with [`EngineError::InvalidArgument`] for anything else, for a value that
/// would need more than `decimals` fractional digits, or for a value that overflows 256 bits.
pub fn to_raw(human: &str, decimals: u8) -> Result<U256> {
    let invalid = || EngineError::InvalidArgument(format!("not a non-negative decimal: {human:?}"));

    let (integer_part, fractional_part) = match human.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (human, ""),
    };

    if integer_part.is_empty() && fractional_part.is_empty() {
        return Err(invalid());
    }
    if !integer_part.bytes().all(|b| b.is_ascii_digit())
        || !fractional_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let decimals = usize::from(decimals);
    let fractional = if fractional_part.len() > decimals {
        let (kept, dropped) = fractional_part.split_at(decimals);
        if dropped.bytes().any(|b| b != b'0') {
            return Err(EngineError::InvalidArgument(format!(
                "{human:?} has more than {decimals} fractional digits"
            )));
        }
        kept.to_string()
    } else {
        format!("{fractional_part:0<decimals$}")
    };

    let combined = format!("{integer_part}{fractional}");
    let combined = combined.trim_start_matches('0');
    if combined.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(combined, 10)
        .map_err(|_| EngineError::InvalidArgument(format!("{human:?} does not fit in 256 bits")))
}

/// Renders a raw amount as an exact human decimal string, without trailing zeros.
pub fn to_human(raw: U256, decimals: u8) -> String {
    let decimals = usize::from(decimals);
    let digits = raw.to_string();
    if decimals == 0 {
        return digits;
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (integer, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

/// Renders `magnitude / 10^base` with exactly `frac` fractional digits.
///
/// The last digit is rounded half-up. `base` must be at most 18 so the rounding divisor
/// fits a `u64`; callers validate this.
pub(crate) fn render_fixed(magnitude: U256, base: u32, frac: u32) -> String {
    let digits = if frac >= base {
        let mut digits = magnitude.to_string();
        if !magnitude.is_zero() {
            digits.push_str(&"0".repeat((frac - base) as usize));
        }
        digits
    } else {
        let divisor = U256::from(10u64.pow(base - frac));
        let mut quotient = magnitude / divisor;
        let remainder = magnitude % divisor;
        if remainder.saturating_mul(U256::from(2u8)) >= divisor {
            quotient += U256::from(1u8);
        }
        quotient.to_string()
    };

    if frac == 0 {
        return digits;
    }

    let frac = frac as usize;
    let padded = format!("{digits:0>width$}", width = frac + 1);
    let (integer, fraction) = padded.split_at(padded.len() - frac);
    format!("{integer}.{fraction}")
}
