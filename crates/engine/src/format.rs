//! User-facing rendering of amounts and percentages.
//!
//! Both formatters distinguish an absent value (`None` in, `None` out) from zero
//! (`"0"`), and reject decimal combinations that cannot be displayed.

use alloy_primitives::{I256, U256};

use crate::error::{EngineError, Result};
use crate::math::{render_fixed, signed_adaptive_precision, MAX_DISPLAY_DECIMALS};

/// Default fractional digits for amounts
pub const DEFAULT_AMOUNT_DECIMALS: u8 = 4;

/// Default fractional digits for percentages
pub const DEFAULT_PERCENTAGE_DECIMALS: u8 = 2;

fn check_decimals(base_decimals: u8, display_decimals: u8) -> Result<()> {
    if base_decimals > MAX_DISPLAY_DECIMALS
        || display_decimals > MAX_DISPLAY_DECIMALS
        || display_decimals > base_decimals
    {
        return Err(EngineError::InvalidArgument(format!(
            "invalid combination of baseDecimals {} and displayDecimals {}",
            base_decimals, display_decimals
        )));
    }
    Ok(())
}

/// Renders a raw amount in human units.
///
/// Small values get extra digits so they do not collapse to `0.0000`: when the adaptive
/// precision of `raw` reaches `display_decimals`, the value is shown with one digit more
/// than the adaptive precision. Otherwise exactly `display_decimals` digits are shown.
///
/// # Example
///
/// ```rust
/// use tcdp_rs_engine::format::amount;
/// use tcdp_rs_engine::WAD;
/// use alloy_primitives::U256;
///
/// assert_eq!(amount(Some(WAD), 18, 4).unwrap().as_deref(), Some("1.0000"));
/// assert_eq!(amount(Some(U256::ZERO), 18, 4).unwrap().as_deref(), Some("0"));
/// assert_eq!(amount(None, 18, 4).unwrap(), None);
/// ```
pub fn amount(
    raw: Option<U256>,
    base_decimals: u8,
    display_decimals: u8,
) -> Result<Option<String>> {
    check_decimals(base_decimals, display_decimals)?;

    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.is_zero() {
        return Ok(Some("0".to_string()));
    }

    let adaptive = signed_adaptive_precision(raw);
    let fraction_digits = if adaptive >= i64::from(display_decimals) {
        (adaptive + 1) as u32
    } else {
        u32::from(display_decimals)
    };

    Ok(Some(render_fixed(
        raw,
        u32::from(base_decimals),
        fraction_digits,
    )))
}

/// Renders a signed fixed-point fraction as a percentage, e.g. `0.05e18` -> `"5.00 %"`.
pub fn percentage(
    raw: Option<I256>,
    base_decimals: u8,
    display_decimals: u8,
) -> Result<Option<String>> {
    check_decimals(base_decimals, display_decimals)?;

    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.is_zero() {
        return Ok(Some("0".to_string()));
    }

    let sign = if raw.is_negative() { "-" } else { "" };
    let magnitude = raw.unsigned_abs().saturating_mul(U256::from(100u8));
    let rendered = render_fixed(
        magnitude,
        u32::from(base_decimals),
        u32::from(display_decimals),
    );
    Ok(Some(format!("{sign}{rendered} %")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{to_signed, WAD};

    #[test]
    fn test_amount_zero_and_absent() {
        assert_eq!(amount(Some(U256::ZERO), 18, 4).unwrap(), Some("0".to_string()));
        assert_eq!(amount(None, 18, 4).unwrap(), None);
    }

    #[test]
    fn test_amount_rejects_invalid_decimals() {
        assert!(matches!(
            amount(Some(WAD), 18, 19),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            amount(Some(WAD), 19, 4),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            amount(Some(WAD), 6, 8),
            Err(EngineError::InvalidArgument(_))
        ));
        // Misuse fails even when the value is absent
        assert!(matches!(
            amount(None, 18, 19),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_amount_regular_values_use_display_decimals() {
        assert_eq!(amount(Some(WAD), 18, 4).unwrap().unwrap(), "1.0000");
        assert_eq!(
            amount(Some(WAD / U256::from(2)), 18, 4).unwrap().unwrap(),
            "0.5000"
        );
        // 1234.56789 rounds half-up at four digits
        let raw = U256::from(1_234_567_890_000_000_000_000u128);
        assert_eq!(amount(Some(raw), 18, 4).unwrap().unwrap(), "1234.5679");
    }

    #[test]
    fn test_amount_small_values_get_adaptive_digits() {
        // 0.000001 ether: adaptive precision 6 -> 7 digits
        let raw = U256::from(1_000_000_000_000u64);
        assert_eq!(amount(Some(raw), 18, 4).unwrap().unwrap(), "0.0000010");
        // 1 wei: adaptive precision 18 -> 19 digits
        assert_eq!(
            amount(Some(U256::from(1)), 18, 4).unwrap().unwrap(),
            "0.0000000000000000010"
        );
    }

    #[test]
    fn test_amount_other_base() {
        // 1.5 USDC (6 decimals): 7 digits -> adaptive 12 -> 13 digits
        assert_eq!(
            amount(Some(U256::from(1_500_000)), 6, 2).unwrap().unwrap(),
            "1.5000000000000"
        );
    }

    #[test]
    fn test_percentage() {
        let five_percent = to_signed(WAD / U256::from(20));
        assert_eq!(
            percentage(Some(five_percent), 18, 2).unwrap().unwrap(),
            "5.00 %"
        );
        assert_eq!(
            percentage(Some(-five_percent), 18, 2).unwrap().unwrap(),
            "-5.00 %"
        );
        // Ideal ratio of 2.5 renders as 250%
        let ideal = to_signed(WAD * U256::from(5) / U256::from(2));
        assert_eq!(percentage(Some(ideal), 18, 0).unwrap().unwrap(), "250 %");
    }

    #[test]
    fn test_percentage_zero_absent_and_invalid() {
        assert_eq!(percentage(Some(I256::ZERO), 18, 2).unwrap(), Some("0".to_string()));
        assert_eq!(percentage(None, 18, 2).unwrap(), None);
        assert!(matches!(
            percentage(Some(I256::ONE), 1, 2),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let raw = Some(U256::from(987_654_321u64));
        assert_eq!(amount(raw, 18, 4).unwrap(), amount(raw, 18, 4).unwrap());
    }
}
