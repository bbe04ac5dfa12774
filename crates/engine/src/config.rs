//! Threshold configuration consumed by the engine.
//!
//! The defaults mirror the deployed tCDP parameters: an ideal collateralization ratio of
//! 1 / 0.40 (250%), rebalanced once it leaves the band between 1 / 0.45 (~222%) and
//! 1 / 0.35 (~286%).

use std::path::Path;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::math::{BASE_DECIMALS, MAX_DISPLAY_DECIMALS};

/// Ideal collateralization ratio (1 / 0.40 = 2.5 in WAD)
pub const IDEAL_RATIO: U256 = U256::from_limbs([2_500_000_000_000_000_000, 0, 0, 0]);

/// Upper collateralization ratio bound (1 / 0.35 ~= 2.857 in WAD, truncated)
pub const UPPER_RATIO: U256 = U256::from_limbs([2_857_142_857_142_857_142, 0, 0, 0]);

/// Lower collateralization ratio bound (1 / 0.45 ~= 2.222 in WAD, truncated)
pub const LOWER_RATIO: U256 = U256::from_limbs([2_222_222_222_222_222_222, 0, 0, 0]);

/// Supply below which the pool counts as uninitialized (wei)
pub const DUST: U256 = U256::from_limbs([1_000_000, 0, 0, 0]);

/// Ether kept back from "max" deposits to pay for gas (0.02 ether)
pub const GAS_RESERVATION: U256 = U256::from_limbs([20_000_000_000_000_000, 0, 0, 0]);

/// Allowance used for unlimited approvals (2^256 - 1)
pub const MAX_AMOUNT: U256 = U256::MAX;

/// Protocol thresholds used by every projection and decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thresholds {
    /// Target collateral/debt ratio (WAD-scaled)
    pub ideal_ratio: U256,
    /// Ratio above which the position is leveraged (WAD-scaled)
    pub upper_ratio: U256,
    /// Ratio below which the position is deleveraged (WAD-scaled)
    pub lower_ratio: U256,
    /// Minimum meaningful supply/amount
    pub dust: U256,
    /// Ether withheld from max-deposit computations
    pub gas_reservation: U256,
    /// Amount used for unlimited approvals
    pub max_amount: U256,
    /// Decimals of the collateral, debt and share tokens
    pub base_decimals: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ideal_ratio: IDEAL_RATIO,
            upper_ratio: UPPER_RATIO,
            lower_ratio: LOWER_RATIO,
            dust: DUST,
            gas_reservation: GAS_RESERVATION,
            max_amount: MAX_AMOUNT,
            base_decimals: BASE_DECIMALS,
        }
    }
}

impl Thresholds {
    /// Parses thresholds from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let thresholds: Self = serde_json::from_str(json)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Reads thresholds from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that the ratio band is ordered and the decimals are displayable.
    pub fn validate(&self) -> Result<()> {
        if self.lower_ratio.is_zero() {
            return Err(EngineError::InvalidConfig(
                "lowerRatio must be greater than zero".to_string(),
            ));
        }
        if self.lower_ratio >= self.ideal_ratio || self.ideal_ratio >= self.upper_ratio {
            return Err(EngineError::InvalidConfig(format!(
                "ratios must satisfy lower < ideal < upper (got {} / {} / {})",
                self.lower_ratio, self.ideal_ratio, self.upper_ratio
            )));
        }
        if self.base_decimals > MAX_DISPLAY_DECIMALS {
            return Err(EngineError::InvalidConfig(format!(
                "baseDecimals {} exceeds {}",
                self.base_decimals, MAX_DISPLAY_DECIMALS
            )));
        }
        Ok(())
    }
}
