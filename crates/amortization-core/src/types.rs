use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.0325 = 3.25%). Never as percentages.
pub type Rate = Decimal;

/// Decimal places kept on every monetary amount the engine produces.
pub const CENTS_DP: u32 = 2;

/// Midpoint rule used when rounding money to cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoneyRounding {
    /// Banker's rounding: 0.125 -> 0.12, 0.135 -> 0.14.
    #[default]
    HalfEven,
    /// Commercial rounding: 0.125 -> 0.13.
    HalfAwayFromZero,
}

impl MoneyRounding {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            MoneyRounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            MoneyRounding::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
        }
    }

    /// Round an amount to whole cents.
    pub fn to_cents(self, amount: Money) -> Money {
        amount.round_dp_with_strategy(CENTS_DP, self.strategy())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
