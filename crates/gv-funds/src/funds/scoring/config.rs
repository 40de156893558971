use serde::{Deserialize, Serialize};

/// Minimum investment the Golden Visa fund route requires, in euros.
pub const REFERENCE_MINIMUM: f64 = 500_000.0;

/// Number of funds surfaced per priority cluster.
pub const CLUSTER_SIZE: usize = 3;

/// Share of the composite score carried by each factor. Fractions sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub total_fees: f64,
    pub liquidity: f64,
    pub governance: f64,
    pub minimum_investment: f64,
}

impl ScoringWeights {
    pub const STANDARD: Self = Self {
        total_fees: 0.35,
        liquidity: 0.35,
        governance: 0.20,
        minimum_investment: 0.10,
    };
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}
