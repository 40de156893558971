use serde::{Deserialize, Serialize};

use super::config::CLUSTER_SIZE;
use super::{ScoredFund, ScoringFactor};

/// Named shortlist lens. Each lens orders the ranked set by a single dominant factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityLens {
    LowestFees,
    FastestExit,
    StrongestGovernance,
    LowestMinimum,
}

impl PriorityLens {
    pub const ALL: [PriorityLens; 4] = [
        PriorityLens::LowestFees,
        PriorityLens::FastestExit,
        PriorityLens::StrongestGovernance,
        PriorityLens::LowestMinimum,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PriorityLens::LowestFees => "Lowest Fees",
            PriorityLens::FastestExit => "Fastest Exit",
            PriorityLens::StrongestGovernance => "Strongest Governance",
            PriorityLens::LowestMinimum => "Lowest Minimum",
        }
    }

    pub const fn factor(self) -> ScoringFactor {
        match self {
            PriorityLens::LowestFees => ScoringFactor::TotalFees,
            PriorityLens::FastestExit => ScoringFactor::Liquidity,
            PriorityLens::StrongestGovernance => ScoringFactor::Governance,
            PriorityLens::LowestMinimum => ScoringFactor::MinimumInvestment,
        }
    }

    /// Higher is better. `None` when the fund cannot be judged through this lens.
    fn sort_key(self, scored: &ScoredFund) -> Option<f64> {
        match self {
            PriorityLens::LowestMinimum => scored.fund.disclosed_minimum().map(|amount| -amount),
            _ => scored.component(self.factor()).map(|component| component.score),
        }
    }
}

/// Top funds under one priority lens. Membership may overlap across clusters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundCluster {
    pub priority: PriorityLens,
    pub label: &'static str,
    pub members: Vec<ScoredFund>,
}

/// Build every lens over an already ranked list. Ties keep the ranking order; empty
/// clusters are omitted.
pub(crate) fn build_clusters(ranked: &[ScoredFund]) -> Vec<FundCluster> {
    PriorityLens::ALL
        .iter()
        .filter_map(|lens| {
            let mut candidates: Vec<(f64, &ScoredFund)> = ranked
                .iter()
                .filter_map(|scored| lens.sort_key(scored).map(|key| (key, scored)))
                .collect();
            candidates.sort_by(|a, b| b.0.total_cmp(&a.0));

            let members: Vec<ScoredFund> = candidates
                .into_iter()
                .take(CLUSTER_SIZE)
                .map(|(_, scored)| scored.clone())
                .collect();

            (!members.is_empty()).then(|| FundCluster {
                priority: *lens,
                label: lens.label(),
                members,
            })
        })
        .collect()
}
