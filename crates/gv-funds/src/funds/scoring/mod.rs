//! Weighted, explainable fund ranking.
//!
//! Each fund is scored on four independently normalized factors (total fees, liquidity,
//! governance, minimum investment). Funds that are incomplete or that cannot be assessed on
//! two or more factors are left out of the ranking entirely rather than scored as zero.

mod clusters;
mod config;
mod rules;

pub use clusters::{FundCluster, PriorityLens};
pub use config::{ScoringWeights, CLUSTER_SIZE, REFERENCE_MINIMUM};

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{Fund, FundId};
use rules::assess_fund;

/// Most factors a fund may lack and still be ranked.
const MAX_MISSING_FACTORS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringFactor {
    TotalFees,
    Liquidity,
    Governance,
    MinimumInvestment,
}

impl ScoringFactor {
    pub const fn label(self) -> &'static str {
        match self {
            ScoringFactor::TotalFees => "total fees",
            ScoringFactor::Liquidity => "liquidity",
            ScoringFactor::Governance => "governance",
            ScoringFactor::MinimumInvestment => "minimum investment",
        }
    }

    pub fn weight(self, weights: &ScoringWeights) -> f64 {
        match self {
            ScoringFactor::TotalFees => weights.total_fees,
            ScoringFactor::Liquidity => weights.liquidity,
            ScoringFactor::Governance => weights.governance,
            ScoringFactor::MinimumInvestment => weights.minimum_investment,
        }
    }
}

/// One factor's normalized (0-100) and weighted contribution, kept for transparency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoringFactor,
    pub score: f64,
    pub weighted: f64,
    pub notes: String,
}

/// A ranked fund with its composite score and the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFund {
    pub fund: Fund,
    pub score: f64,
    pub components: Vec<ScoreComponent>,
    pub justification: String,
}

impl ScoredFund {
    pub fn component(&self, factor: ScoringFactor) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
    }
}

/// Why a fund was left out of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExclusionReason {
    MissingCategory,
    UndisclosedMinimum,
    InsufficientData { missing: Vec<ScoringFactor> },
}

impl ExclusionReason {
    pub fn summary(&self) -> String {
        match self {
            ExclusionReason::MissingCategory => "fund category not disclosed".to_string(),
            ExclusionReason::UndisclosedMinimum => "minimum investment not disclosed".to_string(),
            ExclusionReason::InsufficientData { missing } => {
                let labels: Vec<&str> = missing.iter().map(|factor| factor.label()).collect();
                format!("cannot verify {}", labels.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedFund {
    pub id: FundId,
    pub name: String,
    pub reason: ExclusionReason,
}

/// Ranked list, priority clusters, and the funds the completeness gate held back.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortlist {
    pub ranked: Vec<ScoredFund>,
    pub clusters: Vec<FundCluster>,
    pub excluded: Vec<ExcludedFund>,
}

/// Deterministic scorer over a fixed weight configuration.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score a single fund, or explain why it cannot be ranked.
    pub fn score(&self, fund: &Fund) -> Result<ScoredFund, ExclusionReason> {
        if fund.category.is_none() {
            return Err(ExclusionReason::MissingCategory);
        }
        if fund.disclosed_minimum().is_none() {
            return Err(ExclusionReason::UndisclosedMinimum);
        }

        let assessment = assess_fund(fund, &self.weights);
        if assessment.missing.len() > MAX_MISSING_FACTORS {
            return Err(ExclusionReason::InsufficientData {
                missing: assessment.missing,
            });
        }

        let justification = justify(assessment.total, &assessment.components, &assessment.missing);

        Ok(ScoredFund {
            fund: fund.clone(),
            score: assessment.total,
            components: assessment.components,
            justification,
        })
    }

    /// Rank every scorable fund: score descending, verified first, then by id.
    pub fn rank(&self, funds: &[Fund]) -> Vec<ScoredFund> {
        self.partition(funds).0
    }

    pub fn clusters(&self, ranked: &[ScoredFund]) -> Vec<FundCluster> {
        clusters::build_clusters(ranked)
    }

    pub fn shortlist(&self, funds: &[Fund]) -> Shortlist {
        let (ranked, excluded) = self.partition(funds);
        let clusters = self.clusters(&ranked);
        Shortlist {
            ranked,
            clusters,
            excluded,
        }
    }

    fn partition(&self, funds: &[Fund]) -> (Vec<ScoredFund>, Vec<ExcludedFund>) {
        let mut ranked = Vec::with_capacity(funds.len());
        let mut excluded = Vec::new();

        for fund in funds {
            match self.score(fund) {
                Ok(scored) => ranked.push(scored),
                Err(reason) => excluded.push(ExcludedFund {
                    id: fund.id.clone(),
                    name: fund.name.clone(),
                    reason,
                }),
            }
        }

        ranked.sort_by(ranking_order);
        (ranked, excluded)
    }
}

fn ranking_order(a: &ScoredFund, b: &ScoredFund) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.fund.is_verified.cmp(&a.fund.is_verified))
        .then_with(|| a.fund.id.cmp(&b.fund.id))
}

fn justify(total: f64, components: &[ScoreComponent], missing: &[ScoringFactor]) -> String {
    let mut parts: Vec<String> = components
        .iter()
        .map(|component| {
            format!(
                "{} {:.1}/100 ({})",
                component.factor.label(),
                component.score,
                component.notes
            )
        })
        .collect();

    for factor in missing {
        parts.push(format!("{} not scored (undisclosed)", factor.label()));
    }

    format!("Scored {:.1}/100: {}", total, parts.join("; "))
}
