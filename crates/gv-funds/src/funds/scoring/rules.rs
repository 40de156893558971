use super::config::{ScoringWeights, REFERENCE_MINIMUM};
use super::{ScoreComponent, ScoringFactor};
use crate::funds::domain::{Fund, RedemptionFrequency};
use crate::funds::normalize::{format_euros, format_percentage};

const GOVERNANCE_POINTS_PER_SIGNAL: f64 = 25.0;
const LOCKUP_HALF_LIFE_MONTHS: f64 = 24.0;
const FEE_HALF_SCORE_PERCENT: f64 = 10.0;
const MAX_NOTICE_PENALTY: f64 = 20.0;

/// Factor-level view of a fund before the ranking gates are applied.
pub(crate) struct FundAssessment {
    pub components: Vec<ScoreComponent>,
    pub missing: Vec<ScoringFactor>,
    pub total: f64,
}

pub(crate) fn assess_fund(fund: &Fund, weights: &ScoringWeights) -> FundAssessment {
    let mut components = Vec::new();
    let mut missing = Vec::new();

    let factors: [(ScoringFactor, Option<(f64, String)>); 4] = [
        (ScoringFactor::TotalFees, fee_factor(fund)),
        (ScoringFactor::Liquidity, liquidity_factor(fund)),
        (ScoringFactor::Governance, governance_factor(fund)),
        (
            ScoringFactor::MinimumInvestment,
            minimum_investment_factor(fund),
        ),
    ];

    let mut total = 0.0;
    for (factor, outcome) in factors {
        match outcome {
            Some((score, notes)) => {
                let score = round2(score.clamp(0.0, 100.0));
                let weighted = round2(score * factor.weight(weights));
                total += weighted;
                components.push(ScoreComponent {
                    factor,
                    score,
                    weighted,
                    notes,
                });
            }
            None => missing.push(factor),
        }
    }

    FundAssessment {
        components,
        missing,
        total: round2(total),
    }
}

fn fee_factor(fund: &Fund) -> Option<(f64, String)> {
    let (combined, notes) = match (fund.management_fee, fund.performance_fee) {
        (Some(management), Some(performance)) => {
            let combined = management + performance;
            let notes = format!(
                "total fees {} ({} management + {} performance)",
                format_percentage(combined),
                format_percentage(management),
                format_percentage(performance)
            );
            (combined, notes)
        }
        (Some(management), None) => (
            management,
            format!(
                "management fee {} (performance fee undisclosed)",
                format_percentage(management)
            ),
        ),
        (None, Some(performance)) => (
            performance,
            format!(
                "performance fee {} (management fee undisclosed)",
                format_percentage(performance)
            ),
        ),
        (None, None) => return None,
    };

    let combined = combined.max(0.0);
    let score = 100.0 * FEE_HALF_SCORE_PERCENT / (FEE_HALF_SCORE_PERCENT + combined);
    Some((score, notes))
}

fn frequency_points(frequency: RedemptionFrequency) -> f64 {
    match frequency {
        RedemptionFrequency::Daily => 100.0,
        RedemptionFrequency::Weekly => 90.0,
        RedemptionFrequency::Monthly => 80.0,
        RedemptionFrequency::Quarterly => 65.0,
        RedemptionFrequency::Annual => 45.0,
        RedemptionFrequency::EndOfTerm => 10.0,
    }
}

fn liquidity_factor(fund: &Fund) -> Option<(f64, String)> {
    let lockup = fund.lockup_months();
    let frequency = fund.redemption_frequency();

    let lockup_score =
        lockup.map(|months| 100.0 * LOCKUP_HALF_LIFE_MONTHS / (LOCKUP_HALF_LIFE_MONTHS + months));
    let frequency_score = frequency.map(frequency_points);

    let base = match (lockup_score, frequency_score) {
        (Some(lockup), Some(frequency)) => 0.6 * lockup + 0.4 * frequency,
        (Some(lockup), None) => lockup,
        (None, Some(frequency)) => frequency,
        (None, None) => return None,
    };

    let notice = fund.notice_period_days();
    let penalty = notice
        .map(|days| (f64::from(days) / 365.0 * MAX_NOTICE_PENALTY).min(MAX_NOTICE_PENALTY))
        .unwrap_or(0.0);

    let mut details = Vec::new();
    if let Some(months) = lockup {
        details.push(format!("{}-month lock-up", months.round()));
    }
    if let Some(frequency) = frequency {
        details.push(format!("{} redemptions", frequency.label()));
    }
    if let Some(days) = notice {
        details.push(format!("{days}-day notice"));
    }

    Some((base - penalty, details.join(", ")))
}

fn governance_factor(fund: &Fund) -> Option<(f64, String)> {
    let disclosed = fund.cmvm_registration().is_some()
        || fund.regulator().is_some()
        || fund.named_auditor().is_some()
        || fund.named_custodian().is_some()
        || fund.reporting_cadence().is_some();
    if !disclosed {
        return None;
    }

    let mut signals = Vec::new();
    let regulated_by_cmvm = fund
        .regulator()
        .map(|regulator| regulator.to_ascii_lowercase().contains("cmvm"))
        .unwrap_or(false);
    match fund.cmvm_registration() {
        Some(id) => signals.push(format!("CMVM registration {id}")),
        None if regulated_by_cmvm => signals.push("CMVM regulated".to_string()),
        None => {}
    }
    if let Some(auditor) = fund.named_auditor() {
        signals.push(format!("audited by {auditor}"));
    }
    if let Some(custodian) = fund.named_custodian() {
        signals.push(format!("custodian {custodian}"));
    }
    if let Some(cadence) = fund.reporting_cadence() {
        signals.push(format!("{cadence} reporting"));
    }

    let score = GOVERNANCE_POINTS_PER_SIGNAL * signals.len() as f64;
    let notes = if signals.is_empty() {
        "no verifiable governance signals".to_string()
    } else {
        signals.join(", ")
    };

    Some((score, notes))
}

fn minimum_investment_factor(fund: &Fund) -> Option<(f64, String)> {
    let minimum = fund.disclosed_minimum()?;
    if minimum <= REFERENCE_MINIMUM {
        return Some((
            100.0,
            format!(
                "minimum {} at or below the {} reference",
                format_euros(minimum),
                format_euros(REFERENCE_MINIMUM)
            ),
        ));
    }

    Some((
        100.0 * REFERENCE_MINIMUM / minimum,
        format!(
            "minimum {} above the {} reference",
            format_euros(minimum),
            format_euros(REFERENCE_MINIMUM)
        ),
    ))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
