//! Side-by-side comparison table with best-value highlighting.

use serde::Serialize;

use super::domain::{Fund, FundId, RedemptionFrequency};
use super::normalize::{format_euros, format_percentage};

pub const MIN_COMPARED_FUNDS: usize = 2;
pub const MAX_COMPARED_FUNDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("comparison needs between {min} and {max} funds, got {found}")]
    FundCount {
        min: usize,
        max: usize,
        found: usize,
    },
    #[error("fund {0} listed more than once")]
    Duplicate(FundId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetterWhen {
    Lower,
    Higher,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCell {
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub best: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub metric: &'static str,
    pub better_when: BetterWhen,
    pub cells: Vec<ComparisonCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTable {
    pub fund_ids: Vec<FundId>,
    pub fund_names: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn row(&self, metric: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.metric == metric)
    }
}

type Metric = fn(&Fund) -> Option<(f64, String)>;

const METRICS: &[(&str, BetterWhen, Metric)] = &[
    ("Minimum investment", BetterWhen::Lower, minimum_investment),
    ("Management fee", BetterWhen::Lower, management_fee),
    ("Performance fee", BetterWhen::Lower, performance_fee),
    ("Expected return", BetterWhen::Higher, expected_return),
    ("Fund term", BetterWhen::Lower, term),
    ("Redemption frequency", BetterWhen::Higher, redemption_frequency),
];

/// Compare two to four funds. Ties for the best value are all highlighted; a row that
/// no fund discloses has no best value.
pub fn compare_funds(funds: &[Fund]) -> Result<ComparisonTable, ComparisonError> {
    if !(MIN_COMPARED_FUNDS..=MAX_COMPARED_FUNDS).contains(&funds.len()) {
        return Err(ComparisonError::FundCount {
            min: MIN_COMPARED_FUNDS,
            max: MAX_COMPARED_FUNDS,
            found: funds.len(),
        });
    }

    for (index, fund) in funds.iter().enumerate() {
        if funds[..index].iter().any(|other| other.id == fund.id) {
            return Err(ComparisonError::Duplicate(fund.id.clone()));
        }
    }

    let rows = METRICS
        .iter()
        .map(|(metric, better_when, extract)| build_row(*metric, *better_when, *extract, funds))
        .collect();

    Ok(ComparisonTable {
        fund_ids: funds.iter().map(|fund| fund.id.clone()).collect(),
        fund_names: funds.iter().map(|fund| fund.name.clone()).collect(),
        rows,
    })
}

fn build_row(
    metric: &'static str,
    better_when: BetterWhen,
    extract: Metric,
    funds: &[Fund],
) -> ComparisonRow {
    let values: Vec<Option<(f64, String)>> = funds.iter().map(extract).collect();

    let best = values
        .iter()
        .flatten()
        .map(|(value, _)| *value)
        .reduce(|a, b| match better_when {
            BetterWhen::Lower => a.min(b),
            BetterWhen::Higher => a.max(b),
        });

    let cells = values
        .into_iter()
        .map(|entry| match entry {
            Some((value, display)) => ComparisonCell {
                display,
                value: Some(value),
                best: best == Some(value),
            },
            None => ComparisonCell {
                display: "Undisclosed".to_string(),
                value: None,
                best: false,
            },
        })
        .collect();

    ComparisonRow {
        metric,
        better_when,
        cells,
    }
}

fn minimum_investment(fund: &Fund) -> Option<(f64, String)> {
    fund.disclosed_minimum()
        .map(|amount| (amount, format_euros(amount)))
}

fn management_fee(fund: &Fund) -> Option<(f64, String)> {
    fund.management_fee
        .map(|fee| (fee, format_percentage(fee)))
}

fn performance_fee(fund: &Fund) -> Option<(f64, String)> {
    fund.performance_fee
        .map(|fee| (fee, format_percentage(fee)))
}

fn expected_return(fund: &Fund) -> Option<(f64, String)> {
    fund.expected_return().map(|range| {
        let display = if range.min == range.max {
            format_percentage(range.min)
        } else {
            format!(
                "{}-{}",
                format_percentage(range.min).trim_end_matches('%'),
                format_percentage(range.max)
            )
        };
        (range.midpoint(), display)
    })
}

fn term(fund: &Fund) -> Option<(f64, String)> {
    fund.term
        .filter(|years| years.is_finite() && *years >= 0.0)
        .map(|years| (years, format!("{years} years")))
}

fn redemption_frequency(fund: &Fund) -> Option<(f64, String)> {
    fund.redemption_frequency().map(|frequency| {
        let rank = match frequency {
            RedemptionFrequency::Daily => 6.0,
            RedemptionFrequency::Weekly => 5.0,
            RedemptionFrequency::Monthly => 4.0,
            RedemptionFrequency::Quarterly => 3.0,
            RedemptionFrequency::Annual => 2.0,
            RedemptionFrequency::EndOfTerm => 1.0,
        };
        (rank, frequency.label().to_string())
    })
}
