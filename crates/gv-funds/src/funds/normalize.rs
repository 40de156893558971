//! Attribute normalization shared by the quiz filter, the scorer, and the catalog importer.
//!
//! Managers disclose economics as formatted text ("€500,000", "1.5%", "8-10%"). Everything
//! that needs a number goes through the typed parsers here instead of ad-hoc string handling.

use serde::Serialize;

use super::domain::{Fund, RedemptionFrequency};

/// Expected annual return band in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnRange {
    pub min: f64,
    pub max: f64,
}

impl ReturnRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Parse a percentage such as `"5%"`, `"1.75 %"` or `"2,5%"`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let core = numeric_core(raw);
    if core.is_empty() {
        return None;
    }

    let decimal = if core.contains('.') {
        core.replace(',', "")
    } else {
        core.replace(',', ".")
    };

    decimal.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a return target such as `"8-10%"`, `"6% to 8%"` or `"up to 12%"`.
///
/// A single value yields a degenerate range; reversed bounds are reordered.
pub fn parse_percentage_range(raw: &str) -> Option<(f64, f64)> {
    let lowered = raw.to_ascii_lowercase().replace(" to ", "-");
    let parts: Vec<&str> = lowered
        .split(['-', '\u{2013}', '\u{2014}'])
        .filter(|part| part.chars().any(|c| c.is_ascii_digit()))
        .collect();

    match parts.as_slice() {
        [single] => parse_percentage(single).map(|value| (value, value)),
        [low, high] => {
            let low = parse_percentage(low)?;
            let high = parse_percentage(high)?;
            Some((low.min(high), low.max(high)))
        }
        _ => None,
    }
}

/// Parse a euro amount such as `"€500,000"`, `"EUR 350 000"`, `"500.000 €"`, `"€1.2M"` or `"350k"`.
pub fn parse_currency_amount(raw: &str) -> Option<f64> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '€' | '$' | '£'))
        .collect();
    let lowered = compact.to_ascii_lowercase();
    let lowered = lowered
        .strip_prefix("eur")
        .or_else(|| lowered.strip_suffix("eur"))
        .unwrap_or(lowered.as_str());

    let (number, multiplier) = if let Some(rest) = lowered.strip_suffix("bn") {
        (rest, 1_000_000_000.0)
    } else if let Some(rest) = lowered.strip_suffix('m') {
        (rest, 1_000_000.0)
    } else if let Some(rest) = lowered.strip_suffix('k') {
        (rest, 1_000.0)
    } else {
        (lowered, 1.0)
    };

    if number.is_empty() || !number.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    canonical_decimal(number, multiplier != 1.0)
        .parse::<f64>()
        .ok()
        .map(|value| value * multiplier)
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Render a euro amount with thousands separators, e.g. `€250,000`.
pub fn format_euros(amount: f64) -> String {
    let rounded = amount.round().max(0.0) as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("€{grouped}")
}

/// Render a percentage without trailing zeros, e.g. `1.5%`.
pub fn format_percentage(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}%")
}

fn numeric_core(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.')
        .trim_end_matches(|c: char| !c.is_ascii_digit())
}

/// `1.500.000` or `500.000`: every group after the first has exactly three digits.
/// Rewrite a grouped amount into plain `1234.5` form. With both separators present the
/// later one is the decimal mark. A lone comma is decimal before a multiplier suffix or
/// when it is not followed by exactly three digits.
fn canonical_decimal(number: &str, has_multiplier: bool) -> String {
    match (number.rfind(','), number.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => number.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => number.replace(',', ""),
        (Some(comma), None) => {
            let single = number.matches(',').count() == 1;
            let decimals = number.len() - comma - 1;
            if single && (has_multiplier || decimals != 3) {
                number.replace(',', ".")
            } else {
                number.replace(',', "")
            }
        }
        (None, _) if !has_multiplier && uses_dot_grouping(number) => number.replace('.', ""),
        (None, _) => number.to_string(),
    }
}

fn uses_dot_grouping(value: &str) -> bool {
    let mut groups = value.split('.');
    let first = groups.next().unwrap_or_default();
    let rest: Vec<&str> = groups.collect();
    !first.is_empty()
        && !rest.is_empty()
        && rest
            .iter()
            .all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}

fn disclosed_text(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

impl Fund {
    /// Minimum subscription when actually disclosed (zero counts as undisclosed).
    pub fn disclosed_minimum(&self) -> Option<f64> {
        self.minimum_investment
            .filter(|amount| amount.is_finite() && *amount > 0.0)
    }

    /// Funds without a category or a disclosed minimum are listed but never ranked.
    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.disclosed_minimum().is_some()
    }

    pub fn redemption_frequency(&self) -> Option<RedemptionFrequency> {
        self.redemption_terms
            .as_ref()
            .and_then(|terms| terms.frequency)
    }

    pub fn notice_period_days(&self) -> Option<u32> {
        self.redemption_terms
            .as_ref()
            .and_then(|terms| terms.notice_period)
    }

    pub fn minimum_holding_months(&self) -> Option<u32> {
        self.redemption_terms
            .as_ref()
            .and_then(|terms| terms.minimum_holding_period)
    }

    /// Holding horizon in years: the fund term, else the minimum holding period.
    pub fn holding_period_years(&self) -> Option<f64> {
        self.term
            .filter(|years| years.is_finite() && *years >= 0.0)
            .or_else(|| {
                self.minimum_holding_months()
                    .map(|months| f64::from(months) / 12.0)
            })
    }

    /// Capital lock-up in months: the minimum holding period, else the full term.
    pub fn lockup_months(&self) -> Option<f64> {
        self.minimum_holding_months()
            .map(f64::from)
            .or_else(|| {
                self.term
                    .filter(|years| years.is_finite() && *years >= 0.0)
                    .map(|years| years * 12.0)
            })
    }

    /// Expected return from the numeric bounds, falling back to the textual target.
    pub fn expected_return(&self) -> Option<ReturnRange> {
        match (self.expected_return_min, self.expected_return_max) {
            (Some(min), Some(max)) => Some(ReturnRange {
                min: min.min(max),
                max: min.max(max),
            }),
            (Some(value), None) | (None, Some(value)) => Some(ReturnRange {
                min: value,
                max: value,
            }),
            (None, None) => self
                .return_target
                .as_deref()
                .and_then(parse_percentage_range)
                .map(|(min, max)| ReturnRange { min, max }),
        }
    }

    pub fn has_pfic_status(&self) -> bool {
        self.pfic_status.is_some()
    }

    pub fn cmvm_registration(&self) -> Option<&str> {
        disclosed_text(&self.cmvm_id)
    }

    pub fn regulator(&self) -> Option<&str> {
        disclosed_text(&self.regulated_by)
    }

    pub fn named_auditor(&self) -> Option<&str> {
        disclosed_text(&self.auditor)
    }

    pub fn named_custodian(&self) -> Option<&str> {
        disclosed_text(&self.custodian)
    }

    pub fn reporting_cadence(&self) -> Option<&str> {
        disclosed_text(&self.reporting_frequency)
    }
}
