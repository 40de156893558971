use std::collections::BTreeSet;
use std::io::Read;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use super::CatalogImportError;
use crate::funds::domain::{
    Fund, FundCategory, FundStatus, RedemptionFrequency, RedemptionTerms,
};
use crate::funds::normalize::{parse_currency_amount, parse_percentage, parse_percentage_range};

/// Back-office CSV export row. Cells are human-formatted ("€500,000", "1.5%").
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Manager", default, deserialize_with = "empty_string_as_none")]
    manager: Option<String>,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(rename = "Tags", default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
    #[serde(
        rename = "Minimum Investment",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    minimum_investment: Option<String>,
    #[serde(
        rename = "Management Fee",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    management_fee: Option<String>,
    #[serde(
        rename = "Performance Fee",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    performance_fee: Option<String>,
    #[serde(
        rename = "Return Target",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    return_target: Option<String>,
    #[serde(rename = "Term (Years)", default, deserialize_with = "empty_string_as_none")]
    term: Option<String>,
    #[serde(
        rename = "Redemption Frequency",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    redemption_frequency: Option<String>,
    #[serde(
        rename = "Notice Period (Days)",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    notice_period: Option<String>,
    #[serde(
        rename = "Minimum Holding (Months)",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    minimum_holding: Option<String>,
    #[serde(rename = "Verified", default, deserialize_with = "empty_string_as_none")]
    verified: Option<String>,
    #[serde(
        rename = "Quiz Eligible",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    quiz_eligible: Option<String>,
    #[serde(rename = "PFIC Status", default, deserialize_with = "empty_string_as_none")]
    pfic_status: Option<String>,
    #[serde(rename = "CMVM ID", default, deserialize_with = "empty_string_as_none")]
    cmvm_id: Option<String>,
    #[serde(rename = "ISIN", default, deserialize_with = "empty_string_as_none")]
    isin: Option<String>,
    #[serde(rename = "Regulated By", default, deserialize_with = "empty_string_as_none")]
    regulated_by: Option<String>,
    #[serde(rename = "Auditor", default, deserialize_with = "empty_string_as_none")]
    auditor: Option<String>,
    #[serde(rename = "Custodian", default, deserialize_with = "empty_string_as_none")]
    custodian: Option<String>,
    #[serde(
        rename = "Reporting Frequency",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    reporting_frequency: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Last Updated", default, deserialize_with = "empty_string_as_none")]
    last_updated: Option<String>,
}

pub(crate) fn parse_funds<R: Read>(reader: R) -> Result<Vec<Fund>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut funds = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        // Header is line 1.
        funds.push(row.into_fund(index + 2)?);
    }

    Ok(funds)
}

impl CatalogRow {
    fn into_fund(self, line: usize) -> Result<Fund, CatalogImportError> {
        let invalid = |field: &'static str, value: &str| CatalogImportError::InvalidField {
            line,
            field,
            value: value.to_string(),
        };

        let id = self.id.trim();
        if id.is_empty() {
            return Err(invalid("ID", &self.id));
        }

        let mut fund = Fund::new(id, self.name.trim());
        fund.manager_name = self.manager.unwrap_or_default();
        fund.category = self.category.as_deref().map(FundCategory::parse);
        fund.tags = self
            .tags
            .as_deref()
            .map(split_tags)
            .unwrap_or_default();

        fund.minimum_investment = parse_field(&self.minimum_investment, |raw| {
            parse_currency_amount(raw).ok_or_else(|| invalid("Minimum Investment", raw))
        })?;
        fund.management_fee = parse_field(&self.management_fee, |raw| {
            parse_percentage(raw).ok_or_else(|| invalid("Management Fee", raw))
        })?;
        fund.performance_fee = parse_field(&self.performance_fee, |raw| {
            parse_percentage(raw).ok_or_else(|| invalid("Performance Fee", raw))
        })?;
        if let Some(target) = &self.return_target {
            if let Some((min, max)) = parse_percentage_range(target) {
                fund.expected_return_min = Some(min);
                fund.expected_return_max = Some(max);
            }
            fund.return_target = Some(target.clone());
        }
        fund.term = parse_field(&self.term, |raw| {
            raw.parse::<f64>()
                .ok()
                .filter(|years| years.is_finite() && *years >= 0.0)
                .ok_or_else(|| invalid("Term (Years)", raw))
        })?;

        let frequency = parse_field(&self.redemption_frequency, |raw| {
            RedemptionFrequency::parse(raw).ok_or_else(|| invalid("Redemption Frequency", raw))
        })?;
        let notice_period = parse_field(&self.notice_period, |raw| {
            raw.parse::<u32>()
                .map_err(|_| invalid("Notice Period (Days)", raw))
        })?;
        let minimum_holding_period = parse_field(&self.minimum_holding, |raw| {
            raw.parse::<u32>()
                .map_err(|_| invalid("Minimum Holding (Months)", raw))
        })?;
        if frequency.is_some() || notice_period.is_some() || minimum_holding_period.is_some() {
            fund.redemption_terms = Some(RedemptionTerms {
                frequency,
                notice_period,
                minimum_holding_period,
            });
        }

        fund.is_verified = parse_field(&self.verified, |raw| {
            parse_flag(raw).ok_or_else(|| invalid("Verified", raw))
        })?
        .unwrap_or(false);
        fund.is_quiz_eligible = parse_field(&self.quiz_eligible, |raw| {
            parse_flag(raw).ok_or_else(|| invalid("Quiz Eligible", raw))
        })?
        .unwrap_or(false);

        fund.pfic_status = self.pfic_status;
        fund.cmvm_id = self.cmvm_id;
        fund.isin = self.isin;
        fund.regulated_by = self.regulated_by;
        fund.auditor = self.auditor;
        fund.custodian = self.custodian;
        fund.reporting_frequency = self.reporting_frequency;

        fund.fund_status = parse_field(&self.status, |raw| {
            FundStatus::parse(raw).ok_or_else(|| invalid("Status", raw))
        })?
        .unwrap_or_default();
        fund.last_data_update = parse_field(&self.last_updated, |raw| {
            parse_date(raw).ok_or_else(|| invalid("Last Updated", raw))
        })?;

        Ok(fund)
    }
}

fn parse_field<T, F>(value: &Option<String>, parse: F) -> Result<Option<T>, CatalogImportError>
where
    F: FnOnce(&str) -> Result<T, CatalogImportError>,
{
    value.as_deref().map(parse).transpose()
}

fn split_tags(raw: &str) -> BTreeSet<String> {
    raw.split([';', '|'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
