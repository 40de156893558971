use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Investable amount bracket. Ceilings are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(rename = "under250k")]
    Under250k,
    #[serde(rename = "250k-500k")]
    Up500k,
    #[serde(rename = "500k+")]
    Above500k,
}

impl BudgetTier {
    pub const fn label(self) -> &'static str {
        match self {
            BudgetTier::Under250k => "under250k",
            BudgetTier::Up500k => "250k-500k",
            BudgetTier::Above500k => "500k+",
        }
    }

    /// Highest minimum investment admitted by the tier; the top tier has none.
    pub const fn ceiling(self) -> Option<f64> {
        match self {
            BudgetTier::Under250k => Some(250_000.0),
            BudgetTier::Up500k => Some(500_000.0),
            BudgetTier::Above500k => None,
        }
    }
}

/// Coarse investment strategy. Each choice is a distinct filter mode, never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Safety,
    Growth,
    FastExit,
}

impl Strategy {
    pub const fn label(self) -> &'static str {
        match self {
            Strategy::Safety => "safety",
            Strategy::Growth => "growth",
            Strategy::FastExit => "fast-exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomePreference {
    Yes,
    No,
}

impl IncomePreference {
    pub const fn label(self) -> &'static str {
        match self {
            IncomePreference::Yes => "yes",
            IncomePreference::No => "no",
        }
    }
}

/// Whether the investor needs a fund that can be held in a US tax-advantaged way (PFIC/QEF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxAccountPreference {
    Yes,
    No,
}

impl TaxAccountPreference {
    pub const fn label(self) -> &'static str {
        match self {
            TaxAccountPreference::Yes => "yes",
            TaxAccountPreference::No => "no",
        }
    }
}

/// Intended holding horizon. Mapped by its own table, separate from `Strategy::FastExit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "3-5-years")]
    ThreeToFiveYears,
    #[serde(rename = "5-8-years")]
    FiveToEightYears,
    #[serde(rename = "8-plus-years")]
    EightPlusYears,
}

impl Timeline {
    pub const fn label(self) -> &'static str {
        match self {
            Timeline::ThreeToFiveYears => "3-5-years",
            Timeline::FiveToEightYears => "5-8-years",
            Timeline::EightPlusYears => "8-plus-years",
        }
    }

    pub const fn max_years(self) -> Option<f64> {
        match self {
            Timeline::ThreeToFiveYears => Some(5.0),
            Timeline::FiveToEightYears => Some(8.0),
            Timeline::EightPlusYears => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nationality {
    Us,
    NonUs,
}

impl Nationality {
    pub const fn label(self) -> &'static str {
        match self {
            Nationality::Us => "us",
            Nationality::NonUs => "non-us",
        }
    }
}

/// Investor answers collected by the quiz. Every dimension is optional and only narrows
/// the candidate set when answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<IncomePreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_account: Option<TaxAccountPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<Nationality>,
}

impl QuizAnswers {
    pub fn is_empty(&self) -> bool {
        self.answered().is_empty()
    }

    /// Labels of the answered dimensions, in quiz order.
    pub fn answered(&self) -> Vec<&'static str> {
        let mut answered = Vec::new();
        if self.budget.is_some() {
            answered.push("budget");
        }
        if self.strategy.is_some() {
            answered.push("strategy");
        }
        if self.income.is_some() {
            answered.push("income");
        }
        if self.tax_account.is_some() {
            answered.push("taxAccount");
        }
        if self.timeline.is_some() {
            answered.push("timeline");
        }
        if self.nationality.is_some() {
            answered.push("nationality");
        }
        answered
    }
}

/// Error for an answer label outside the closed set of a quiz dimension.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {dimension} answer")]
pub struct UnknownAnswer {
    pub dimension: &'static str,
    pub value: String,
}

fn parse_answer<T: Copy>(
    dimension: &'static str,
    raw: &str,
    options: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, UnknownAnswer> {
    let wanted = raw.trim();
    options
        .iter()
        .copied()
        .find(|option| label(*option).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| UnknownAnswer {
            dimension,
            value: raw.to_string(),
        })
}

impl FromStr for BudgetTier {
    type Err = UnknownAnswer;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_answer(
            "budget",
            raw,
            &[Self::Under250k, Self::Up500k, Self::Above500k],
            Self::label,
        )
    }
}

impl FromStr for Strategy {
    type Err = UnknownAnswer;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_answer(
            "strategy",
            raw,
            &[Self::Safety, Self::Growth, Self::FastExit],
            Self::label,
        )
    }
}

impl FromStr for IncomePreference {
    type Err = UnknownAnswer;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_answer("income", raw, &[Self::Yes, Self::No], Self::label)
    }
}

impl FromStr for TaxAccountPreference {
    type Err = UnknownAnswer;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_answer("tax account", raw, &[Self::Yes, Self::No], Self::label)
    }
}

impl FromStr for Timeline {
    type Err = UnknownAnswer;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_answer(
            "timeline",
            raw,
            &[
                Self::ThreeToFiveYears,
                Self::FiveToEightYears,
                Self::EightPlusYears,
            ],
            Self::label,
        )
    }
}

impl FromStr for Nationality {
    type Err = UnknownAnswer;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_answer("nationality", raw, &[Self::Us, Self::NonUs], Self::label)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_deserialize_from_query_labels() {
        let answers: QuizAnswers = serde_json::from_str(
            r#"{ "budget": "500k+", "strategy": "fast-exit", "taxAccount": "yes", "timeline": "5-8-years" }"#,
        )
        .expect("answers parse");

        assert_eq!(answers.budget, Some(BudgetTier::Above500k));
        assert_eq!(answers.strategy, Some(Strategy::FastExit));
        assert_eq!(answers.tax_account, Some(TaxAccountPreference::Yes));
        assert_eq!(answers.timeline, Some(Timeline::FiveToEightYears));
        assert!(answers.income.is_none());
        assert_eq!(
            answers.answered(),
            vec!["budget", "strategy", "taxAccount", "timeline"]
        );
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert!(serde_json::from_str::<QuizAnswers>(r#"{ "budget": "1m+" }"#).is_err());

        let error = "balanced".parse::<Strategy>().expect_err("not a strategy");
        assert_eq!(error.dimension, "strategy");
        assert!(error.to_string().contains("balanced"));
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("UNDER250K".parse::<BudgetTier>(), Ok(BudgetTier::Under250k));
        assert_eq!(" Non-US ".parse::<Nationality>(), Ok(Nationality::NonUs));
        assert_eq!("8-plus-years".parse::<Timeline>(), Ok(Timeline::EightPlusYears));
    }

    #[test]
    fn empty_answers_report_no_dimensions() {
        assert!(QuizAnswers::default().is_empty());
    }
}
