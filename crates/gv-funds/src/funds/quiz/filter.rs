use serde::Serialize;

use super::answers::{
    BudgetTier, IncomePreference, Nationality, QuizAnswers, Strategy, TaxAccountPreference,
    Timeline,
};
use crate::funds::domain::{Fund, FundCategory};
use crate::funds::normalize::format_euros;

const SAFETY_CATEGORIES: &[FundCategory] = &[
    FundCategory::RealEstate,
    FundCategory::Debt,
    FundCategory::Infrastructure,
];

const GROWTH_CATEGORIES: &[FundCategory] = &[
    FundCategory::PrivateEquity,
    FundCategory::VentureCapital,
    FundCategory::CleanEnergy,
    FundCategory::Crypto,
];

/// Holding-period ceiling behind the "fast exit" strategy.
pub const FAST_EXIT_MAX_YEARS: f64 = 6.0;

/// A fund admitted by the quiz together with the reasons it was included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizMatch {
    pub fund: Fund,
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

/// Stateless predicate built from a set of quiz answers.
#[derive(Debug, Clone)]
pub struct QuizFilter {
    answers: QuizAnswers,
}

impl QuizFilter {
    pub fn new(answers: QuizAnswers) -> Self {
        Self { answers }
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    pub fn admits(&self, fund: &Fund) -> bool {
        self.evaluate(fund).is_some()
    }

    /// Funds satisfying every answered dimension, in input order.
    pub fn apply<'a>(&self, funds: &'a [Fund]) -> Vec<&'a Fund> {
        funds.iter().filter(|fund| self.admits(fund)).collect()
    }

    /// Like [`QuizFilter::apply`], with the per-dimension explanation for each match.
    pub fn matches(&self, funds: &[Fund]) -> Vec<QuizMatch> {
        funds
            .iter()
            .filter_map(|fund| {
                self.evaluate(fund).map(|reasons| QuizMatch {
                    fund: fund.clone(),
                    reasons,
                    advisories: self.advisories(fund),
                })
            })
            .collect()
    }

    fn evaluate(&self, fund: &Fund) -> Option<Vec<String>> {
        if !fund.is_quiz_eligible {
            return None;
        }

        let mut reasons = Vec::new();

        if let Some(budget) = self.answers.budget {
            reasons.push(budget_check(fund, budget)?);
        }
        if let Some(strategy) = self.answers.strategy {
            reasons.push(strategy_check(fund, strategy)?);
        }
        if let Some(IncomePreference::Yes) = self.answers.income {
            reasons.push(income_check(fund)?);
        }
        if let Some(TaxAccountPreference::Yes) = self.answers.tax_account {
            reasons.push(tax_account_check(fund)?);
        }
        if let Some(timeline) = self.answers.timeline {
            reasons.push(timeline_check(fund, timeline)?);
        }

        Some(reasons)
    }

    fn advisories(&self, fund: &Fund) -> Vec<String> {
        let mut advisories = Vec::new();
        if self.answers.nationality == Some(Nationality::Us)
            && self.answers.tax_account != Some(TaxAccountPreference::Yes)
            && !fund.has_pfic_status()
        {
            advisories.push(
                "No PFIC status disclosed; US investors should confirm tax treatment".to_string(),
            );
        }
        advisories
    }
}

fn budget_check(fund: &Fund, budget: BudgetTier) -> Option<String> {
    let Some(ceiling) = budget.ceiling() else {
        return Some("No minimum investment ceiling for the 500k+ budget".to_string());
    };

    let minimum = fund.disclosed_minimum()?;
    (minimum <= ceiling).then(|| {
        format!(
            "Minimum investment {} within the {} budget",
            format_euros(minimum),
            format_euros(ceiling)
        )
    })
}

fn strategy_check(fund: &Fund, strategy: Strategy) -> Option<String> {
    match strategy {
        Strategy::Safety => category_check(fund, SAFETY_CATEGORIES, strategy),
        Strategy::Growth => category_check(fund, GROWTH_CATEGORIES, strategy),
        Strategy::FastExit => {
            let years = fund.holding_period_years()?;
            (years <= FAST_EXIT_MAX_YEARS).then(|| {
                format!("Holding period of {years} years fits a fast exit (max {FAST_EXIT_MAX_YEARS} years)")
            })
        }
    }
}

fn category_check(fund: &Fund, allowed: &[FundCategory], strategy: Strategy) -> Option<String> {
    let category = fund.category.as_ref()?;
    allowed
        .contains(category)
        .then(|| format!("{category} suits a {strategy} strategy"))
}

fn income_check(fund: &Fund) -> Option<String> {
    let frequency = fund.redemption_frequency()?;
    frequency
        .pays_distributions()
        .then(|| format!("{} redemptions provide ongoing income", frequency.label()))
}

fn tax_account_check(fund: &Fund) -> Option<String> {
    fund.pfic_status
        .as_deref()
        .map(|status| format!("PFIC status disclosed: {status}"))
}

fn timeline_check(fund: &Fund, timeline: Timeline) -> Option<String> {
    let Some(max_years) = timeline.max_years() else {
        return Some("Any fund term fits an 8+ year timeline".to_string());
    };

    let years = fund.holding_period_years()?;
    (years <= max_years)
        .then(|| format!("Holding period of {years} years fits the {timeline} timeline"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funds::domain::{RedemptionFrequency, RedemptionTerms};

    fn eligible(id: &str) -> Fund {
        let mut fund = Fund::new(id, id.to_uppercase());
        fund.is_quiz_eligible = true;
        fund
    }

    #[test]
    fn budget_ceiling_is_inclusive() {
        let mut fund = eligible("edge");
        fund.minimum_investment = Some(250_000.0);

        assert!(budget_check(&fund, BudgetTier::Under250k).is_some());

        fund.minimum_investment = Some(250_001.0);
        assert!(budget_check(&fund, BudgetTier::Under250k).is_none());
        assert!(budget_check(&fund, BudgetTier::Up500k).is_some());
    }

    #[test]
    fn undisclosed_minimum_fails_capped_tiers_only() {
        let fund = eligible("hidden");
        assert!(budget_check(&fund, BudgetTier::Under250k).is_none());
        assert!(budget_check(&fund, BudgetTier::Up500k).is_none());
        assert!(budget_check(&fund, BudgetTier::Above500k).is_some());
    }

    #[test]
    fn fast_exit_uses_term_then_holding_period() {
        let mut fund = eligible("exit");
        fund.term = Some(6.0);
        assert!(strategy_check(&fund, Strategy::FastExit).is_some());

        fund.term = Some(7.0);
        assert!(strategy_check(&fund, Strategy::FastExit).is_none());

        fund.term = None;
        fund.redemption_terms = Some(RedemptionTerms {
            minimum_holding_period: Some(60),
            ..RedemptionTerms::default()
        });
        assert!(strategy_check(&fund, Strategy::FastExit).is_some());

        fund.redemption_terms = None;
        assert!(strategy_check(&fund, Strategy::FastExit).is_none());
    }

    #[test]
    fn income_requires_a_distribution_bearing_frequency() {
        let mut fund = eligible("income");
        assert!(income_check(&fund).is_none());

        fund.redemption_terms = Some(RedemptionTerms::default());
        assert!(income_check(&fund).is_none());

        fund.redemption_terms = Some(RedemptionTerms {
            frequency: Some(RedemptionFrequency::EndOfTerm),
            ..RedemptionTerms::default()
        });
        assert!(income_check(&fund).is_none());

        fund.redemption_terms = Some(RedemptionTerms {
            frequency: Some(RedemptionFrequency::Quarterly),
            ..RedemptionTerms::default()
        });
        assert!(income_check(&fund)
            .expect("quarterly pays")
            .contains("Quarterly"));
    }

    #[test]
    fn timeline_table_differs_from_fast_exit_ceiling() {
        let mut fund = eligible("six-years");
        fund.term = Some(6.0);

        assert!(strategy_check(&fund, Strategy::FastExit).is_some());
        assert!(timeline_check(&fund, Timeline::ThreeToFiveYears).is_none());
        assert!(timeline_check(&fund, Timeline::FiveToEightYears).is_some());
        assert!(timeline_check(&fund, Timeline::EightPlusYears).is_some());
    }

    #[test]
    fn us_investors_get_pfic_advisory_without_narrowing() {
        let fund = eligible("no-pfic");
        let filter = QuizFilter::new(QuizAnswers {
            nationality: Some(Nationality::Us),
            ..QuizAnswers::default()
        });

        let matches = filter.matches(std::slice::from_ref(&fund));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].advisories.len(), 1);
        assert!(matches[0].reasons.is_empty());
    }

    #[test]
    fn answering_no_leaves_income_and_tax_dimensions_inactive() {
        let fund = eligible("plain");
        let filter = QuizFilter::new(QuizAnswers {
            income: Some(IncomePreference::No),
            tax_account: Some(TaxAccountPreference::No),
            ..QuizAnswers::default()
        });

        assert!(filter.admits(&fund));
    }
}
