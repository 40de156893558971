use super::common::*;
use crate::funds::domain::{Fund, FundCategory, RedemptionFrequency, RedemptionTerms};
use crate::funds::quiz::{
    BudgetTier, IncomePreference, Nationality, QuizAnswers, QuizFilter, Strategy,
    TaxAccountPreference, Timeline,
};

fn ids(funds: &[&Fund]) -> Vec<String> {
    funds.iter().map(|fund| fund.id.to_string()).collect()
}

#[test]
fn safety_under_250k_matches_nothing_in_scenario_catalog() {
    let catalog = scenario_catalog();
    let filter = QuizFilter::new(QuizAnswers {
        budget: Some(BudgetTier::Under250k),
        strategy: Some(Strategy::Safety),
        ..QuizAnswers::default()
    });

    assert!(filter.apply(&catalog).is_empty());
}

#[test]
fn safety_at_top_budget_admits_only_real_estate_fund() {
    let catalog = scenario_catalog();
    let filter = QuizFilter::new(QuizAnswers {
        budget: Some(BudgetTier::Above500k),
        strategy: Some(Strategy::Safety),
        ..QuizAnswers::default()
    });

    assert_eq!(ids(&filter.apply(&catalog)), vec!["a"]);
}

#[test]
fn ineligible_funds_never_match_any_answers() {
    let mut hidden = eligible_fund("hidden", FundCategory::RealEstate, 100_000.0);
    hidden.is_quiz_eligible = false;
    let catalog = vec![hidden];

    let answer_sets = [
        QuizAnswers::default(),
        QuizAnswers {
            budget: Some(BudgetTier::Above500k),
            ..QuizAnswers::default()
        },
        QuizAnswers {
            strategy: Some(Strategy::Safety),
            nationality: Some(Nationality::NonUs),
            ..QuizAnswers::default()
        },
    ];

    for answers in answer_sets {
        assert!(QuizFilter::new(answers).apply(&catalog).is_empty());
    }
}

#[test]
fn empty_answers_return_every_eligible_fund_in_order() {
    let catalog = mixed_catalog();
    let matched = QuizFilter::new(QuizAnswers::default()).apply(&catalog);

    assert_eq!(
        ids(&matched),
        vec!["low-fee", "liquid-debt", "venture", "no-category", "sparse"]
    );
}

#[test]
fn answering_more_dimensions_only_narrows_results() {
    let catalog = mixed_catalog();
    let steps = [
        QuizAnswers::default(),
        QuizAnswers {
            budget: Some(BudgetTier::Up500k),
            ..QuizAnswers::default()
        },
        QuizAnswers {
            budget: Some(BudgetTier::Up500k),
            strategy: Some(Strategy::Safety),
            ..QuizAnswers::default()
        },
        QuizAnswers {
            budget: Some(BudgetTier::Up500k),
            strategy: Some(Strategy::Safety),
            income: Some(IncomePreference::Yes),
            ..QuizAnswers::default()
        },
        QuizAnswers {
            budget: Some(BudgetTier::Up500k),
            strategy: Some(Strategy::Safety),
            income: Some(IncomePreference::Yes),
            tax_account: Some(TaxAccountPreference::Yes),
            timeline: Some(Timeline::ThreeToFiveYears),
            ..QuizAnswers::default()
        },
    ];

    let mut previous: Option<Vec<String>> = None;
    for answers in steps {
        let current = ids(&QuizFilter::new(answers).apply(&catalog));
        if let Some(previous) = &previous {
            assert!(
                current.iter().all(|id| previous.contains(id)),
                "{current:?} is not a subset of {previous:?}"
            );
        }
        previous = Some(current);
    }

    assert_eq!(previous, Some(vec!["liquid-debt".to_string()]));
}

#[test]
fn under_250k_budget_includes_exact_boundary() {
    let catalog = vec![
        eligible_fund("at-limit", FundCategory::Debt, 250_000.0),
        eligible_fund("over-limit", FundCategory::Debt, 250_001.0),
    ];
    let filter = QuizFilter::new(QuizAnswers {
        budget: Some(BudgetTier::Under250k),
        ..QuizAnswers::default()
    });

    assert_eq!(ids(&filter.apply(&catalog)), vec!["at-limit"]);
}

#[test]
fn growth_strategy_accepts_growth_categories_only() {
    let catalog = vec![
        eligible_fund("pe", FundCategory::PrivateEquity, 500_000.0),
        eligible_fund("vc", FundCategory::VentureCapital, 500_000.0),
        eligible_fund("green", FundCategory::CleanEnergy, 500_000.0),
        eligible_fund("coins", FundCategory::Crypto, 500_000.0),
        eligible_fund("re", FundCategory::RealEstate, 500_000.0),
        eligible_fund("hotel", FundCategory::Other("Hospitality".to_string()), 500_000.0),
    ];
    let filter = QuizFilter::new(QuizAnswers {
        strategy: Some(Strategy::Growth),
        ..QuizAnswers::default()
    });

    assert_eq!(ids(&filter.apply(&catalog)), vec!["pe", "vc", "green", "coins"]);
}

#[test]
fn matches_explain_each_answered_dimension() {
    let mut fund = fully_disclosed_fund("explained");
    fund.redemption_terms = Some(RedemptionTerms {
        frequency: Some(RedemptionFrequency::Monthly),
        ..RedemptionTerms::default()
    });
    let filter = QuizFilter::new(QuizAnswers {
        budget: Some(BudgetTier::Up500k),
        strategy: Some(Strategy::Safety),
        income: Some(IncomePreference::Yes),
        ..QuizAnswers::default()
    });

    let matches = filter.matches(std::slice::from_ref(&fund));

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].reasons.len(), 3);
    assert!(matches[0].reasons[0].contains("€500,000"));
    assert!(matches[0].advisories.is_empty());
}
