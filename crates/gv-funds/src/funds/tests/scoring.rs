use super::common::*;
use crate::funds::domain::FundCategory;
use crate::funds::scoring::{
    ExclusionReason, PriorityLens, ScoringEngine, ScoringFactor, ScoringWeights,
};

fn ranked_ids(engine: &ScoringEngine, funds: &[crate::funds::Fund]) -> Vec<String> {
    engine
        .rank(funds)
        .iter()
        .map(|scored| scored.fund.id.to_string())
        .collect()
}

#[test]
fn empty_catalog_yields_empty_shortlist() {
    let shortlist = ScoringEngine::default().shortlist(&[]);

    assert!(shortlist.ranked.is_empty());
    assert!(shortlist.clusters.is_empty());
    assert!(shortlist.excluded.is_empty());
}

#[test]
fn scoring_is_deterministic() {
    let engine = ScoringEngine::new(ScoringWeights::STANDARD);
    let catalog = mixed_catalog();

    let first = engine.shortlist(&catalog);
    let second = engine.shortlist(&catalog);

    assert_eq!(first, second);
}

#[test]
fn ranks_by_score_and_holds_back_incomplete_funds() {
    let engine = ScoringEngine::default();
    let shortlist = engine.shortlist(&mixed_catalog());

    let ranked: Vec<&str> = shortlist
        .ranked
        .iter()
        .map(|scored| scored.fund.id.as_str())
        .collect();
    assert_eq!(ranked, vec!["liquid-debt", "low-fee", "hidden-only", "venture"]);
    assert!(shortlist
        .ranked
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));

    let excluded: Vec<(&str, &ExclusionReason)> = shortlist
        .excluded
        .iter()
        .map(|fund| (fund.id.as_str(), &fund.reason))
        .collect();
    assert_eq!(
        excluded,
        vec![
            ("no-category", &ExclusionReason::MissingCategory),
            (
                "sparse",
                &ExclusionReason::InsufficientData {
                    missing: vec![ScoringFactor::Liquidity, ScoringFactor::Governance],
                }
            ),
        ]
    );
}

#[test]
fn incomplete_funds_are_never_scored() {
    let engine = ScoringEngine::default();

    let mut no_minimum = fully_disclosed_fund("no-minimum");
    no_minimum.minimum_investment = None;
    assert_eq!(
        engine.score(&no_minimum),
        Err(ExclusionReason::UndisclosedMinimum)
    );

    let mut zero_minimum = fully_disclosed_fund("zero-minimum");
    zero_minimum.minimum_investment = Some(0.0);
    assert_eq!(
        engine.score(&zero_minimum),
        Err(ExclusionReason::UndisclosedMinimum)
    );

    let mut no_category = fully_disclosed_fund("no-category");
    no_category.category = None;
    assert_eq!(
        engine.score(&no_category),
        Err(ExclusionReason::MissingCategory)
    );
}

#[test]
fn single_missing_factor_contributes_zero() {
    let engine = ScoringEngine::default();
    let complete = fully_disclosed_fund("complete");
    let mut no_governance = fully_disclosed_fund("no-governance");
    no_governance.cmvm_id = None;
    no_governance.regulated_by = None;
    no_governance.auditor = None;
    no_governance.custodian = None;
    no_governance.reporting_frequency = None;

    let complete = engine.score(&complete).expect("complete fund scores");
    let partial = engine.score(&no_governance).expect("one gap is tolerated");

    assert!(partial.component(ScoringFactor::Governance).is_none());
    assert!((complete.score - partial.score - 20.0).abs() < 0.011);
    assert!(partial.justification.contains("governance not scored"));
}

#[test]
fn equal_scores_prefer_verified_then_lower_id() {
    let engine = ScoringEngine::default();
    let mut zeta = fully_disclosed_fund("zeta");
    zeta.is_verified = true;
    let alpha = fully_disclosed_fund("alpha");
    let beta = fully_disclosed_fund("beta");

    let ranked = ranked_ids(&engine, &[beta, zeta, alpha]);

    assert_eq!(ranked, vec!["zeta", "alpha", "beta"]);
}

#[test]
fn components_carry_weighted_contributions() {
    let engine = ScoringEngine::default();
    let scored = engine
        .score(&fully_disclosed_fund("weighted"))
        .expect("fund scores");

    assert_eq!(scored.components.len(), 4);
    let governance = scored
        .component(ScoringFactor::Governance)
        .expect("governance scored");
    assert_eq!(governance.score, 100.0);
    assert_eq!(governance.weighted, 20.0);

    let minimum = scored
        .component(ScoringFactor::MinimumInvestment)
        .expect("minimum scored");
    assert_eq!(minimum.weighted, 10.0);

    let sum: f64 = scored.components.iter().map(|c| c.weighted).sum();
    assert!((scored.score - sum).abs() < 0.011);
    assert!(scored.justification.starts_with("Scored"));
}

#[test]
fn clusters_pick_top_three_per_lens() {
    let engine = ScoringEngine::default();
    let shortlist = engine.shortlist(&mixed_catalog());

    let lenses: Vec<PriorityLens> = shortlist
        .clusters
        .iter()
        .map(|cluster| cluster.priority)
        .collect();
    assert_eq!(lenses, PriorityLens::ALL.to_vec());

    let members = |lens: PriorityLens| -> Vec<String> {
        shortlist
            .clusters
            .iter()
            .find(|cluster| cluster.priority == lens)
            .map(|cluster| {
                cluster
                    .members
                    .iter()
                    .map(|scored| scored.fund.id.to_string())
                    .collect()
            })
            .unwrap_or_default()
    };

    assert_eq!(
        members(PriorityLens::LowestFees),
        vec!["low-fee", "liquid-debt", "hidden-only"]
    );
    assert_eq!(
        members(PriorityLens::FastestExit),
        vec!["liquid-debt", "low-fee", "hidden-only"]
    );
    assert_eq!(
        members(PriorityLens::StrongestGovernance),
        vec!["liquid-debt", "low-fee", "hidden-only"]
    );
    assert_eq!(
        members(PriorityLens::LowestMinimum),
        vec!["liquid-debt", "low-fee", "hidden-only"]
    );
}

#[test]
fn clusters_skip_funds_missing_the_lens_factor() {
    let engine = ScoringEngine::default();
    let mut opaque = fully_disclosed_fund("opaque");
    opaque.management_fee = None;
    opaque.performance_fee = None;
    let mut cheap = eligible_fund("cheap", FundCategory::Debt, 350_000.0);
    cheap.management_fee = Some(1.0);
    cheap.auditor = Some("PwC".to_string());

    let shortlist = engine.shortlist(&[opaque, cheap]);
    let fees = shortlist
        .clusters
        .iter()
        .find(|cluster| cluster.priority == PriorityLens::LowestFees)
        .expect("fee cluster present");

    assert_eq!(fees.members.len(), 1);
    assert_eq!(fees.members[0].fund.id.as_str(), "cheap");
}
