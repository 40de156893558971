//! Golden Visa fund matching: the investor quiz filter, the weighted fund ranker, and the
//! catalog, service, and HTTP plumbing around them.
//!
//! The quiz and the scorer are pure functions of a catalog snapshot. Everything that
//! touches I/O (catalog import, the repository, the router) sits at the edges.

pub mod catalog;
pub mod comparison;
pub mod domain;
pub mod normalize;
pub mod quiz;
pub mod rate_limit;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogImportError, CatalogImporter};
pub use comparison::{
    compare_funds, BetterWhen, ComparisonCell, ComparisonError, ComparisonRow, ComparisonTable,
};
pub use domain::{Fund, FundCategory, FundId, FundStatus, RedemptionFrequency, RedemptionTerms};
pub use normalize::{
    format_euros, format_percentage, parse_currency_amount, parse_percentage,
    parse_percentage_range, ReturnRange,
};
pub use quiz::{
    BudgetTier, IncomePreference, Nationality, QuizAnswers, QuizFilter, QuizMatch, Strategy,
    TaxAccountPreference, Timeline, UnknownAnswer,
};
pub use rate_limit::{RateLimitDecision, RateLimitPolicy, SubmissionRateLimiter};
pub use repository::{FundRepository, FundSummary, RepositoryError};
pub use router::{fund_router, CompareRequest, FundRouterState};
pub use scoring::{
    ExcludedFund, ExclusionReason, FundCluster, PriorityLens, ScoreComponent, ScoredFund,
    ScoringEngine, ScoringFactor, ScoringWeights, Shortlist,
};
pub use service::{FundMatchService, FundServiceError, QuizOutcome};
