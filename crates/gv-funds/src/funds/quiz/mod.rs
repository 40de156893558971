//! Investor quiz: answer types and the filter that narrows the catalog to matching funds.

mod answers;
mod filter;

pub use answers::{
    BudgetTier, IncomePreference, Nationality, QuizAnswers, Strategy, TaxAccountPreference,
    Timeline, UnknownAnswer,
};
pub use filter::{QuizFilter, QuizMatch, FAST_EXIT_MAX_YEARS};
