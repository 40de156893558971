use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::comparison::{
    compare_funds, ComparisonError, ComparisonTable, MAX_COMPARED_FUNDS, MIN_COMPARED_FUNDS,
};
use super::domain::{Fund, FundId};
use super::quiz::{QuizAnswers, QuizFilter, QuizMatch};
use super::repository::{FundRepository, FundSummary, RepositoryError};
use super::scoring::{ScoringEngine, ScoringWeights, Shortlist};

/// Quiz result returned to the investor, with enough context to explain an empty list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub answers: QuizAnswers,
    pub matches: Vec<QuizMatch>,
    /// Funds in the catalog snapshot.
    pub considered: usize,
    /// Funds flagged as quiz-eligible before any answer was applied.
    pub eligible: usize,
}

/// Service composing the fund store, the quiz filter, and the scoring engine.
pub struct FundMatchService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

impl<R> FundMatchService<R>
where
    R: FundRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_weights(repository, ScoringWeights::STANDARD)
    }

    pub fn with_weights(repository: Arc<R>, weights: ScoringWeights) -> Self {
        Self {
            repository,
            engine: Arc::new(ScoringEngine::new(weights)),
        }
    }

    /// Every fund in the catalog, unfiltered.
    pub fn directory(&self) -> Result<Vec<FundSummary>, FundServiceError> {
        let funds = self.repository.all()?;
        Ok(funds.iter().map(FundSummary::from).collect())
    }

    pub fn fund(&self, id: &FundId) -> Result<Fund, FundServiceError> {
        let fund = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(fund)
    }

    /// Apply the quiz to the current catalog snapshot.
    pub fn quiz_matches(&self, answers: QuizAnswers) -> Result<QuizOutcome, FundServiceError> {
        let funds = self.repository.all()?;
        let filter = QuizFilter::new(answers);
        let matches = filter.matches(&funds);
        let eligible = funds.iter().filter(|fund| fund.is_quiz_eligible).count();

        info!(
            answered = ?filter.answers().answered(),
            considered = funds.len(),
            eligible,
            matched = matches.len(),
            "quiz evaluated"
        );

        Ok(QuizOutcome {
            answers: filter.answers().clone(),
            matches,
            considered: funds.len(),
            eligible,
        })
    }

    /// Rank the whole catalog and build the priority clusters.
    pub fn ranking(&self) -> Result<Shortlist, FundServiceError> {
        let funds = self.repository.all()?;
        let shortlist = self.engine.shortlist(&funds);
        log_shortlist(&shortlist, funds.len());
        Ok(shortlist)
    }

    /// Rank only the funds the quiz admits for these answers.
    pub fn shortlist_for(&self, answers: QuizAnswers) -> Result<Shortlist, FundServiceError> {
        let funds = self.repository.all()?;
        let filter = QuizFilter::new(answers);
        let admitted: Vec<Fund> = filter.apply(&funds).into_iter().cloned().collect();
        let shortlist = self.engine.shortlist(&admitted);
        log_shortlist(&shortlist, admitted.len());
        Ok(shortlist)
    }

    pub fn compare(&self, ids: &[FundId]) -> Result<ComparisonTable, FundServiceError> {
        if !(MIN_COMPARED_FUNDS..=MAX_COMPARED_FUNDS).contains(&ids.len()) {
            return Err(ComparisonError::FundCount {
                min: MIN_COMPARED_FUNDS,
                max: MAX_COMPARED_FUNDS,
                found: ids.len(),
            }
            .into());
        }

        let funds = ids
            .iter()
            .map(|id| self.fund(id))
            .collect::<Result<Vec<_>, _>>()?;
        let table = compare_funds(&funds)?;
        debug!(funds = funds.len(), "comparison table built");
        Ok(table)
    }
}

fn log_shortlist(shortlist: &Shortlist, considered: usize) {
    info!(
        considered,
        ranked = shortlist.ranked.len(),
        excluded = shortlist.excluded.len(),
        clusters = shortlist.clusters.len(),
        "funds ranked"
    );
    for excluded in &shortlist.excluded {
        debug!(fund = %excluded.id, reason = %excluded.reason.summary(), "fund left out of ranking");
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum FundServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}
