use serde::Serialize;

use super::domain::{Fund, FundCategory, FundId};
use super::normalize::{format_euros, format_percentage};

/// Read-only fund store so the service can be exercised without a live catalog.
pub trait FundRepository: Send + Sync {
    fn all(&self) -> Result<Vec<Fund>, RepositoryError>;
    fn fetch(&self, id: &FundId) -> Result<Option<Fund>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("fund not found")]
    NotFound,
    #[error("fund store unavailable: {0}")]
    Unavailable(String),
}

/// Directory listing entry with display-ready figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSummary {
    pub id: FundId,
    pub name: String,
    pub manager_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FundCategory>,
    pub minimum_investment: String,
    pub management_fee: String,
    pub status: &'static str,
    pub is_verified: bool,
    pub is_quiz_eligible: bool,
}

impl From<&Fund> for FundSummary {
    fn from(fund: &Fund) -> Self {
        Self {
            id: fund.id.clone(),
            name: fund.name.clone(),
            manager_name: fund.manager_name.clone(),
            category: fund.category.clone(),
            minimum_investment: fund
                .disclosed_minimum()
                .map(format_euros)
                .unwrap_or_else(|| "Undisclosed".to_string()),
            management_fee: fund
                .management_fee
                .map(format_percentage)
                .unwrap_or_else(|| "Undisclosed".to_string()),
            status: fund.fund_status.label(),
            is_verified: fund.is_verified,
            is_quiz_eligible: fund.is_quiz_eligible,
        }
    }
}
