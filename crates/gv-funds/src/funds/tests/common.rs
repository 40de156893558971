use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::funds::domain::{
    Fund, FundCategory, FundId, RedemptionFrequency, RedemptionTerms,
};
use crate::funds::rate_limit::{RateLimitPolicy, SubmissionRateLimiter};
use crate::funds::repository::{FundRepository, RepositoryError};
use crate::funds::{fund_router, FundMatchService};

/// Quiz-eligible fund with a category and a disclosed minimum, nothing else.
pub(super) fn eligible_fund(id: &str, category: FundCategory, minimum: f64) -> Fund {
    let mut fund = Fund::new(id, format!("{} Fund", id.to_uppercase()));
    fund.category = Some(category);
    fund.minimum_investment = Some(minimum);
    fund.is_quiz_eligible = true;
    fund
}

/// Fund with every scoring input disclosed.
pub(super) fn fully_disclosed_fund(id: &str) -> Fund {
    let mut fund = eligible_fund(id, FundCategory::RealEstate, 500_000.0);
    fund.manager_name = "Lusitania Capital".to_string();
    fund.management_fee = Some(1.5);
    fund.performance_fee = Some(20.0);
    fund.return_target = Some("6-8%".to_string());
    fund.term = Some(8.0);
    fund.redemption_terms = Some(RedemptionTerms {
        frequency: Some(RedemptionFrequency::Quarterly),
        notice_period: Some(90),
        minimum_holding_period: None,
    });
    fund.pfic_status = Some("QEF available".to_string());
    fund.cmvm_id = Some("1543".to_string());
    fund.regulated_by = Some("CMVM".to_string());
    fund.auditor = Some("KPMG".to_string());
    fund.custodian = Some("Banco BPI".to_string());
    fund.reporting_frequency = Some("Quarterly".to_string());
    fund.last_data_update = NaiveDate::from_ymd_opt(2025, 6, 30);
    fund
}

/// The two-fund catalog used by the documented quiz scenarios.
pub(super) fn scenario_catalog() -> Vec<Fund> {
    vec![
        eligible_fund("a", FundCategory::RealEstate, 500_000.0),
        eligible_fund("b", FundCategory::VentureCapital, 200_000.0),
    ]
}

/// A mixed catalog: rankable funds, a quiz-ineligible one, and incomplete records.
pub(super) fn mixed_catalog() -> Vec<Fund> {
    let mut low_fee = fully_disclosed_fund("low-fee");
    low_fee.management_fee = Some(0.5);
    low_fee.performance_fee = Some(5.0);

    let mut liquid = fully_disclosed_fund("liquid-debt");
    liquid.category = Some(FundCategory::Debt);
    liquid.minimum_investment = Some(250_000.0);
    liquid.term = None;
    liquid.redemption_terms = Some(RedemptionTerms {
        frequency: Some(RedemptionFrequency::Monthly),
        notice_period: Some(30),
        minimum_holding_period: Some(12),
    });

    let mut venture = fully_disclosed_fund("venture");
    venture.category = Some(FundCategory::VentureCapital);
    venture.minimum_investment = Some(750_000.0);
    venture.pfic_status = None;
    venture.auditor = None;
    venture.custodian = None;

    let mut hidden = fully_disclosed_fund("hidden-only");
    hidden.is_quiz_eligible = false;

    let mut no_category = fully_disclosed_fund("no-category");
    no_category.category = None;

    let mut sparse = eligible_fund("sparse", FundCategory::PrivateEquity, 300_000.0);
    sparse.management_fee = Some(2.0);

    vec![low_fee, liquid, venture, hidden, no_category, sparse]
}

#[derive(Default, Clone)]
pub(super) struct MemoryFundRepository {
    pub(super) funds: Arc<Mutex<HashMap<FundId, Fund>>>,
    order: Arc<Mutex<Vec<FundId>>>,
}

impl MemoryFundRepository {
    pub(super) fn with_funds(funds: Vec<Fund>) -> Self {
        let repository = Self::default();
        for fund in funds {
            repository.insert(fund);
        }
        repository
    }

    pub(super) fn insert(&self, fund: Fund) {
        let mut order = self.order.lock().expect("order mutex poisoned");
        if !order.contains(&fund.id) {
            order.push(fund.id.clone());
        }
        self.funds
            .lock()
            .expect("repository mutex poisoned")
            .insert(fund.id.clone(), fund);
    }
}

impl FundRepository for MemoryFundRepository {
    fn all(&self) -> Result<Vec<Fund>, RepositoryError> {
        let order = self.order.lock().expect("order mutex poisoned");
        let funds = self.funds.lock().expect("repository mutex poisoned");
        Ok(order.iter().filter_map(|id| funds.get(id).cloned()).collect())
    }

    fn fetch(&self, id: &FundId) -> Result<Option<Fund>, RepositoryError> {
        let funds = self.funds.lock().expect("repository mutex poisoned");
        Ok(funds.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl FundRepository for UnavailableRepository {
    fn all(&self) -> Result<Vec<Fund>, RepositoryError> {
        Err(RepositoryError::Unavailable("fund store offline".to_string()))
    }

    fn fetch(&self, _id: &FundId) -> Result<Option<Fund>, RepositoryError> {
        Err(RepositoryError::Unavailable("fund store offline".to_string()))
    }
}

pub(super) fn build_service(
    funds: Vec<Fund>,
) -> (FundMatchService<MemoryFundRepository>, Arc<MemoryFundRepository>) {
    let repository = Arc::new(MemoryFundRepository::with_funds(funds));
    let service = FundMatchService::new(repository.clone());
    (service, repository)
}

pub(super) fn limiter(max_requests: u32) -> Arc<SubmissionRateLimiter> {
    Arc::new(SubmissionRateLimiter::new(RateLimitPolicy {
        max_requests,
        ..RateLimitPolicy::default()
    }))
}

pub(super) fn router_with_funds(funds: Vec<Fund>) -> axum::Router {
    let (service, _) = build_service(funds);
    fund_router(Arc::new(service), limiter(100))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
