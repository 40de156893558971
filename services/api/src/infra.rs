use gv_funds::config::CatalogConfig;
use gv_funds::error::AppError;
use gv_funds::funds::{
    CatalogImportError, CatalogImporter, Fund, FundId, FundRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

const SAMPLE_CATALOG: &str = include_str!("../data/sample_funds.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog snapshot held in memory, in catalog order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryFundRepository {
    funds: Arc<Mutex<Vec<Fund>>>,
}

impl InMemoryFundRepository {
    pub(crate) fn new(funds: Vec<Fund>) -> Self {
        Self {
            funds: Arc::new(Mutex::new(funds)),
        }
    }
}

impl FundRepository for InMemoryFundRepository {
    fn all(&self) -> Result<Vec<Fund>, RepositoryError> {
        let guard = self
            .funds
            .lock()
            .map_err(|_| RepositoryError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn fetch(&self, id: &FundId) -> Result<Option<Fund>, RepositoryError> {
        let guard = self
            .funds
            .lock()
            .map_err(|_| RepositoryError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(guard.iter().find(|fund| &fund.id == id).cloned())
    }
}

pub(crate) fn sample_catalog() -> Result<Vec<Fund>, CatalogImportError> {
    CatalogImporter::from_json_str(SAMPLE_CATALOG)
}

/// Load from an explicit path, the configured path, or the bundled sample, in that order.
pub(crate) fn load_catalog(
    explicit: Option<&Path>,
    config: &CatalogConfig,
) -> Result<Vec<Fund>, AppError> {
    let funds = match explicit.or(config.path.as_deref()) {
        Some(path) => {
            let funds = CatalogImporter::from_path(path)?;
            info!(path = %path.display(), funds = funds.len(), "fund catalog loaded");
            funds
        }
        None => {
            let funds = sample_catalog()?;
            info!(funds = funds.len(), "bundled sample catalog loaded");
            funds
        }
    };
    Ok(funds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_sample_catalog_parses() {
        let funds = sample_catalog().expect("sample catalog is valid");
        assert_eq!(funds.len(), 9);
        assert!(funds.iter().any(|fund| !fund.is_complete()));
        assert!(funds.iter().any(|fund| !fund.is_quiz_eligible));
    }

    #[test]
    fn repository_fetches_by_id() {
        let repository = InMemoryFundRepository::new(sample_catalog().expect("sample"));
        let id = FundId::new("douro-private-credit");

        let fund = repository.fetch(&id).expect("fetch").expect("present");
        assert_eq!(fund.name, "Douro Private Credit Fund");
        assert_eq!(repository.all().expect("all").len(), 9);
        assert!(repository
            .fetch(&FundId::new("unknown-fund"))
            .expect("fetch")
            .is_none());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let config = CatalogConfig::default();
        let err = load_catalog(Some(Path::new("does-not-exist.json")), &config)
            .expect_err("missing file");
        assert!(matches!(err, AppError::Catalog(CatalogImportError::Io(_))));
    }
}
