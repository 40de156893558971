mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::domain::{Fund, FundId};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
    DuplicateFund(FundId),
    UnsupportedFormat(String),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read fund catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid fund catalog CSV data: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid fund catalog JSON data: {}", err),
            CatalogImportError::InvalidField { line, field, value } => write!(
                f,
                "line {}: could not interpret {} value '{}'",
                line, field, value
            ),
            CatalogImportError::DuplicateFund(id) => {
                write!(f, "fund {} appears more than once in the catalog", id)
            }
            CatalogImportError::UnsupportedFormat(extension) => write!(
                f,
                "unsupported catalog format '{}' (expected .json or .csv)",
                extension
            ),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads fund records from the JSON catalog or the back-office CSV export.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Fund>, CatalogImportError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_reader(std::fs::File::open(path)?),
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?),
            _ => Err(CatalogImportError::UnsupportedFormat(extension)),
        }
    }

    /// A JSON array of fund records in the catalog's camelCase shape.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Fund>, CatalogImportError> {
        let funds: Vec<Fund> = serde_json::from_reader(reader)?;
        ensure_unique(funds)
    }

    pub fn from_json_str(raw: &str) -> Result<Vec<Fund>, CatalogImportError> {
        Self::from_json_reader(raw.as_bytes())
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Fund>, CatalogImportError> {
        ensure_unique(parser::parse_funds(reader)?)
    }
}

fn ensure_unique(funds: Vec<Fund>) -> Result<Vec<Fund>, CatalogImportError> {
    let mut seen = HashSet::with_capacity(funds.len());
    for fund in &funds {
        if !seen.insert(fund.id.as_str()) {
            return Err(CatalogImportError::DuplicateFund(fund.id.clone()));
        }
    }
    Ok(funds)
}
