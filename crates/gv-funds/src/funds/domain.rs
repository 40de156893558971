use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::normalize::normalize_label;

/// Stable identifier of a catalog fund.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundId(pub String);

impl FundId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Asset class a fund invests in. Unrecognised labels are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FundCategory {
    RealEstate,
    PrivateEquity,
    VentureCapital,
    Debt,
    Infrastructure,
    Crypto,
    CleanEnergy,
    Other(String),
}

impl FundCategory {
    pub fn parse(raw: &str) -> Self {
        match normalize_label(raw).as_str() {
            "real estate" | "realestate" | "real-estate" => Self::RealEstate,
            "private equity" | "privateequity" | "private-equity" => Self::PrivateEquity,
            "venture capital" | "venturecapital" | "venture-capital" | "vc" => {
                Self::VentureCapital
            }
            "debt" | "private debt" | "private credit" => Self::Debt,
            "infrastructure" => Self::Infrastructure,
            "crypto" | "cryptocurrency" | "digital assets" => Self::Crypto,
            "clean energy" | "cleanenergy" | "clean-energy" | "renewable energy" => {
                Self::CleanEnergy
            }
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FundCategory::RealEstate => "Real Estate",
            FundCategory::PrivateEquity => "Private Equity",
            FundCategory::VentureCapital => "Venture Capital",
            FundCategory::Debt => "Debt",
            FundCategory::Infrastructure => "Infrastructure",
            FundCategory::Crypto => "Crypto",
            FundCategory::CleanEnergy => "Clean Energy",
            FundCategory::Other(label) => label,
        }
    }
}

impl From<String> for FundCategory {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FundCategory> for String {
    fn from(value: FundCategory) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for FundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How often investors may redeem units (and therefore receive distributions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RedemptionFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
    #[serde(rename = "End of Term")]
    EndOfTerm,
}

impl RedemptionFrequency {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_label(raw).as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "annual" | "annually" | "yearly" => Some(Self::Annual),
            "end of term" | "end-of-term" | "at maturity" => Some(Self::EndOfTerm),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RedemptionFrequency::Daily => "Daily",
            RedemptionFrequency::Weekly => "Weekly",
            RedemptionFrequency::Monthly => "Monthly",
            RedemptionFrequency::Quarterly => "Quarterly",
            RedemptionFrequency::Annual => "Annual",
            RedemptionFrequency::EndOfTerm => "End of Term",
        }
    }

    /// Every frequency except `EndOfTerm` returns capital or income during the fund's life.
    pub const fn pays_distributions(self) -> bool {
        !matches!(self, RedemptionFrequency::EndOfTerm)
    }
}

/// Redemption conditions as disclosed by the manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionTerms {
    #[serde(default)]
    pub frequency: Option<RedemptionFrequency>,
    /// Days of notice required before a redemption.
    #[serde(default)]
    pub notice_period: Option<u32>,
    /// Months an investor must hold before the first redemption.
    #[serde(default)]
    pub minimum_holding_period: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundStatus {
    #[default]
    Open,
    Closed,
    #[serde(rename = "Fully Subscribed")]
    FullySubscribed,
}

impl FundStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_label(raw).as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "fully subscribed" | "fully-subscribed" => Some(Self::FullySubscribed),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FundStatus::Open => "Open",
            FundStatus::Closed => "Closed",
            FundStatus::FullySubscribed => "Fully Subscribed",
        }
    }
}

/// Catalog record for a Golden Visa fund, as supplied by the fund store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: FundId,
    pub name: String,
    #[serde(default)]
    pub manager_name: String,
    #[serde(default)]
    pub category: Option<FundCategory>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Minimum subscription in euros. `None` or zero means undisclosed.
    #[serde(default)]
    pub minimum_investment: Option<f64>,
    /// Annual management fee in percent.
    #[serde(default)]
    pub management_fee: Option<f64>,
    /// Performance fee (carry) in percent.
    #[serde(default)]
    pub performance_fee: Option<f64>,
    #[serde(default)]
    pub expected_return_min: Option<f64>,
    #[serde(default)]
    pub expected_return_max: Option<f64>,
    /// Free-form target such as "8-10%" used when the numeric range is missing.
    #[serde(default)]
    pub return_target: Option<String>,
    /// Fund life in years.
    #[serde(default)]
    pub term: Option<f64>,
    #[serde(default)]
    pub redemption_terms: Option<RedemptionTerms>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_quiz_eligible: bool,
    #[serde(default)]
    pub pfic_status: Option<String>,
    #[serde(default)]
    pub cmvm_id: Option<String>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub regulated_by: Option<String>,
    #[serde(default)]
    pub auditor: Option<String>,
    #[serde(default)]
    pub custodian: Option<String>,
    #[serde(default)]
    pub reporting_frequency: Option<String>,
    #[serde(default)]
    pub fund_status: FundStatus,
    #[serde(default)]
    pub last_data_update: Option<NaiveDate>,
}

impl Fund {
    /// Bare record with every optional attribute undisclosed.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: FundId::new(id),
            name: name.into(),
            manager_name: String::new(),
            category: None,
            tags: BTreeSet::new(),
            minimum_investment: None,
            management_fee: None,
            performance_fee: None,
            expected_return_min: None,
            expected_return_max: None,
            return_target: None,
            term: None,
            redemption_terms: None,
            is_verified: false,
            is_quiz_eligible: false,
            pfic_status: None,
            cmvm_id: None,
            isin: None,
            regulated_by: None,
            auditor: None,
            custodian: None,
            reporting_frequency: None,
            fund_status: FundStatus::Open,
            last_data_update: None,
        }
    }
}
