use super::money::Money;
use serde::{Deserialize, Serialize};

/// A scholarship as returned by `GET /scholarships/{id}`.
///
/// Read-only for the lifetime of a checkout page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    #[serde(rename = "_id")]
    pub id: String,
    pub university_name: String,
    #[serde(default)]
    pub university_country: String,
    #[serde(default)]
    pub university_image: String,
    pub scholarship_name: String,
    #[serde(default)]
    pub scholarship_category: String,
    #[serde(default)]
    pub subject_category: String,
    #[serde(default)]
    pub degree: String,
    pub application_fees: Money,
    #[serde(default)]
    pub service_charge: Money,
}

impl Scholarship {
    /// Total charge for applying: application fees plus service charge.
    pub fn total(&self) -> Money {
        self.application_fees + self.service_charge
    }
}

/// What the order summary panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub scholarship: Scholarship,
    pub total: Money,
}

impl From<Scholarship> for OrderSummary {
    fn from(scholarship: Scholarship) -> Self {
        let total = scholarship.total();
        Self { scholarship, total }
    }
}
