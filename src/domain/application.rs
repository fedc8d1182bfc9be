use super::applicant::Applicant;
use super::money::Money;
use super::scholarship::Scholarship;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw input from the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub phone: String,
    pub address: String,
    pub ssc_result: String,
    pub hsc_result: String,
    pub study_gap: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Phone,
    Address,
    SscResult,
    HscResult,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Phone => "Phone number",
            Self::Address => "Address",
            Self::SscResult => "SSC result",
            Self::HscResult => "HSC result",
        };
        f.write_str(label)
    }
}

/// Inline error text keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

impl ApplicationForm {
    /// Checks the required fields. Study gap is optional.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let required = [
            (FormField::Phone, &self.phone),
            (FormField::Address, &self.address),
            (FormField::SscResult, &self.ssc_result),
            (FormField::HscResult, &self.hsc_result),
        ];

        let errors: BTreeMap<_, _> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| (field, format!("{field} is required")))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(errors))
        }
    }

    fn study_gap(&self) -> Option<String> {
        self.study_gap
            .as_deref()
            .map(str::trim)
            .filter(|gap| !gap.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

/// The document posted to `/applications` once a charge attempt has resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub scholarship_id: String,
    pub university_name: String,
    pub university_country: String,
    pub university_image: String,
    pub scholarship_name: String,
    pub scholarship_category: String,
    pub subject_category: String,
    pub degree: String,
    pub application_fees: Money,
    pub service_charge: Money,
    pub user_name: String,
    pub user_email: String,
    pub user_id: String,
    pub phone: String,
    pub address: String,
    pub ssc_result: String,
    pub hsc_result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_gap: Option<String>,
    pub application_status: ApplicationStatus,
    pub payment_status: PaymentStatus,
    pub applied_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn new(
        scholarship: &Scholarship,
        applicant: &Applicant,
        form: &ApplicationForm,
        payment_status: PaymentStatus,
        applied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            scholarship_id: scholarship.id.clone(),
            university_name: scholarship.university_name.clone(),
            university_country: scholarship.university_country.clone(),
            university_image: scholarship.university_image.clone(),
            scholarship_name: scholarship.scholarship_name.clone(),
            scholarship_category: scholarship.scholarship_category.clone(),
            subject_category: scholarship.subject_category.clone(),
            degree: scholarship.degree.clone(),
            application_fees: scholarship.application_fees,
            service_charge: scholarship.service_charge,
            user_name: applicant.name.clone(),
            user_email: applicant.email.clone(),
            user_id: applicant.id.clone(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
            ssc_result: form.ssc_result.trim().to_string(),
            hsc_result: form.hsc_result.trim().to_string(),
            study_gap: form.study_gap(),
            application_status: ApplicationStatus::Pending,
            payment_status,
            applied_at,
        }
    }
}

/// The document posted to `/payments` after a successful charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub email: String,
    pub transaction_id: String,
    pub amount: Money,
    pub scholarship_id: String,
    pub scholarship_name: String,
    pub date: DateTime<Utc>,
}
