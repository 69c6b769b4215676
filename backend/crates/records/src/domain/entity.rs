//! Records Entities
//!
//! Shapes returned by a records source. All of them serialize to the JSON
//! embedded in reports.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Business registration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessStatus {
    Active,
    Inactive,
    #[serde(rename = "Good Standing")]
    GoodStanding,
    Delinquent,
}

impl BusinessStatus {
    pub const ALL: [BusinessStatus; 4] = [
        BusinessStatus::Active,
        BusinessStatus::Inactive,
        BusinessStatus::GoodStanding,
        BusinessStatus::Delinquent,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRegistration {
    pub business_name: String,
    pub registration_number: String,
    pub registration_date: NaiveDate,
    pub business_status: BusinessStatus,
    /// State of registration, or `Federal`
    pub jurisdiction: String,
    pub address: String,
    pub officers: Vec<Officer>,
}

// ============================================================================
// Legal actions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAction {
    pub case_number: String,
    pub filing_date: NaiveDate,
    pub case_type: String,
    pub status: CaseStatus,
    pub outcome: Option<String>,
    pub plaintiff: String,
    pub defendant: String,
    pub jurisdiction: String,
    pub amount_in_dispute: String,
    pub duration_days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub total_cases: usize,
    pub open_cases: usize,
    pub closed_cases: usize,
    pub avg_case_duration_days: u32,
}

impl CaseSummary {
    pub fn from_actions(actions: &[LegalAction]) -> Self {
        let open_cases = actions
            .iter()
            .filter(|a| a.status == CaseStatus::Open)
            .count();
        let total_days: u64 = actions.iter().map(|a| u64::from(a.duration_days)).sum();
        let avg_case_duration_days = match actions.len() {
            0 => 0,
            n => u32::try_from(total_days / n as u64).unwrap_or(u32::MAX),
        };

        Self {
            total_cases: actions.len(),
            open_cases,
            closed_cases: actions.len() - open_cases,
            avg_case_duration_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActionsReport {
    pub business_name: String,
    pub jurisdiction: String,
    pub years_back: u8,
    pub legal_actions: Vec<LegalAction>,
    pub summary: CaseSummary,
    pub source: String,
    pub retrieved_at: DateTime<Utc>,
}

// ============================================================================
// Licenses and permits
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseStatus {
    Active,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub license_type: String,
    pub license_number: String,
    pub issue_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub status: LicenseStatus,
    pub issuing_authority: String,
    pub category: String,
}

impl License {
    /// Case-insensitive substring match against any requested type
    ///
    /// An empty filter matches everything.
    pub fn matches_any(&self, requested: &[String]) -> bool {
        if requested.is_empty() {
            return true;
        }
        let license_type = self.license_type.to_lowercase();
        requested
            .iter()
            .any(|wanted| license_type.contains(&wanted.to_lowercase()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSummary {
    pub total_licenses: usize,
    pub active_licenses: usize,
    pub expired_licenses: usize,
    /// Distinct categories, sorted
    pub categories: Vec<String>,
}

impl LicenseSummary {
    pub fn from_licenses(licenses: &[License]) -> Self {
        let count = |status| licenses.iter().filter(|l| l.status == status).count();
        let categories: BTreeSet<&str> = licenses.iter().map(|l| l.category.as_str()).collect();

        Self {
            total_licenses: licenses.len(),
            active_licenses: count(LicenseStatus::Active),
            expired_licenses: count(LicenseStatus::Expired),
            categories: categories.into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensesReport {
    pub business_name: String,
    pub licenses: Vec<License>,
    pub summary: LicenseSummary,
    pub source: String,
    pub retrieved_at: DateTime<Utc>,
}
