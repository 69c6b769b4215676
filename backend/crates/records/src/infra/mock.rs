//! Mock records source
//!
//! Generates plausible random records after a simulated network delay.
//! Stands in for a real public records API.

use std::time::Duration;

use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use kernel::validation::BusinessName;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::domain::{
    BusinessRegistration, BusinessStatus, CaseStatus, CaseSummary, LegalAction,
    LegalActionsReport, License, LicenseStatus, LicenseSummary, LicensesReport, Officer,
    RecordsLookup, YearsBack,
};
use crate::error::RecordsResult;

/// Reported as the `source` of generated reports
pub const MOCK_SOURCE: &str = "mock_public_records";

const STREETS: &[&str] = &["Main", "Oak", "Pine", "Maple", "Cedar", "Elm"];
const CITIES: &[&str] = &["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"];
const STATES: &[&str] = &["NY", "CA", "IL", "TX", "AZ"];
const FIRST_NAMES: &[&str] = &["John", "Jane", "Michael", "Emily", "David", "Sarah"];
const LAST_NAMES: &[&str] = &["Smith", "Johnson", "Williams", "Brown", "Jones"];
const OFFICER_TITLES: &[&str] = &["CEO", "President", "Director", "Secretary", "Treasurer"];

struct LicenseTemplate {
    license_type: &'static str,
    prefix: &'static str,
    number_range: (u32, u32),
    issuing_authority: &'static str,
    category: &'static str,
    validity_months: u32,
}

const LICENSE_TEMPLATES: [LicenseTemplate; 3] = [
    LicenseTemplate {
        license_type: "Business License",
        prefix: "BL",
        number_range: (10_000, 99_999),
        issuing_authority: "City of San Francisco",
        category: "General Business",
        validity_months: 36,
    },
    LicenseTemplate {
        license_type: "Sales Tax Permit",
        prefix: "ST",
        number_range: (100_000, 999_999),
        issuing_authority: "California Department of Tax and Fee Administration",
        category: "Tax",
        validity_months: 48,
    },
    LicenseTemplate {
        license_type: "Health Department Permit",
        prefix: "HD",
        number_range: (1_000, 9_999),
        issuing_authority: "County Health Department",
        category: "Health & Safety",
        validity_months: 12,
    },
];

#[derive(Debug, Clone)]
pub struct MockRecordsLookup {
    min_latency: Duration,
    max_latency: Duration,
}

impl Default for MockRecordsLookup {
    fn default() -> Self {
        Self {
            min_latency: Duration::from_millis(500),
            max_latency: Duration::from_millis(1500),
        }
    }
}

impl MockRecordsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each call sleeps for a random duration in `min..=max`
    pub fn with_latency(mut self, min: Duration, max: Duration) -> Self {
        self.min_latency = min;
        self.max_latency = max.max(min);
        self
    }

    /// No simulated delay
    pub fn instant() -> Self {
        Self::default().with_latency(Duration::ZERO, Duration::ZERO)
    }

    async fn simulate_latency(&self) {
        let delay = if self.max_latency > self.min_latency {
            rand::rng().random_range(self.min_latency..=self.max_latency)
        } else {
            self.min_latency
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl RecordsLookup for MockRecordsLookup {
    async fn business_registration(
        &self,
        name: &BusinessName,
        state: Option<&str>,
    ) -> RecordsResult<BusinessRegistration> {
        self.simulate_latency().await;
        Ok(generate_registration(name, state))
    }

    async fn legal_actions(
        &self,
        name: &BusinessName,
        jurisdiction: Option<&str>,
        years_back: YearsBack,
    ) -> RecordsResult<LegalActionsReport> {
        self.simulate_latency().await;
        Ok(generate_legal_actions(name, jurisdiction, years_back))
    }

    async fn licenses_and_permits(
        &self,
        name: &BusinessName,
        license_types: &[String],
    ) -> RecordsResult<LicensesReport> {
        self.simulate_latency().await;
        Ok(generate_licenses(name, license_types))
    }
}

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn days_ago(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

fn generate_registration(name: &BusinessName, state: Option<&str>) -> BusinessRegistration {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();

    let address = format!(
        "{} {} {} St, {} {} {}",
        rng.random_range(100..=9999),
        pick(&mut rng, STREETS),
        pick(&mut rng, STREETS),
        pick(&mut rng, CITIES),
        pick(&mut rng, STATES),
        rng.random_range(10_000..=99_999),
    );

    let officers = (0..rng.random_range(1..=3))
        .map(|_| Officer {
            name: format!(
                "{} {} {}",
                pick(&mut rng, FIRST_NAMES),
                pick(&mut rng, FIRST_NAMES),
                pick(&mut rng, LAST_NAMES)
            ),
            title: pick(&mut rng, OFFICER_TITLES).to_string(),
        })
        .collect();

    BusinessRegistration {
        business_name: name.to_string(),
        registration_number: format!(
            "{}{}",
            if state.is_some() { 'S' } else { 'F' },
            rng.random_range(1_000_000..=9_999_999)
        ),
        registration_date: days_ago(today, rng.random_range(365..=3650)),
        business_status: BusinessStatus::ALL
            .choose(&mut rng)
            .copied()
            .unwrap_or(BusinessStatus::Active),
        jurisdiction: state.unwrap_or("Federal").to_string(),
        address,
        officers,
    }
}

fn generate_legal_actions(
    name: &BusinessName,
    jurisdiction: Option<&str>,
    years_back: YearsBack,
) -> LegalActionsReport {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();
    let max_days = 365 * u64::from(years_back.get());
    let filing_date = days_ago(today, rng.random_range(30..=max_days));

    let actions = vec![LegalAction {
        case_number: format!(
            "CV-{}-{}",
            filing_date.year(),
            rng.random_range(1000..=9999)
        ),
        filing_date,
        case_type: "Contract Dispute".to_string(),
        status: CaseStatus::Closed,
        outcome: Some("Settled".to_string()),
        plaintiff: "ABC Supplier Co.".to_string(),
        defendant: name.to_string(),
        jurisdiction: jurisdiction.unwrap_or("State Court").to_string(),
        amount_in_dispute: format_usd(rng.random_range(10_000..=1_000_000)),
        duration_days: 120,
    }];

    LegalActionsReport {
        business_name: name.to_string(),
        jurisdiction: jurisdiction.unwrap_or("Multiple").to_string(),
        years_back: years_back.get(),
        summary: CaseSummary::from_actions(&actions),
        legal_actions: actions,
        source: MOCK_SOURCE.to_string(),
        retrieved_at: Utc::now(),
    }
}

fn generate_licenses(name: &BusinessName, license_types: &[String]) -> LicensesReport {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();

    let licenses: Vec<License> = LICENSE_TEMPLATES
        .iter()
        .map(|template| {
            let issue_date = days_ago(today, rng.random_range(180..=1460));
            let expiration_date = issue_date
                .checked_add_months(Months::new(template.validity_months))
                .unwrap_or(issue_date);
            let (low, high) = template.number_range;
            License {
                license_type: template.license_type.to_string(),
                license_number: format!("{}-{}", template.prefix, rng.random_range(low..=high)),
                issue_date,
                expiration_date,
                status: if expiration_date > today {
                    LicenseStatus::Active
                } else {
                    LicenseStatus::Expired
                },
                issuing_authority: template.issuing_authority.to_string(),
                category: template.category.to_string(),
            }
        })
        .filter(|license| license.matches_any(license_types))
        .collect();

    LicensesReport {
        business_name: name.to_string(),
        summary: LicenseSummary::from_licenses(&licenses),
        licenses,
        source: MOCK_SOURCE.to_string(),
        retrieved_at: Utc::now(),
    }
}

/// `1234567` -> `$1,234,567`
fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}
