//! Public Records Client
//!
//! Validates input, then serves each lookup from its own cache or through a
//! single throttle shared by all three lookups, so the records quota is
//! counted once per client.

use std::sync::Arc;

use kernel::validation::BusinessName;
use platform::{CacheKey, RateLimitedCache, Serialization, Throttle, ThrottleSettings};

use crate::application::config::RecordsConfig;
use crate::domain::{
    BusinessRegistration, LegalActionsReport, LicensesReport, RecordsLookup, YearsBack,
    normalize_filter,
};
use crate::error::RecordsResult;
use crate::infra::MockRecordsLookup;

#[derive(Debug)]
pub struct PublicRecordsClient<L = MockRecordsLookup> {
    lookup: L,
    registrations: RateLimitedCache<BusinessRegistration>,
    legal_actions: RateLimitedCache<LegalActionsReport>,
    licenses: RateLimitedCache<LicensesReport>,
}

impl PublicRecordsClient {
    /// Client backed by generated mock data
    pub fn from_config(config: &RecordsConfig) -> RecordsResult<Self> {
        if config.api_key.is_some() {
            tracing::debug!("PUBLIC_RECORDS_API_KEY is set, but only mock records are available");
        }
        let (min, max) = config.mock_latency;
        let lookup = MockRecordsLookup::new().with_latency(min, max);
        Self::new(lookup, &config.throttle)
    }
}

impl<L> PublicRecordsClient<L>
where
    L: RecordsLookup,
{
    pub fn new(lookup: L, settings: &ThrottleSettings) -> RecordsResult<Self> {
        let throttle = Arc::new(Throttle::from_settings(settings, Serialization::Exclusive)?);
        let cache = settings.cache_config();

        Ok(Self {
            lookup,
            registrations: RateLimitedCache::new("business_registration", cache, throttle.clone())?,
            legal_actions: RateLimitedCache::new("legal_actions", cache, throttle.clone())?,
            licenses: RateLimitedCache::new("licenses", cache, throttle)?,
        })
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Calls left in the current window before the next one waits
    pub async fn remaining_quota(&self) -> u32 {
        self.registrations.throttle().gate().remaining().await
    }

    pub async fn business_registration(
        &self,
        business_name: &str,
        state: Option<&str>,
    ) -> RecordsResult<BusinessRegistration> {
        let name = BusinessName::parse(business_name)?;
        let state = normalize_filter(state);

        let key = CacheKey::new("business_registration")
            .arg(name.as_str())
            .opt_arg(state);

        self.registrations
            .get_or_fetch(&key, || self.lookup.business_registration(&name, state))
            .await
    }

    pub async fn legal_actions(
        &self,
        business_name: &str,
        jurisdiction: Option<&str>,
        years_back: u32,
    ) -> RecordsResult<LegalActionsReport> {
        let name = BusinessName::parse(business_name)?;
        let years_back = YearsBack::new(years_back)?;
        let jurisdiction = normalize_filter(jurisdiction);

        let key = CacheKey::new("legal_actions")
            .arg(name.as_str())
            .opt_arg(jurisdiction)
            .arg(years_back.to_string());

        self.legal_actions
            .get_or_fetch(&key, || {
                self.lookup.legal_actions(&name, jurisdiction, years_back)
            })
            .await
    }

    pub async fn licenses_and_permits(
        &self,
        business_name: &str,
        license_types: &[String],
    ) -> RecordsResult<LicensesReport> {
        let name = BusinessName::parse(business_name)?;
        let license_types: Vec<String> = license_types
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let key = CacheKey::new("licenses")
            .arg(name.as_str())
            .list_arg(&license_types);

        self.licenses
            .get_or_fetch(&key, || {
                self.lookup.licenses_and_permits(&name, &license_types)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CaseSummary, LicenseSummary};
    use crate::error::RecordsError;
    use chrono::{NaiveDate, Utc};
    use platform::ThrottleError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Counts calls per lookup; fails while `fail` is set
    #[derive(Debug, Default)]
    struct CountingLookup {
        registrations: AtomicUsize,
        legal: AtomicUsize,
        licenses: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    impl RecordsLookup for CountingLookup {
        async fn business_registration(
            &self,
            name: &BusinessName,
            state: Option<&str>,
        ) -> RecordsResult<BusinessRegistration> {
            self.registrations.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(RecordsError::Unavailable("stub".into()));
            }
            Ok(BusinessRegistration {
                business_name: name.to_string(),
                registration_number: "S1234567".into(),
                registration_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                business_status: crate::domain::BusinessStatus::Active,
                jurisdiction: state.unwrap_or("Federal").into(),
                address: "1 Main St".into(),
                officers: vec![],
            })
        }

        async fn legal_actions(
            &self,
            name: &BusinessName,
            jurisdiction: Option<&str>,
            years_back: YearsBack,
        ) -> RecordsResult<LegalActionsReport> {
            self.legal.fetch_add(1, Ordering::SeqCst);
            Ok(LegalActionsReport {
                business_name: name.to_string(),
                jurisdiction: jurisdiction.unwrap_or("Multiple").into(),
                years_back: years_back.get(),
                legal_actions: vec![],
                summary: CaseSummary::default(),
                source: "stub".into(),
                retrieved_at: Utc::now(),
            })
        }

        async fn licenses_and_permits(
            &self,
            name: &BusinessName,
            _license_types: &[String],
        ) -> RecordsResult<LicensesReport> {
            self.licenses.fetch_add(1, Ordering::SeqCst);
            Ok(LicensesReport {
                business_name: name.to_string(),
                licenses: vec![],
                summary: LicenseSummary::default(),
                source: "stub".into(),
                retrieved_at: Utc::now(),
            })
        }
    }

    fn client(capacity: u32) -> PublicRecordsClient<CountingLookup> {
        let settings = ThrottleSettings {
            capacity,
            window: Duration::from_secs(60),
            max_wait: Some(Duration::from_secs(1)),
            ..Default::default()
        };
        PublicRecordsClient::new(CountingLookup::default(), &settings).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_cached_by_normalized_key() {
        let client = client(10);

        let first = client.business_registration("Acme Corp", Some("CA")).await.unwrap();
        let second = client.business_registration("  acme corp ", Some(" ca")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(client.lookup().registrations.load(Ordering::SeqCst), 1);

        client.business_registration("Acme Corp", None).await.unwrap();
        assert_eq!(client.lookup().registrations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_named_all_is_not_served_the_unfiltered_record() {
        let client = client(10);

        let federal = client.business_registration("Acme", None).await.unwrap();
        let filtered = client.business_registration("Acme", Some("All")).await.unwrap();
        assert_eq!(client.lookup().registrations.load(Ordering::SeqCst), 2);
        assert_eq!(federal.jurisdiction, "Federal");
        assert_eq!(filtered.jurisdiction, "All");

        client.legal_actions("Acme", None, 5).await.unwrap();
        client.legal_actions("Acme", Some(" all "), 5).await.unwrap();
        assert_eq!(client.lookup().legal.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_expires_after_ttl() {
        let client = client(10);
        client.business_registration("Acme", None).await.unwrap();
        tokio::time::advance(Duration::from_secs(3601)).await;
        client.business_registration("Acme", None).await.unwrap();
        assert_eq!(client.lookup().registrations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_input_rejected_before_lookup() {
        let client = client(10);

        assert!(matches!(
            client.legal_actions("Acme", None, 0).await,
            Err(RecordsError::InvalidYearsBack(0))
        ));
        assert!(matches!(
            client.legal_actions("Acme", None, 11).await,
            Err(RecordsError::InvalidYearsBack(11))
        ));
        assert!(matches!(
            client.business_registration("   ", None).await,
            Err(RecordsError::InvalidBusinessName(_))
        ));
        assert_eq!(client.lookup().legal.load(Ordering::SeqCst), 0);
        assert_eq!(client.remaining_quota().await, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_legal_actions_key_includes_years() {
        let client = client(10);
        client.legal_actions("Acme", Some("NY"), 5).await.unwrap();
        client.legal_actions("ACME", Some("ny"), 5).await.unwrap();
        client.legal_actions("Acme", Some("NY"), 3).await.unwrap();
        assert_eq!(client.lookup().legal.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_license_types_order_does_not_matter() {
        let client = client(10);
        let a = vec!["Sales Tax".to_string(), "Business".to_string()];
        let b = vec!["business".to_string(), " sales tax ".to_string(), "".to_string()];

        client.licenses_and_permits("Acme", &a).await.unwrap();
        client.licenses_and_permits("Acme", &b).await.unwrap();
        assert_eq!(client.lookup().licenses.load(Ordering::SeqCst), 1);

        client.licenses_and_permits("Acme", &[]).await.unwrap();
        assert_eq!(client.lookup().licenses.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookups_share_one_quota() {
        let client = client(2);

        client.business_registration("Acme", None).await.unwrap();
        client.legal_actions("Acme", None, 5).await.unwrap();

        let err = client.licenses_and_permits("Acme", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            RecordsError::Throttle(ThrottleError::WaitTimeout { .. })
        ));
        assert_eq!(client.lookup().licenses.load(Ordering::SeqCst), 0);

        // Cached lookups stay available while the quota is exhausted.
        assert!(client.business_registration("Acme", None).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_not_cached() {
        let client = client(10);
        client.lookup().fail.store(true, Ordering::SeqCst);
        assert!(client.business_registration("Acme", None).await.is_err());

        client.lookup().fail.store(false, Ordering::SeqCst);
        assert!(client.business_registration("Acme", None).await.is_ok());
        assert_eq!(client.lookup().registrations.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_client_from_config() {
        let config = RecordsConfig {
            mock_latency: (Duration::ZERO, Duration::ZERO),
            ..Default::default()
        };
        let client = PublicRecordsClient::from_config(&config).unwrap();
        let report = client.licenses_and_permits("Acme Corp", &[]).await.unwrap();
        assert_eq!(report.business_name, "Acme Corp");
        assert_eq!(client.remaining_quota().await, 89);
    }
}
