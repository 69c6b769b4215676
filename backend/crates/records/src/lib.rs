//! Public Records Module
//!
//! Layering:
//! - `domain/` - Record entities, value objects, the `RecordsLookup` trait
//! - `application/` - `PublicRecordsClient` with validation, caching and quota
//! - `infra/` - Mock records source
//!
//! All three lookups of one client share a single throttle, so the quota of
//! the underlying source is counted once.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::client::PublicRecordsClient;
pub use application::config::RecordsConfig;
pub use domain::{
    BusinessRegistration, LegalActionsReport, LicensesReport, RecordsLookup, YearsBack,
};
pub use error::{RecordsError, RecordsResult};
pub use infra::MockRecordsLookup;
