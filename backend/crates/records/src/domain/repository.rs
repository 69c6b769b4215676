//! Records Lookup Trait
//!
//! Interface for a records source. Implementations are in the infra layer.

use kernel::validation::BusinessName;

use crate::domain::entity::{BusinessRegistration, LegalActionsReport, LicensesReport};
use crate::domain::value_object::YearsBack;
use crate::error::RecordsResult;

#[trait_variant::make(RecordsLookup: Send)]
pub trait LocalRecordsLookup {
    /// Registration details, optionally narrowed to one state
    async fn business_registration(
        &self,
        name: &BusinessName,
        state: Option<&str>,
    ) -> RecordsResult<BusinessRegistration>;

    /// Court cases involving the business
    async fn legal_actions(
        &self,
        name: &BusinessName,
        jurisdiction: Option<&str>,
        years_back: YearsBack,
    ) -> RecordsResult<LegalActionsReport>;

    /// Licenses held, filtered by type when `license_types` is non-empty
    async fn licenses_and_permits(
        &self,
        name: &BusinessName,
        license_types: &[String],
    ) -> RecordsResult<LicensesReport>;
}
