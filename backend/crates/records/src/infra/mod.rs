//! Records Infrastructure

pub mod mock;

pub use mock::MockRecordsLookup;
