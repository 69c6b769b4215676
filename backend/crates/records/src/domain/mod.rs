//! Records Domain

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::*;
pub use repository::{LocalRecordsLookup, RecordsLookup};
pub use value_object::{YearsBack, normalize_filter};
