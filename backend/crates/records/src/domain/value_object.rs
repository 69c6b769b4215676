//! Records Value Objects

use std::fmt;

use serde::Serialize;

use crate::error::{RecordsError, RecordsResult};

/// How many years of legal history to search, `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearsBack(u8);

impl YearsBack {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    pub fn new(years: u32) -> RecordsResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&years) {
            return Err(RecordsError::InvalidYearsBack(years));
        }
        u8::try_from(years)
            .map(Self)
            .map_err(|_| RecordsError::InvalidYearsBack(years))
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl Default for YearsBack {
    fn default() -> Self {
        Self(5)
    }
}

impl fmt::Display for YearsBack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim an optional filter; blank counts as absent
pub fn normalize_filter(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
