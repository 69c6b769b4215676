//! Background Check Report

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Completed,
    Error,
}

/// Outcome of one background check, written as the CLI's JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub vendor: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    pub fn completed(vendor: impl Into<String>, report: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            status: CheckStatus::Completed,
            report: Some(report.into()),
            error: None,
        }
    }

    pub fn failed(vendor: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            status: CheckStatus::Error,
            report: None,
            error: Some(error.into()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == CheckStatus::Completed
    }
}
