//! Wire envelope types for the strategy store API

use serde::{Deserialize, Serialize};

use crate::common::errors::{ConsoleError, Result};
use crate::strategy::types::StrategyStatus;

/// Standard `{success, data, pagination}` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, treating `success: false` or missing data as an
    /// invalid response
    pub fn into_data(self, context: &str) -> Result<T> {
        if !self.success {
            let message = self.message.unwrap_or_else(|| "no message".to_string());
            return Err(ConsoleError::InvalidResponse(format!(
                "{}: store reported failure ({})",
                context, message
            )));
        }
        self.data.ok_or_else(|| {
            ConsoleError::InvalidResponse(format!("{}: envelope is missing data", context))
        })
    }

    /// Check only the success flag, for endpoints whose data is irrelevant
    pub fn ensure_success(self, context: &str) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            let message = self.message.unwrap_or_else(|| "no message".to_string());
            Err(ConsoleError::InvalidResponse(format!(
                "{}: store reported failure ({})",
                context, message
            )))
        }
    }
}

/// Pagination block of a list envelope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
}

/// Body of a status-change request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: StrategyStatus,
}
