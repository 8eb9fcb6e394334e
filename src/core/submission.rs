use crate::core::fallback::{self, RetryDecision};
use crate::domain::model::{Lead, RecordSet};
use crate::domain::ports::{LeadStore, StoreError};
use thiserror::Error;

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
const ROW_LEVEL_SECURITY_MARKER: &str = "row-level security";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{message}")]
    Rejected {
        code: Option<String>,
        message: String,
    },

    #[error(
        "Permission error: the database refused the write (row-level security policy). Check the table policies."
    )]
    PermissionDenied { message: String },

    #[error("{0}")]
    Network(String),
}

impl SubmissionError {
    /// Message from the store, before any user-facing rewording.
    pub fn raw_message(&self) -> &str {
        match self {
            SubmissionError::Rejected { message, .. }
            | SubmissionError::PermissionDenied { message }
            | SubmissionError::Network(message) => message,
        }
    }
}

impl From<StoreError> for SubmissionError {
    fn from(error: StoreError) -> Self {
        let message = error.message().unwrap_or(UNKNOWN_ERROR_MESSAGE).to_string();
        match error {
            StoreError::Transport(_) => SubmissionError::Network(message),
            StoreError::Rejected(_) if message.contains(ROW_LEVEL_SECURITY_MARKER) => {
                SubmissionError::PermissionDenied { message }
            }
            StoreError::Rejected(remote) => SubmissionError::Rejected {
                code: remote.code,
                message,
            },
        }
    }
}

/// Writes one lead per call, degrading once to the baseline columns when the
/// remote schema has not caught up with the capital band.
///
/// Holds no per-call state, so one client can serve concurrent submissions.
pub struct LeadSubmissionClient<S: LeadStore> {
    store: S,
}

impl<S: LeadStore> LeadSubmissionClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn submit(&self, lead: &Lead) -> Result<RecordSet, SubmissionError> {
        tracing::debug!("Inserting lead with {} fields", lead.field_count());

        let error = match self.store.insert(lead).await {
            Ok(rows) => {
                tracing::info!("✅ Lead stored ({} row(s) confirmed)", rows.len());
                return Ok(rows);
            }
            Err(error) => error,
        };

        match fallback::decide(lead, &error) {
            RetryDecision::Surface => {
                tracing::error!("❌ Lead insert failed: {:?}", error);
                Err(error.into())
            }
            RetryDecision::RetryWithoutCapital => {
                tracing::warn!(
                    "⚠️ Store does not know the capital column ({}), retrying with baseline fields",
                    error
                );
                match self.store.insert(&lead.baseline()).await {
                    Ok(rows) => {
                        tracing::info!("✅ Lead stored without capital band");
                        Ok(rows)
                    }
                    Err(retry_error) => {
                        tracing::error!("❌ Baseline retry failed: {:?}", retry_error);
                        Err(retry_error.into())
                    }
                }
            }
        }
    }
}
