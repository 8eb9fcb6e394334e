use crate::domain::model::{Lead, CAPITAL_COLUMN};
use crate::domain::ports::StoreError;

/// PostgREST: column not found in the schema cache.
pub const CODE_COLUMN_NOT_IN_SCHEMA: &str = "PGRST204";
/// Postgres: undefined_column.
pub const CODE_UNDEFINED_COLUMN: &str = "42703";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Surface,
    RetryWithoutCapital,
}

/// True when the store rejected the write because it does not know the
/// `capital` column.
///
/// A known error code decides on its own. Any other explicit code is not a
/// mismatch, whatever its message says. Only a code-less error falls back to
/// looking for the column name in the message.
pub fn is_capital_schema_mismatch(error: &StoreError) -> bool {
    let StoreError::Rejected(remote) = error else {
        return false;
    };

    match remote.code.as_deref().filter(|c| !c.is_empty()) {
        Some(CODE_COLUMN_NOT_IN_SCHEMA) | Some(CODE_UNDEFINED_COLUMN) => true,
        Some(_) => false,
        None => remote
            .message
            .as_deref()
            .is_some_and(|m| m.contains(CAPITAL_COLUMN)),
    }
}

/// Whether a failed insert of `lead` earns one degraded retry.
pub fn decide(lead: &Lead, error: &StoreError) -> RetryDecision {
    if lead.capital_band.is_some() && is_capital_schema_mismatch(error) {
        RetryDecision::RetryWithoutCapital
    } else {
        RetryDecision::Surface
    }
}
