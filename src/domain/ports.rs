use crate::domain::model::{Lead, RecordSet};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the store (PostgREST shape).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(skip)]
    pub status: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{}", .0.message.as_deref().unwrap_or("Unknown error"))]
    Rejected(RemoteError),

    #[error("{0}")]
    Transport(String),
}

impl StoreError {
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Rejected(remote) => remote.code.as_deref(),
            StoreError::Transport(_) => None,
        }
    }

    /// The underlying message, `None` when the store gave none.
    pub fn message(&self) -> Option<&str> {
        match self {
            StoreError::Rejected(remote) => remote.message.as_deref().filter(|m| !m.is_empty()),
            StoreError::Transport(message) => Some(message.as_str()).filter(|m| !m.is_empty()),
        }
    }
}

/// A table that accepts lead inserts and echoes the written rows back.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: &Lead) -> Result<RecordSet, StoreError>;
}

/// Side effects the page asks of its host document.
pub trait Browser {
    fn scroll_to_form(&self);
    fn scroll_to_top(&self);
    fn navigate(&self, url: &str);
}
