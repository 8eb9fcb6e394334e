pub mod exit_intent;
pub mod fallback;
pub mod flow;
pub mod form;
pub mod page;
pub mod reveal;
pub mod scoped;
pub mod submission;
pub mod video;

pub use crate::domain::model::{CapitalBand, Lead, LeadField, LeadRecord, RecordSet};
pub use crate::domain::ports::{Browser, LeadStore, RemoteError, StoreError};
pub use crate::utils::error::Result;
