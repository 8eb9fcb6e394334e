pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HeadlessBrowser, SupabaseStore, ThumbnailResolver};
pub use config::FunnelConfig;
pub use crate::core::{
    form::{CaptureForm, FormVariant, SubmitState},
    page::{LandingPage, PageEvent, PageSettings},
    submission::{LeadSubmissionClient, SubmissionError},
};
pub use domain::model::{CapitalBand, Lead, LeadField};
pub use utils::error::{FunnelError, Result};
