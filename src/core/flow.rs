use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;

fn default_redirect_delay_ms() -> u64 {
    DEFAULT_REDIRECT_DELAY_MS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Confirmation,
}

/// What the confirmation view does once it is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConfirmationPolicy {
    /// Navigate to `url` after `delay_ms`, with a manual link as fallback.
    Redirect {
        url: String,
        #[serde(default = "default_redirect_delay_ms")]
        delay_ms: u64,
    },
    Static,
}

impl ConfirmationPolicy {
    pub fn redirect(&self) -> Option<(&str, Duration)> {
        match self {
            ConfirmationPolicy::Redirect { url, delay_ms } => {
                Some((url.as_str(), Duration::from_millis(*delay_ms)))
            }
            ConfirmationPolicy::Static => None,
        }
    }
}

/// Landing to confirmation, never back.
#[derive(Debug, Clone)]
pub struct PageFlow {
    route: Route,
}

impl Default for PageFlow {
    fn default() -> Self {
        Self {
            route: Route::Landing,
        }
    }
}

impl PageFlow {
    pub fn route(&self) -> Route {
        self.route
    }

    /// Returns `true` on the one call that moved the flow to confirmation.
    pub fn on_lead_success(&mut self) -> bool {
        match self.route {
            Route::Landing => {
                self.route = Route::Confirmation;
                true
            }
            Route::Confirmation => false,
        }
    }
}
