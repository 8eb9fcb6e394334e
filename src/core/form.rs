use crate::core::submission::{LeadSubmissionClient, SubmissionError};
use crate::domain::model::{CapitalBand, Lead, LeadField, RecordSet};
use crate::domain::ports::LeadStore;
use serde::{Deserialize, Serialize};

pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong while saving your details. Please try again.";
pub const MISSING_CAPITAL_MESSAGE: &str = "Please select your available capital range.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    #[default]
    Basic,
    /// Adds the mandatory capital band selector.
    Extended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Success,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub capital_band: Option<CapitalBand>,
}

impl LeadDraft {
    pub fn field(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Phone => &self.phone,
        }
    }
}

/// Validates a draft into a lead, or returns the inline message to show.
pub fn validate_draft(draft: &LeadDraft, variant: FormVariant) -> Result<Lead, String> {
    for field in [LeadField::Name, LeadField::Email, LeadField::Phone] {
        if draft.field(field).trim().is_empty() {
            return Err(format!("Please fill in the \"{}\" field.", field.label()));
        }
    }

    if !looks_like_email(draft.email.trim()) {
        return Err("Please enter a valid e-mail address.".to_string());
    }

    if variant == FormVariant::Extended && draft.capital_band.is_none() {
        return Err(MISSING_CAPITAL_MESSAGE.to_string());
    }

    Ok(Lead {
        name: draft.name.trim().to_string(),
        email: draft.email.trim().to_string(),
        phone: draft.phone.trim().to_string(),
        capital_band: match variant {
            FormVariant::Extended => draft.capital_band,
            FormVariant::Basic => None,
        },
    })
}

// Same bar as an `<input type="email">`: one '@' with text on both sides.
fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

/// Field state and submit lifecycle of the lead-capture form.
#[derive(Debug, Clone)]
pub struct CaptureForm {
    variant: FormVariant,
    draft: LeadDraft,
    state: SubmitState,
}

impl CaptureForm {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            draft: LeadDraft::default(),
            state: SubmitState::Idle,
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmitState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn update_field(&mut self, field: LeadField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LeadField::Name => self.draft.name = value,
            LeadField::Email => self.draft.email = value,
            LeadField::Phone => self.draft.phone = value,
        }
        self.clear_failure();
    }

    pub fn select_capital_band(&mut self, band: CapitalBand) {
        if self.variant != FormVariant::Extended {
            tracing::debug!("Ignoring capital band selection on the basic form");
            return;
        }
        self.draft.capital_band = Some(band);
        self.clear_failure();
    }

    /// Moves to `Submitting` and hands back the lead to write.
    ///
    /// Returns `None` when the request is ignored (a write is already in
    /// flight or has succeeded) or when local validation fails, in which case
    /// the state is `Failed` with the validation message.
    pub fn begin_submit(&mut self) -> Option<Lead> {
        match self.state {
            SubmitState::Submitting | SubmitState::Success => {
                tracing::debug!("Submit ignored in state {:?}", self.state);
                return None;
            }
            SubmitState::Idle | SubmitState::Failed(_) => {}
        }

        match validate_draft(&self.draft, self.variant) {
            Ok(lead) => {
                self.state = SubmitState::Submitting;
                Some(lead)
            }
            Err(message) => {
                tracing::debug!("Form validation failed: {}", message);
                self.state = SubmitState::Failed(message);
                None
            }
        }
    }

    /// Records the outcome of the write. Returns `true` exactly once, on the
    /// transition into `Success`.
    pub fn finish_submit(&mut self, outcome: Result<RecordSet, SubmissionError>) -> bool {
        if self.state != SubmitState::Submitting {
            tracing::warn!("Submission outcome arrived in state {:?}", self.state);
            return false;
        }

        match outcome {
            Ok(_) => {
                self.state = SubmitState::Success;
                true
            }
            Err(error) => {
                let message = error.to_string();
                self.state = SubmitState::Failed(if message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message
                });
                false
            }
        }
    }

    /// Validates, writes and records the outcome in one go. Returns `true`
    /// when the lead was stored.
    pub async fn submit<S: LeadStore>(&mut self, client: &LeadSubmissionClient<S>) -> bool {
        let Some(lead) = self.begin_submit() else {
            return false;
        };
        let outcome = client.submit(&lead).await;
        self.finish_submit(outcome)
    }

    fn clear_failure(&mut self) {
        if matches!(self.state, SubmitState::Failed(_)) {
            self.state = SubmitState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{RemoteError, StoreError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone)]
    struct CountingStore {
        calls: Arc<AtomicUsize>,
        fail_with: Option<StoreError>,
    }

    impl CountingStore {
        fn ok() -> Self {
            Self {
                calls: Arc::default(),
                fail_with: None,
            }
        }

        fn failing(error: StoreError) -> Self {
            Self {
                calls: Arc::default(),
                fail_with: Some(error),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl LeadStore for CountingStore {
        async fn insert(&self, _lead: &Lead) -> Result<RecordSet, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(vec![]),
            }
        }
    }

    fn filled(variant: FormVariant) -> CaptureForm {
        let mut form = CaptureForm::new(variant);
        form.update_field(LeadField::Name, "Ana Souza");
        form.update_field(LeadField::Email, "ana@example.com");
        form.update_field(LeadField::Phone, "(11) 99999-0000");
        form
    }

    #[tokio::test]
    async fn test_missing_required_field_never_calls_client() {
        for missing in [LeadField::Name, LeadField::Email, LeadField::Phone] {
            let store = CountingStore::ok();
            let client = LeadSubmissionClient::new(store.clone());
            let mut form = filled(FormVariant::Basic);
            form.update_field(missing, "   ");

            assert!(!form.submit(&client).await);
            assert_eq!(store.calls(), 0);
            assert!(form.error_message().unwrap().contains(missing.label()));
        }
    }

    #[tokio::test]
    async fn test_extended_form_requires_capital_band() {
        let store = CountingStore::ok();
        let client = LeadSubmissionClient::new(store.clone());
        let mut form = filled(FormVariant::Extended);

        assert!(!form.submit(&client).await);
        assert_eq!(store.calls(), 0);
        assert_eq!(form.error_message(), Some(MISSING_CAPITAL_MESSAGE));

        form.select_capital_band(CapitalBand::UpTo50k);
        assert_eq!(form.state(), &SubmitState::Idle);
        form.select_capital_band(CapitalBand::Over1m);
        assert_eq!(form.draft().capital_band, Some(CapitalBand::Over1m));

        assert!(form.submit(&client).await);
        assert_eq!(store.calls(), 1);
        assert_eq!(form.state(), &SubmitState::Success);
    }

    #[test]
    fn test_basic_form_ignores_capital_band() {
        let mut form = filled(FormVariant::Basic);
        form.select_capital_band(CapitalBand::Over1m);
        assert_eq!(form.draft().capital_band, None);
        assert_eq!(form.begin_submit().unwrap().capital_band, None);
    }

    #[test]
    fn test_invalid_email_shape_is_rejected() {
        let mut form = filled(FormVariant::Basic);
        form.update_field(LeadField::Email, "ana.example.com");
        assert!(form.begin_submit().is_none());
        assert!(form.error_message().unwrap().contains("e-mail"));
    }

    #[test]
    fn test_repeated_submit_is_ignored_while_in_flight() {
        let mut form = filled(FormVariant::Basic);

        assert!(form.begin_submit().is_some());
        assert!(form.is_submitting());
        assert!(form.begin_submit().is_none());
        assert!(form.is_submitting());

        assert!(form.finish_submit(Ok(vec![])));
        assert!(form.begin_submit().is_none());
        assert!(!form.finish_submit(Ok(vec![])));
    }

    #[tokio::test]
    async fn test_failure_keeps_fields_and_shows_message() {
        let store = CountingStore::failing(StoreError::Rejected(RemoteError {
            code: Some("23505".to_string()),
            message: Some("duplicate key value".to_string()),
            ..Default::default()
        }));
        let client = LeadSubmissionClient::new(store.clone());
        let mut form = filled(FormVariant::Basic);

        assert!(!form.submit(&client).await);
        assert_eq!(form.error_message(), Some("duplicate key value"));
        assert_eq!(form.draft().name, "Ana Souza");

        form.update_field(LeadField::Phone, "11988887777");
        assert_eq!(form.state(), &SubmitState::Idle);

        assert!(!form.submit(&client).await);
        assert_eq!(store.calls(), 2);
    }

    #[test]
    fn test_fields_are_trimmed_into_lead() {
        let mut form = CaptureForm::new(FormVariant::Basic);
        form.update_field(LeadField::Name, "  Ana ");
        form.update_field(LeadField::Email, " ana@example.com");
        form.update_field(LeadField::Phone, "119 ");
        let lead = form.begin_submit().unwrap();
        assert_eq!(lead.name, "Ana");
        assert_eq!(lead.email, "ana@example.com");
        assert_eq!(lead.phone, "119");
    }

    #[test]
    fn test_blank_store_message_falls_back_to_generic_text() {
        let mut form = filled(FormVariant::Basic);
        assert!(form.begin_submit().is_some());

        let stored = form.finish_submit(Err(SubmissionError::Rejected {
            code: None,
            message: "  ".to_string(),
        }));

        assert!(!stored);
        assert_eq!(form.error_message(), Some(GENERIC_FAILURE_MESSAGE));
        assert_eq!(form.draft().name, "Ana Souza");
    }

    #[tokio::test]
    async fn test_blank_remote_message_shows_generic_text() {
        let store = CountingStore::failing(StoreError::Rejected(RemoteError {
            code: Some("XX000".to_string()),
            message: Some(" \n ".to_string()),
            ..RemoteError::default()
        }));
        let client = LeadSubmissionClient::new(store.clone());
        let mut form = filled(FormVariant::Basic);

        assert!(!form.submit(&client).await);

        assert_eq!(store.calls(), 1);
        assert_eq!(form.state(), &SubmitState::Failed(GENERIC_FAILURE_MESSAGE.to_string()));
    }
}
