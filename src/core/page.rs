use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::exit_intent::{self, ExitIntent, PointerLeave};
use crate::core::flow::{ConfirmationPolicy, PageFlow, Route};
use crate::core::form::{CaptureForm, FormVariant};
use crate::core::reveal::{RevealLatch, RevealPolicy, RevealReason};
use crate::core::scoped::TaskGuard;
use crate::core::submission::{LeadSubmissionClient, SubmissionError};
use crate::core::video::VideoSource;
use crate::domain::model::{CapitalBand, LeadField, RecordSet};
use crate::domain::ports::{Browser, LeadStore};
use crate::web::views::{ConfirmationView, FormView, LandingView, View};

#[derive(Debug, Clone)]
pub enum PageEvent {
    PlayPressed,
    PointerLeft(PointerLeave),
    SkipVideoConfirmed,
    OverlayDismissed,
    FieldEdited(LeadField, String),
    CapitalSelected(CapitalBand),
    SubmitRequested,
    RevealTimerFired(RevealReason),
    SubmitFinished(Result<RecordSet, SubmissionError>),
    RedirectTimerFired,
    Teardown,
}

#[derive(Debug, Clone)]
pub struct PageSettings {
    pub video: VideoSource,
    /// Resolved ahead of time for providers that need an oEmbed lookup.
    pub thumbnail_url: Option<String>,
    pub form_variant: FormVariant,
    pub reveal: RevealPolicy,
    pub confirmation: ConfirmationPolicy,
}

/// One page view of the funnel: video, hidden form, exit-intent overlay and
/// the hand-off to the confirmation view, driven by a single event queue.
pub struct LandingPage<S, B>
where
    S: LeadStore + 'static,
    B: Browser,
{
    settings: PageSettings,
    client: Arc<LeadSubmissionClient<S>>,
    browser: B,
    events: UnboundedSender<PageEvent>,
    inbox: UnboundedReceiver<PageEvent>,
    playing: bool,
    form: CaptureForm,
    reveal: RevealLatch,
    exit_intent: ExitIntent,
    flow: PageFlow,
    reveal_timers: Vec<TaskGuard>,
    exit_listener: Option<TaskGuard>,
    redirect_timer: Option<TaskGuard>,
    navigated: bool,
}

impl<S, B> LandingPage<S, B>
where
    S: LeadStore + 'static,
    B: Browser,
{
    pub fn new(settings: PageSettings, client: Arc<LeadSubmissionClient<S>>, browser: B) -> Self {
        let (events, inbox) = mpsc::unbounded_channel();
        let form = CaptureForm::new(settings.form_variant);
        Self {
            settings,
            client,
            browser,
            events,
            inbox,
            playing: false,
            form,
            reveal: RevealLatch::default(),
            exit_intent: ExitIntent::default(),
            flow: PageFlow::default(),
            reveal_timers: Vec::new(),
            exit_listener: None,
            redirect_timer: None,
            navigated: false,
        }
    }

    /// Handle for the host document to post UI events with.
    pub fn dispatcher(&self) -> UnboundedSender<PageEvent> {
        self.events.clone()
    }

    /// Starts load-time timers and, when a pointer feed is given, the
    /// exit-intent listener. Must run inside a tokio runtime.
    pub fn load(&mut self, pointer_feed: Option<broadcast::Receiver<PointerLeave>>) {
        if let Some(delay) = self.settings.reveal.on_load() {
            tracing::debug!("Scheduling load reveal timer in {:?}", delay);
            self.reveal_timers.push(TaskGuard::timer(
                delay,
                self.events.clone(),
                PageEvent::RevealTimerFired(RevealReason::LoadTimer),
            ));
        }

        if let Some(feed) = pointer_feed {
            self.exit_listener = Some(exit_intent::subscribe(
                feed,
                self.events.clone(),
                PageEvent::PointerLeft,
            ));
        }
    }

    pub fn route(&self) -> Route {
        self.flow.route()
    }

    pub fn form(&self) -> &CaptureForm {
        &self.form
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_form_visible(&self) -> bool {
        self.reveal.is_visible()
    }

    pub fn exit_intent(&self) -> &ExitIntent {
        &self.exit_intent
    }

    pub fn has_navigated(&self) -> bool {
        self.navigated
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Waits for the next event and applies it. Returns `false` once the page
    /// is finished (torn down or navigated away).
    pub async fn step(&mut self) -> bool {
        match self.inbox.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    pub async fn run(&mut self) {
        while self.step().await {}
        tracing::debug!("Page event loop finished");
    }

    /// Applies one event. Returns `false` when the page is finished.
    pub fn apply(&mut self, event: PageEvent) -> bool {
        tracing::trace!("Page event: {:?}", event);
        match event {
            PageEvent::Teardown => {
                self.teardown();
                return false;
            }
            PageEvent::RedirectTimerFired => {
                if let Some((url, _)) = self.settings.confirmation.redirect() {
                    tracing::info!("➡️ Redirecting to {}", url);
                    self.browser.navigate(url);
                    self.navigated = true;
                    self.teardown();
                    return false;
                }
            }
            PageEvent::SubmitFinished(outcome) => {
                if self.form.finish_submit(outcome) {
                    self.on_lead_success();
                }
            }
            // everything below belongs to the landing view only
            _ if self.flow.route() == Route::Confirmation => {}
            PageEvent::PlayPressed => self.on_play(),
            PageEvent::PointerLeft(pointer) => {
                if self.exit_intent.on_pointer_leave(pointer) {
                    tracing::info!("👋 Exit intent detected, offering to skip the video");
                }
            }
            PageEvent::SkipVideoConfirmed => {
                if self.exit_intent.confirm() {
                    self.reveal_form(RevealReason::SkipVideo);
                }
            }
            PageEvent::OverlayDismissed => self.exit_intent.dismiss(),
            PageEvent::FieldEdited(field, value) => self.form.update_field(field, value),
            PageEvent::CapitalSelected(band) => self.form.select_capital_band(band),
            PageEvent::SubmitRequested => self.on_submit(),
            PageEvent::RevealTimerFired(reason) => self.reveal_form(reason),
        }
        true
    }

    fn on_play(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        let delay = self.settings.reveal.on_play();
        tracing::debug!("Playback started, form reveal in {:?}", delay);
        self.reveal_timers.push(TaskGuard::timer(
            delay,
            self.events.clone(),
            PageEvent::RevealTimerFired(RevealReason::PlayTimer),
        ));
    }

    fn reveal_form(&mut self, reason: RevealReason) {
        if self.reveal.reveal(reason) {
            tracing::info!("📝 Capture form revealed ({:?})", reason);
            self.browser.scroll_to_form();
        }
    }

    fn on_submit(&mut self) {
        if !self.reveal.is_visible() {
            tracing::debug!("Submit ignored, form is still hidden");
            return;
        }
        let Some(lead) = self.form.begin_submit() else {
            return;
        };
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        // not guarded: an in-flight write is allowed to finish after teardown
        tokio::spawn(async move {
            let outcome = client.submit(&lead).await;
            let _ = events.send(PageEvent::SubmitFinished(outcome));
        });
    }

    fn on_lead_success(&mut self) {
        if !self.flow.on_lead_success() {
            return;
        }
        tracing::info!("🎉 Lead captured, showing confirmation");
        self.reveal_timers.clear();
        self.exit_listener = None;
        self.exit_intent.dismiss();
        self.browser.scroll_to_top();

        if let Some((url, delay)) = self.settings.confirmation.redirect() {
            tracing::debug!("Redirect to {} scheduled in {:?}", url, delay);
            self.redirect_timer = Some(TaskGuard::timer(
                delay,
                self.events.clone(),
                PageEvent::RedirectTimerFired,
            ));
        }
    }

    fn teardown(&mut self) {
        self.reveal_timers.clear();
        self.exit_listener = None;
        self.redirect_timer = None;
    }

    pub fn view(&self) -> View {
        match self.flow.route() {
            Route::Landing => {
                let draft = self.form.draft();
                View::Landing(LandingView {
                    embed_url: self.playing.then(|| self.settings.video.embed_url()),
                    thumbnail_url: self
                        .settings
                        .thumbnail_url
                        .clone()
                        .or_else(|| self.settings.video.static_thumbnail_url()),
                    show_scroll_hint: self.playing && !self.reveal.is_visible(),
                    overlay_open: self.exit_intent.is_overlay_open(),
                    form_visible: self.reveal.is_visible(),
                    form: FormView {
                        variant: self.form.variant(),
                        name: draft.name.clone(),
                        email: draft.email.clone(),
                        phone: draft.phone.clone(),
                        capital_band: draft.capital_band,
                        error: self.form.error_message().map(str::to_string),
                        submitting: self.form.is_submitting(),
                    },
                })
            }
            Route::Confirmation => {
                View::Confirmation(ConfirmationView::from_policy(&self.settings.confirmation))
            }
        }
    }
}
