use crate::core::exit_intent::PointerLeave;
use crate::core::page::{LandingPage, PageEvent};
use crate::core::reveal::RevealReason;
use crate::domain::ports::{Browser, LeadStore};
use crate::web::views::View;

/// Static snapshots of the landing page, one per state a visitor passes
/// through, keyed by output file name.
///
/// The page is driven with the same events the runtime handles. The reveal
/// timer is fired directly so snapshots do not wait for the configured delay.
/// Must run inside a tokio runtime.
pub fn landing_snapshots<S, B>(page: &mut LandingPage<S, B>) -> Vec<(&'static str, View)>
where
    S: LeadStore + 'static,
    B: Browser,
{
    let mut snapshots = vec![("index.html", page.view())];

    page.apply(PageEvent::PlayPressed);
    snapshots.push(("video.html", page.view()));

    page.apply(PageEvent::PointerLeft(PointerLeave { client_y: 0.0 }));
    snapshots.push(("exit-intent.html", page.view()));
    page.apply(PageEvent::OverlayDismissed);

    page.apply(PageEvent::RevealTimerFired(RevealReason::PlayTimer));
    snapshots.push(("form.html", page.view()));

    snapshots
}
