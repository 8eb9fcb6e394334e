use crate::core::scoped::TaskGuard;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::UnboundedSender;

/// Pointer left the document; `client_y` is relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerLeave {
    pub client_y: f64,
}

impl PointerLeave {
    pub fn is_top_exit(&self) -> bool {
        self.client_y <= 0.0
    }
}

/// Skip-video overlay opened by the first top-edge exit of the page view.
#[derive(Debug, Clone, Default)]
pub struct ExitIntent {
    has_triggered: bool,
    overlay_open: bool,
}

impl ExitIntent {
    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open
    }

    /// Returns `true` when this event opened the overlay.
    pub fn on_pointer_leave(&mut self, event: PointerLeave) -> bool {
        if self.has_triggered || !event.is_top_exit() {
            return false;
        }
        self.has_triggered = true;
        self.overlay_open = true;
        true
    }

    /// User accepted skipping the video. Returns `true` if the overlay was
    /// open, meaning the caller should reveal the form.
    pub fn confirm(&mut self) -> bool {
        std::mem::replace(&mut self.overlay_open, false)
    }

    pub fn dismiss(&mut self) {
        self.overlay_open = false;
    }
}

/// Forwards document pointer exits into the page's event queue until dropped.
pub fn subscribe<E, F>(
    mut feed: broadcast::Receiver<PointerLeave>,
    sink: UnboundedSender<E>,
    wrap: F,
) -> TaskGuard
where
    E: Send + 'static,
    F: Fn(PointerLeave) -> E + Send + 'static,
{
    TaskGuard::spawn(async move {
        loop {
            match feed.recv().await {
                Ok(event) => {
                    if sink.send(wrap(event)).is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("Exit-intent listener skipped {} pointer events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    const TOP: PointerLeave = PointerLeave { client_y: 0.0 };
    const SIDE: PointerLeave = PointerLeave { client_y: 240.0 };

    #[test]
    fn test_overlay_opens_at_most_once() {
        let mut intent = ExitIntent::default();

        assert!(!intent.on_pointer_leave(SIDE));
        assert!(intent.on_pointer_leave(TOP));
        intent.dismiss();
        assert!(!intent.is_overlay_open());

        for _ in 0..10 {
            assert!(!intent.on_pointer_leave(TOP));
        }
        assert!(!intent.is_overlay_open());
        assert!(intent.has_triggered());
    }

    #[test]
    fn test_confirm_reports_open_overlay_only() {
        let mut intent = ExitIntent::default();
        assert!(!intent.confirm());

        intent.on_pointer_leave(PointerLeave { client_y: -3.0 });
        assert!(intent.confirm());
        assert!(!intent.is_overlay_open());
        assert!(!intent.confirm());
    }

    #[tokio::test]
    async fn test_subscription_stops_forwarding_when_dropped() {
        let (feed_tx, feed_rx) = broadcast::channel(8);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let guard = subscribe(feed_rx, tx, |e| e.client_y);
        feed_tx.send(TOP).unwrap();
        assert_eq!(rx.recv().await, Some(0.0));

        drop(guard);
        tokio::task::yield_now().await;
        let _ = feed_tx.send(SIDE);
        // the forwarding task owned the only other sender
        assert_eq!(rx.recv().await, None);
    }
}
