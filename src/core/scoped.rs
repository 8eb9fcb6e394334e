use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// A spawned task that is aborted when the guard is dropped.
#[derive(Debug)]
pub struct TaskGuard {
    handle: JoinHandle<()>,
}

impl TaskGuard {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Posts `event` to `sink` once, after `delay`.
    pub fn timer<E>(delay: Duration, sink: UnboundedSender<E>, event: E) -> Self
    where
        E: Send + 'static,
    {
        Self::spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the page was torn down
            let _ = sink.send(event);
        })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
