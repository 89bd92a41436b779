//! Shutdown coordination.
//!
//! The stopped flag is latched in a `watch` channel, so a listener created
//! after `trigger` still observes it.

use tokio::sync::watch;

/// Owner side: flips the process into the stopping state.
pub struct Shutdown {
    stopped: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self { stopped }
    }

    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            stopped: self.stopped.subscribe(),
        }
    }

    /// Latch the stopped flag. Idempotent.
    pub fn trigger(&self) {
        self.stopped.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopped.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener side, handed to the HTTP server's graceful-shutdown future.
#[derive(Clone)]
pub struct ShutdownListener {
    stopped: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// Resolve once shutdown has been triggered, or the owner is gone.
    pub async fn wait(mut self) {
        let _ = self.stopped.wait_for(|stopped| *stopped).await;
    }
}
