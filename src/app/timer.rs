//! Delayed banner clearing

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// At most one pending "clear the success banner" task.
///
/// Scheduling replaces (aborts) the previous task; dropping the timer aborts
/// whatever is still pending.
pub struct BannerTimer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl BannerTimer {
    pub fn new(delay: Duration) -> Self {
        BannerTimer {
            delay,
            pending: None,
        }
    }

    /// Send `token` on `expiry_tx` once the delay has elapsed
    pub fn schedule(&mut self, token: u64, expiry_tx: mpsc::UnboundedSender<u64>) {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = expiry_tx.send(token);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for BannerTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
