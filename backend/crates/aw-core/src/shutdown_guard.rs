use crate::ShutdownCoordinator;

use tokio::sync::watch;

/// Helper for waiting on shutdown in async tasks
pub struct ShutdownGuard {
    shutdown_rx: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Wait for the shutdown signal. Returns immediately if it was already sent.
    pub async fn wait(&mut self) {
        let _ = self.shutdown_rx.wait_for(|stopped| *stopped).await;
    }

    /// Non-blocking check
    pub fn poll_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }
}
