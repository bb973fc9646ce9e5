//! Shutdown coordination for the dashboard.
//!
//! One `Shutdown` is created at startup. The HTTP server holds a receiver
//! and drains when the signal listener (or a test harness) fires it.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Fires the stop signal at most once to every subscribed task.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    fired: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            fired: AtomicBool::new(false),
        }
    }

    /// Receiver that resolves when shutdown fires.
    ///
    /// Subscribe before calling [`Shutdown::trigger`]; a late subscriber
    /// never sees the signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Returns how many receivers were notified, or `None`
    /// when shutdown had already fired.
    pub fn trigger(&self) -> Option<usize> {
        if self.fired.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(self.tx.send(()).unwrap_or(0))
    }

    pub fn is_triggered(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Receivers still alive, i.e. tasks that have not finished draining.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
