//! Transient success notification with auto-dismiss.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// A toast that hides itself after a fixed delay.
///
/// The dismiss timer is a task owned by the notification. Showing it again
/// aborts the pending timer and starts a fresh one, so repeated triggers
/// extend the display instead of stacking hide callbacks.
pub struct Notification {
    visible: Arc<AtomicBool>,
    dismiss_after: Duration,
    timer: Option<JoinHandle<()>>,
}

impl Notification {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            visible: Arc::new(AtomicBool::new(false)),
            dismiss_after,
            timer: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    /// Show the notification and (re)start the dismiss timer.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn show(&mut self) {
        self.cancel_timer();
        self.visible.store(true, Ordering::SeqCst);

        let visible = Arc::clone(&self.visible);
        let delay = self.dismiss_after;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            visible.store(false, Ordering::SeqCst);
        }));
    }

    /// Hide immediately, e.g. when the user closes it.
    pub fn dismiss(&mut self) {
        self.cancel_timer();
        self.visible.store(false, Ordering::SeqCst);
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl Drop for Notification {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
