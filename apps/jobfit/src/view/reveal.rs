//! Deferred "scroll results into view". Cosmetic only: it runs on a detached
//! task and nothing in the submission lifecycle waits on it.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::view::{ResultsView, ViewModel};

/// Something that can bring the results region into view.
pub trait Viewport: Send + Sync {
    fn scroll_into_view(&self, results: &ResultsView);
}

/// Detects the first render of each results region.
#[derive(Debug, Default)]
pub struct RevealTracker {
    showing: bool,
}

impl RevealTracker {
    /// Returns the results to reveal if this view just started showing them.
    pub fn observe<'a>(&mut self, view: &'a ViewModel) -> Option<&'a ResultsView> {
        let was_showing = self.showing;
        self.showing = view.results.is_some();
        if was_showing {
            None
        } else {
            view.results.as_ref()
        }
    }

    /// Forgets what was on screen, so the next results shown are revealed.
    pub fn reset(&mut self) {
        self.showing = false;
    }
}

/// Fire-and-forget: waits `delay`, then scrolls. Must be called within a tokio runtime.
pub fn schedule_reveal(viewport: Arc<dyn Viewport>, results: ResultsView, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        debug!("Revealing results after {}ms", delay.as_millis());
        viewport.scroll_into_view(&results);
    });
}
