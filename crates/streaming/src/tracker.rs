use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use foundation::bounds::ViewportBounds;
use runtime::timer::DebounceTimer;
use tokio::sync::watch;
use tracing::debug;

/// Quiet period after the last camera change before bounds are published.
pub const DEFAULT_CAMERA_SETTLE: Duration = Duration::from_millis(1000);

/// Turns a burst of camera-change events into one settled bounding box.
///
/// Each [`Self::on_camera_changed`] call cancels the pending emission and
/// schedules a new one. Subscribers see `None` until the camera first
/// settles, which is what keeps the viewport query from running early.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct ViewportBoundsTracker {
    timer: DebounceTimer,
    bounds: Arc<watch::Sender<Option<ViewportBounds>>>,
    settled: Arc<AtomicU64>,
}

impl ViewportBoundsTracker {
    pub fn new(settle: Duration) -> Self {
        let (bounds, _rx) = watch::channel(None);
        Self {
            timer: DebounceTimer::new(settle),
            bounds: Arc::new(bounds),
            settled: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn settle_window(&self) -> Duration {
        self.timer.delay()
    }

    /// Feed one raw camera-change event.
    pub fn on_camera_changed(&mut self, bounds: ViewportBounds) {
        let tx = Arc::clone(&self.bounds);
        let settled = Arc::clone(&self.settled);
        let window_ms = self.settle_window().as_millis();
        self.timer.schedule(async move {
            let n = settled.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(
                settle = n,
                window_ms,
                north = bounds.north,
                south = bounds.south,
                east = bounds.east,
                west = bounds.west,
                "camera settled"
            );
            tx.send_replace(Some(bounds));
        });
    }

    /// Receiver for settled bounds; `None` until the first settle.
    pub fn subscribe(&self) -> watch::Receiver<Option<ViewportBounds>> {
        self.bounds.subscribe()
    }

    /// Most recently published bounds.
    pub fn latest(&self) -> Option<ViewportBounds> {
        *self.bounds.borrow()
    }

    /// Number of emissions so far.
    pub fn settle_count(&self) -> u64 {
        self.settled.load(Ordering::SeqCst)
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Drop the pending emission, if any.
    pub fn cancel(&mut self) -> bool {
        self.timer.cancel()
    }
}

impl Default for ViewportBoundsTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERA_SETTLE)
    }
}
