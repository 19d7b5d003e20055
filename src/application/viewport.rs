use crate::application::pois::PoiFetcher;
use crate::domain::geo::LatLng;
use crate::domain::model::Poi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Quiet period before a viewport change is acted on.
pub const DEBOUNCE_DELAY: Duration = Duration::from_secs(1);

/// A map viewport snapshot as reported by the embedding UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

/// Coalesce a stream so only the latest value survives a burst, emitted
/// once the input has been quiet for `delay`.
///
/// One pending value, one timer: every new input replaces the value and
/// restarts the timer. Remaining input is flushed when the channel closes.
pub fn debounce<T: Send + 'static>(
    delay: Duration,
    mut input: mpsc::Receiver<T>,
) -> mpsc::Receiver<T> {
    let (tx, output) = mpsc::channel(8);
    tokio::spawn(async move {
        let mut pending: Option<T> = None;
        loop {
            tokio::select! {
                // Drain input before the timer: when both are ready the
                // newest value must win, not the stale pending one.
                biased;

                item = input.recv() => match item {
                    Some(value) => pending = Some(value),
                    None => {
                        if let Some(value) = pending.take() {
                            let _ = tx.send(value).await;
                        }
                        break;
                    }
                },
                _ = tokio::time::sleep(delay), if pending.is_some() => {
                    if let Some(value) = pending.take() {
                        if tx.send(value).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });
    output
}

/// Drives the POI orchestrator from debounced viewport changes and hands
/// ranked POI lists to the rendering consumer.
pub struct ViewportWatcher {
    events: mpsc::Sender<Viewport>,
    task: JoinHandle<()>,
}

impl ViewportWatcher {
    /// Spawn the watcher. The returned receiver yields one ranked, capped
    /// POI list per debounced viewport change.
    pub fn spawn(fetcher: Arc<PoiFetcher>, delay: Duration) -> (Self, mpsc::Receiver<Vec<Poi>>) {
        let (events, raw) = mpsc::channel::<Viewport>(32);
        let mut debounced = debounce(delay, raw);
        let (out_tx, out_rx) = mpsc::channel(8);

        let task = tokio::spawn(async move {
            while let Some(viewport) = debounced.recv().await {
                let pois = fetcher
                    .pois_for_viewport(viewport.center, viewport.zoom)
                    .await;
                debug!(count = pois.len(), "viewport POIs ready");
                if out_tx.send(pois).await.is_err() {
                    break;
                }
            }
        });

        (Self { events, task }, out_rx)
    }

    /// Report a pan/zoom. Never blocks the UI thread: when the queue is
    /// full the event is dropped, a newer one is already behind it.
    pub fn viewport_changed(&self, center: LatLng, zoom: u8) {
        let _ = self.events.try_send(Viewport { center, zoom });
    }

    /// Stop accepting events and wait for in-flight work to drain.
    pub async fn close(self) {
        drop(self.events);
        let _ = self.task.await;
    }
}
