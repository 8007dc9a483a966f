//! Fixed-period callback driving automatic redraws.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest period accepted; `tokio::time::interval_at` rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A running cadence. The first tick fires one period after start.
///
/// The cadence stops when the tick callback returns `false`, when
/// [`cancel`](Self::cancel) is called, or when the handle is dropped.
#[derive(Debug)]
pub(crate) struct Cadence {
    cancel_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Cadence {
    pub(crate) fn start<F>(runtime: &Handle, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let task = runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    _ = ticker.tick() => {
                        if !tick() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            cancel_tx: Some(cancel_tx),
            task,
        }
    }

    /// Stop ticking. A tick already running finishes; no new tick starts.
    pub(crate) fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        self.task.abort();
    }
}

impl Drop for Cadence {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() -> bool + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let ticks = Arc::clone(&count);
        (count, move || {
            ticks.fetch_add(1, Ordering::SeqCst);
            true
        })
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_one_period_after_start() {
        let (count, tick) = counter();
        let _cadence = Cadence::start(&Handle::current(), Duration::from_millis(250), tick);

        time::sleep(Duration::from_millis(240)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let (count, tick) = counter();
        let mut cadence = Cadence::start(&Handle::current(), Duration::from_millis(100), tick);

        time::sleep(Duration::from_millis(150)).await;
        cadence.cancel();
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_ticks() {
        let (count, tick) = counter();
        let cadence = Cadence::start(&Handle::current(), Duration::from_millis(100), tick);

        time::sleep(Duration::from_millis(250)).await;
        drop(cadence);
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_can_stop_the_cadence() {
        let count = Arc::new(AtomicUsize::new(0));
        let ticks = Arc::clone(&count);
        let cadence = Cadence::start(&Handle::current(), Duration::from_millis(10), move || {
            ticks.fetch_add(1, Ordering::SeqCst) < 2
        });

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(cadence.task.is_finished());
    }
}
