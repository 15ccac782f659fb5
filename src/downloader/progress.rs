// Synthetic progress indicator for conversions
//
// The backend only returns the finished file, so progress is fabricated: a
// periodic task adds random increments while a conversion is in flight and never
// reaches the cap. The task is owned by the simulator and aborted on complete,
// stop and drop.

use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::config::ProgressConfig;

pub struct ProgressSimulator {
    config: ProgressConfig,
    sender: Arc<watch::Sender<f32>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ProgressSimulator {
    pub fn new(config: ProgressConfig) -> Self {
        let (sender, _) = watch::channel(0.0);
        Self {
            config,
            sender: Arc::new(sender),
            task: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Current value in `[0, 100]`
    pub fn value(&self) -> f32 {
        *self.sender.borrow()
    }

    /// Receiver that observes every progress update
    pub fn subscribe(&self) -> watch::Receiver<f32> {
        self.sender.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.task().is_some()
    }

    fn task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reset to 0 and start ticking. Must be called inside a tokio runtime.
    pub fn start(&self) {
        self.stop();
        self.sender.send_replace(0.0);

        let sender = Arc::clone(&self.sender);
        let tick = self.config.tick;
        let max_increment = self.config.max_increment;
        let cap = self.config.cap;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let increment = if max_increment > 0.0 {
                    rand::thread_rng().gen_range(0.0..max_increment)
                } else {
                    0.0
                };
                sender.send_modify(|value| *value = advance(*value, increment, cap));
            }
        });

        *self.task() = Some(handle);
        debug!("[Progress] Started");
    }

    /// Stop ticking and jump to 100
    pub fn complete(&self) {
        self.stop();
        self.sender.send_replace(100.0);
    }

    /// Stop ticking, keeping the current value
    pub fn stop(&self) {
        let handle = self.task().take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("[Progress] Stopped");
        }
    }

    pub fn reset(&self) {
        self.sender.send_replace(0.0);
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Next value, skipping increments that would reach the cap
fn advance(current: f32, increment: f32, cap: f32) -> f32 {
    let next = current + increment;
    if next < cap {
        next
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_config() -> ProgressConfig {
        ProgressConfig {
            tick: Duration::from_millis(10),
            max_increment: 20.0,
            cap: 95.0,
            completion_delay: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_advance_never_reaches_cap() {
        assert_eq!(advance(10.0, 4.0, 95.0), 14.0);
        assert_eq!(advance(93.0, 2.0, 95.0), 93.0);
        assert_eq!(advance(94.0, 4.9, 95.0), 94.0);
        assert_eq!(advance(90.0, 4.5, 95.0), 94.5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_stays_below_cap_while_running() {
        let sim = ProgressSimulator::new(fast_config());
        sim.start();
        assert!(sim.is_running());

        let mut last = 0.0;
        for _ in 0..500 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let value = sim.value();
            assert!((0.0..95.0).contains(&value), "value {value} out of range");
            assert!(value >= last);
            last = value;
        }
        assert!(last > 0.0);
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_stops_ticking_at_100() {
        let sim = ProgressSimulator::new(fast_config());
        sim.start();
        tokio::time::sleep(Duration::from_millis(50)).await;

        sim.complete();
        assert!(!sim.is_running());
        assert_eq!(sim.value(), 100.0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(sim.value(), 100.0);

        sim.reset();
        assert_eq!(sim.value(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_to_zero() {
        let sim = ProgressSimulator::new(fast_config());
        sim.start();
        tokio::time::sleep(Duration::from_millis(200)).await;
        sim.complete();

        sim.start();
        assert_eq!(sim.value(), 0.0);
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_keeps_value_and_subscribers_see_updates() {
        let sim = ProgressSimulator::new(fast_config());
        let mut rx = sim.subscribe();
        sim.start();

        rx.changed().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        sim.stop();

        let frozen = sim.value();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(sim.value(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poisoned_lock_still_tracks_task() {
        let sim = Arc::new(ProgressSimulator::new(fast_config()));
        sim.start();

        let poisoner = Arc::clone(&sim);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.task.lock().unwrap();
            panic!("poison the task lock");
        })
        .join();
        assert!(sim.task.is_poisoned());

        assert!(sim.is_running());
        sim.stop();
        assert!(!sim.is_running());

        sim.start();
        assert!(sim.is_running());
        sim.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let sim = ProgressSimulator::new(fast_config());
        let mut rx = sim.subscribe();
        sim.start();
        tokio::time::sleep(Duration::from_millis(50)).await;

        drop(sim);

        // The task holds the last sender; once it is gone the channel closes
        while rx.changed().await.is_ok() {}
    }
}
