//! Pacing for step-producing algorithms.
//!
//! Engines are plain iterators of snapshots. The [`Scheduler`] pulls from
//! them, hands each snapshot to an observer and then sleeps for a delay
//! derived from the run speed. Cancellation is cooperative: a
//! [`CancelToken`] is polled by the engines before every write and by the
//! scheduler before every pull. A step the engine has already produced is
//! always delivered, so the working state never runs ahead of the observer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::trace;

use crate::error::{Result, VisualizerError};

/// Animation speed in `1..=100`. Higher is faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(100);

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Speed(value))
        } else {
            Err(VisualizerError::InvalidSpeed(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Pause after each emitted step: `101 - speed` milliseconds.
    pub fn delay(self) -> Duration {
        Duration::from_millis(101 - u64::from(self.0))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(50)
    }
}

impl TryFrom<u8> for Speed {
    type Error = VisualizerError;

    fn try_from(value: u8) -> Result<Self> {
        Speed::new(value)
    }
}

/// Shared stop flag for one run. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Pulls snapshots from a step sequence and paces their delivery.
#[derive(Debug, Clone)]
pub struct Scheduler {
    delay: Duration,
    cancel: CancelToken,
}

impl Scheduler {
    pub fn new(speed: Speed, cancel: CancelToken) -> Self {
        Scheduler {
            delay: speed.delay(),
            cancel,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn should_stop(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drives `steps` to exhaustion or cancellation, awaiting the delay
    /// after every snapshot. Returns how many snapshots were delivered.
    pub async fn play<I, F>(&self, steps: &mut I, mut observer: F) -> usize
    where
        I: Iterator,
        F: FnMut(&I::Item),
    {
        let mut emitted = 0;
        while let Some(snapshot) = self.next_step(steps) {
            observer(&snapshot);
            emitted += 1;
            trace!(emitted, "step delivered");
            tokio::time::sleep(self.delay).await;
        }
        emitted
    }

    /// Same as [`Scheduler::play`] for hosts without an async runtime. The
    /// calling thread is blocked during each delay.
    pub fn play_blocking<I, F>(&self, steps: &mut I, mut observer: F) -> usize
    where
        I: Iterator,
        F: FnMut(&I::Item),
    {
        let mut emitted = 0;
        while let Some(snapshot) = self.next_step(steps) {
            observer(&snapshot);
            emitted += 1;
            thread::sleep(self.delay);
        }
        emitted
    }

    fn next_step<I: Iterator>(&self, steps: &mut I) -> Option<I::Item> {
        if self.should_stop() {
            return None;
        }
        steps.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_inverse_of_speed() {
        assert_eq!(Speed::new(1).unwrap().delay(), Duration::from_millis(100));
        assert_eq!(Speed::new(50).unwrap().delay(), Duration::from_millis(51));
        assert_eq!(Speed::new(100).unwrap().delay(), Duration::from_millis(1));
    }

    #[test]
    fn speed_outside_range_is_rejected() {
        assert_eq!(Speed::new(0), Err(VisualizerError::InvalidSpeed(0)));
        assert_eq!(Speed::try_from(101), Err(VisualizerError::InvalidSpeed(101)));
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn blocking_play_delivers_every_step() {
        let scheduler = Scheduler::new(Speed::MAX, CancelToken::new());
        let mut seen = Vec::new();
        let emitted = scheduler.play_blocking(&mut (1..=3), |n| seen.push(*n));
        assert_eq!(emitted, 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn blocking_play_stops_when_observer_cancels() {
        let token = CancelToken::new();
        let scheduler = Scheduler::new(Speed::MAX, token.clone());
        let mut seen = Vec::new();
        let emitted = scheduler.play_blocking(&mut (1..=10), |n| {
            seen.push(*n);
            if *n == 2 {
                token.cancel();
            }
        });
        assert_eq!(emitted, 2);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn step_produced_while_cancelling_is_still_delivered() {
        use crate::algorithms::sort::{SortAlgorithm, Sorter};

        let token = CancelToken::new();
        let scheduler = Scheduler::new(Speed::MAX, token.clone());
        let mut sorter = Sorter::new(SortAlgorithm::Bubble, &[3, 2, 1], token.clone());
        let mut seen = Vec::new();
        let emitted = {
            // the flag flips after the engine wrote but before the scheduler sees the step
            let mut steps = sorter.by_ref().inspect(|_| token.cancel());
            scheduler.play_blocking(&mut steps, |step| seen.push(step.values.clone()))
        };

        assert_eq!(emitted, 1);
        assert_eq!(seen, vec![vec![2, 3, 1]]);
        assert_eq!(Some(&sorter.values().to_vec()), seen.last());
        assert_eq!(sorter.stats().swaps, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn play_waits_between_steps() {
        let scheduler = Scheduler::new(Speed::new(91).unwrap(), CancelToken::new());
        let started = tokio::time::Instant::now();
        let emitted = scheduler.play(&mut (0..4), |_| {}).await;
        assert_eq!(emitted, 4);
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test(start_paused = true)]
    async fn play_emits_nothing_when_cancelled_up_front() {
        let token = CancelToken::new();
        token.cancel();
        let scheduler = Scheduler::new(Speed::default(), token);
        let mut pulled = 0;
        let mut steps = std::iter::from_fn(|| {
            pulled += 1;
            Some(())
        });
        let emitted = scheduler.play(&mut steps, |_| {}).await;
        assert_eq!(emitted, 0);
        drop(steps);
        assert_eq!(pulled, 0);
    }
}
