//! Repeat-on-schedule execution with cooperative cancellation.
//!
//! The scheduler runs one pass immediately, then keeps passes spaced by a
//! fixed interval measured start to start. It never sleeps a whole interval:
//! it wakes every poll period to check for cancellation, so stopping takes at
//! most one poll period plus whatever is left of an in-flight pass.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};

/// Work the scheduler repeats. A pass always runs to completion.
#[async_trait::async_trait]
pub trait RefreshJob: Send {
    async fn run_pass(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Sending side of a cancellation signal. Dropping it does not cancel.
#[derive(Debug, Clone)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }
}

pub fn cancellation() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle(tx), CancelSignal(rx))
}

pub struct RefreshScheduler {
    interval: Duration,
    poll: Duration,
    state: SchedulerState,
}

impl RefreshScheduler {
    pub fn new(interval: Duration, poll: Duration) -> Self {
        Self {
            interval,
            poll,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Runs `job` until `cancel` fires and returns the number of passes started.
    ///
    /// Passes never overlap: a pass that outlasts the interval delays the next
    /// one, which then starts as soon as the overrunning pass finishes.
    pub async fn run<J: RefreshJob>(&mut self, job: &mut J, cancel: &CancelSignal) -> usize {
        if cancel.is_cancelled() {
            return 0;
        }

        self.state = SchedulerState::Running;
        info!(
            interval_secs = self.interval.as_secs(),
            "Scheduler running. Press Ctrl+C to stop."
        );

        let mut passes = 0;
        let mut last_start = Instant::now();
        job.run_pass().await;
        passes += 1;

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let now = Instant::now();
            // An interval past the clock's range is never due.
            let Some(due) = last_start.checked_add(self.interval) else {
                tokio::time::sleep(self.poll).await;
                continue;
            };
            if now >= due {
                last_start = now;
                debug!(pass = passes + 1, "Pass due, starting");
                job.run_pass().await;
                passes += 1;
                continue;
            }

            tokio::time::sleep(self.poll.min(due - now)).await;
        }

        self.state = SchedulerState::Idle;
        info!(passes, "Scheduler stopped");
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the start time of every pass and optionally cancels itself.
    struct RecordingJob {
        starts: Vec<Instant>,
        pass_duration: Duration,
        cancel_after: Option<(usize, CancelHandle)>,
    }

    impl RecordingJob {
        fn new(pass_duration: Duration) -> Self {
            Self {
                starts: Vec::new(),
                pass_duration,
                cancel_after: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl RefreshJob for RecordingJob {
        async fn run_pass(&mut self) {
            self.starts.push(Instant::now());
            if let Some((n, handle)) = &self.cancel_after {
                if self.starts.len() == *n {
                    handle.cancel();
                }
            }
            tokio::time::sleep(self.pass_duration).await;
        }
    }

    fn minutes(n: u64) -> Duration {
        Duration::from_secs(n * 60)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_pass_runs_immediately_then_on_interval() {
        let (handle, signal) = cancellation();
        let mut job = RecordingJob::new(Duration::from_secs(5));
        job.cancel_after = Some((3, handle));
        let mut scheduler = RefreshScheduler::new(minutes(1), Duration::from_secs(1));

        let origin = Instant::now();
        let passes = scheduler.run(&mut job, &signal).await;

        assert_eq!(passes, 3);
        assert_eq!(job.starts[0], origin);
        assert_eq!(job.starts[1] - job.starts[0], minutes(1));
        assert_eq!(job.starts[2] - job.starts[1], minutes(1));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_between_polls_starts_no_new_pass() {
        let (handle, signal) = cancellation();
        let mut job = RecordingJob::new(Duration::from_secs(1));
        let mut scheduler = RefreshScheduler::new(minutes(1), Duration::from_secs(1));

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(90)).await;
            handle.cancel();
        });

        let origin = Instant::now();
        let passes = scheduler.run(&mut job, &signal).await;

        assert_eq!(passes, 2);
        assert_eq!(job.starts[1] - origin, minutes(1));
        // Cancellation is observed within one poll period.
        assert!(Instant::now() - origin <= Duration::from_secs(91));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_pass_completes_after_cancel() {
        let (handle, signal) = cancellation();
        let mut job = RecordingJob::new(Duration::from_secs(30));
        job.cancel_after = Some((2, handle));
        let mut scheduler = RefreshScheduler::new(minutes(1), Duration::from_secs(1));

        let origin = Instant::now();
        let passes = scheduler.run(&mut job, &signal).await;

        assert_eq!(passes, 2);
        // The second pass started at 60s and was allowed to finish its 30s.
        assert!(Instant::now() - origin >= Duration::from_secs(90));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrunning_pass_delays_next_without_overlap() {
        let (handle, signal) = cancellation();
        let mut job = RecordingJob::new(Duration::from_secs(90));
        job.cancel_after = Some((2, handle));
        let mut scheduler = RefreshScheduler::new(minutes(1), Duration::from_secs(1));

        scheduler.run(&mut job, &signal).await;

        // The next pass starts only after the first 90s pass finished.
        assert_eq!(job.starts[1] - job.starts[0], Duration::from_secs(90));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_beyond_clock_range_keeps_polling() {
        let (handle, signal) = cancellation();
        let mut job = RecordingJob::new(Duration::from_secs(1));
        let mut scheduler = RefreshScheduler::new(Duration::MAX, Duration::from_secs(1));

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            handle.cancel();
        });

        let passes = scheduler.run(&mut job, &signal).await;

        assert_eq!(passes, 1);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_runs_nothing() {
        let (handle, signal) = cancellation();
        handle.cancel();
        let mut job = RecordingJob::new(Duration::from_secs(1));
        let mut scheduler = RefreshScheduler::new(minutes(1), Duration::from_secs(1));

        assert_eq!(scheduler.run(&mut job, &signal).await, 0);
        assert!(job.starts.is_empty());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_does_not_cancel() {
        let (handle, signal) = cancellation();
        drop(handle);
        assert!(!signal.is_cancelled());
    }
}
