//! Time source and latency budget helpers.
//!
//! Everything that needs the current time takes a [`Clock`], so tests can
//! substitute a [`ManualClock`] for the wall clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub trait Clock: Send + Sync {
    /// Time elapsed since the UNIX epoch.
    fn now(&self) -> Duration;

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// Clock that only moves when told to. Sleeping advances it immediately.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(as_nanos(start)),
        }
    }

    pub fn set(&self, now: Duration) {
        self.nanos.store(as_nanos(now), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(as_nanos(by), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration)
    }
}

fn as_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Run `f` and return its result together with the time it took.
pub fn measure<C, T>(clock: &C, f: impl FnOnce() -> T) -> (T, Duration)
where
    C: Clock + ?Sized,
{
    let start = clock.now();
    let ret = f();
    (ret, clock.now().saturating_sub(start))
}

/// Run `f`, logging a warning if it takes longer than `limit`.
pub fn timed<C, T>(
    clock: &C,
    limit: Duration,
    desc: &str,
    f: impl FnOnce() -> T,
) -> T
where
    C: Clock + ?Sized,
{
    let (ret, elapsed) = measure(clock, f);
    if elapsed > limit {
        log::warn!("{} took too long: {:.3}s", desc, elapsed.as_secs_f64());
    }
    ret
}

/// Sleep until `interval` has elapsed since `start` and return how long
/// was slept. If the interval is already over, log a warning instead.
pub fn sleep_interval<C>(
    clock: &C,
    start: Duration,
    interval: Duration,
    desc: &str,
) -> Duration
where
    C: Clock + ?Sized,
{
    let now = clock.now();
    match start.saturating_add(interval).checked_sub(now) {
        Some(delay) => {
            clock.sleep(delay);
            delay
        }
        None => {
            log::warn!(
                "{} took too long: {:.3}s (should have been <= {:.3}s)",
                desc,
                now.saturating_sub(start).as_secs_f64(),
                interval.as_secs_f64()
            );
            Duration::ZERO
        }
    }
}
