use chrono::{DateTime, Local, NaiveDate, Utc};
use std::sync::{Arc, RwLock};

/// Source of "now" for a run. Drives the run timestamp and the calendar date
/// deliveries are stamped with.
pub trait RunClock: std::fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Operating date of the run. Defaults to the UTC date of `now`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub type SharedClock = Arc<dyn RunClock>;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl RunClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Route start times are wall-clock times of the depot, so the date is local too.
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a settable instant, for reproducible runs and tests.
/// Its operating date is the UTC date of that instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant: Arc::new(RwLock::new(instant)) }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        match self.instant.write() {
            Ok(mut guard) => *guard = instant,
            Err(poisoned) => *poisoned.into_inner() = instant,
        }
    }
}

impl RunClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.instant.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
