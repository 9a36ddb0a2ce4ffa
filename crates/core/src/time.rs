use std::fmt;

use chrono::{DateTime, Utc};

/// Wall clock used to stamp session start and submissions.
///
/// `Fixed` keeps services and tests deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Whole seconds spent on one question instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Elapsed(u32);

impl Elapsed {
    pub const ZERO: Elapsed = Elapsed(0);

    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn secs(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn hours(self) -> u32 {
        self.0 / 3600
    }

    #[must_use]
    pub const fn minutes(self) -> u32 {
        (self.0 % 3600) / 60
    }

    #[must_use]
    pub const fn seconds(self) -> u32 {
        self.0 % 60
    }

    #[must_use]
    pub fn saturating_inc(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// `H hr M min S sec`; hour and minute segments are dropped when zero.
impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.hours();
        let minutes = self.minutes();
        if hours > 0 {
            write!(f, "{hours} hr ")?;
        }
        if minutes > 0 {
            write!(f, "{minutes} min ")?;
        }
        write!(f, "{} sec", self.seconds())
    }
}

#[must_use]
pub fn format_elapsed(secs: u32) -> String {
    Elapsed::from_secs(secs).to_string()
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
