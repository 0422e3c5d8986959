//! Mapping from return dates to reporting periods.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tercile_primitives::{Date, Period};

/// Decides which reporting period's membership applies to a return on a given date.
pub trait PeriodMapping: Send + Sync {
    /// Period for `date`, or `None` if the date cannot be mapped.
    fn period_of(&self, date: Date) -> Option<Period>;
}

/// A return dated in year `Y` uses membership from period `Y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarYear;

impl PeriodMapping for CalendarYear {
    fn period_of(&self, date: Date) -> Option<Period> {
        Some(Period::of_date(date))
    }
}

/// Fiscal years ending in `end_month`; months after it belong to the next fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    end_month: u32,
}

impl FiscalYear {
    /// Create a fiscal-year mapping, `None` unless `end_month` is in 1..=12.
    #[must_use]
    pub fn new(end_month: u32) -> Option<Self> {
        (1..=12).contains(&end_month).then_some(Self { end_month })
    }

    /// Month the fiscal year ends in.
    #[must_use]
    pub const fn end_month(&self) -> u32 {
        self.end_month
    }
}

impl PeriodMapping for FiscalYear {
    fn period_of(&self, date: Date) -> Option<Period> {
        let year = if date.month() > self.end_month { date.year() + 1 } else { date.year() };
        Some(Period(year))
    }
}
