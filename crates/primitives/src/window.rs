//! Named sub-sample windows.

use serde::{Deserialize, Serialize};

use crate::Date;

/// Half-open date interval `[start, end)` with an optional bound on either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// Window name used in reports.
    pub name: String,
    /// First date included.
    #[serde(default)]
    pub start: Option<Date>,
    /// First date excluded.
    #[serde(default)]
    pub end: Option<Date>,
}

impl SampleWindow {
    /// Create a new window.
    #[must_use]
    pub fn new(name: impl Into<String>, start: Option<Date>, end: Option<Date>) -> Self {
        Self { name: name.into(), start, end }
    }

    /// Unbounded window.
    #[must_use]
    pub fn full() -> Self {
        Self::new("full", None, None)
    }

    /// 2001-01-01 up to, not including, 2016-01-01.
    #[must_use]
    pub fn in_sample() -> Self {
        Self::new("in_sample", Date::from_ymd_opt(2001, 1, 1), Date::from_ymd_opt(2016, 1, 1))
    }

    /// 2016-01-01 onwards.
    #[must_use]
    pub fn out_of_sample() -> Self {
        Self::new("out_of_sample", Date::from_ymd_opt(2016, 1, 1), None)
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date < e)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[rstest]
    #[case(d(2000, 12, 31), false)]
    #[case(d(2001, 1, 1), true)]
    #[case(d(2015, 12, 31), true)]
    #[case(d(2016, 1, 1), false)]
    fn in_sample_bounds(#[case] date: Date, #[case] inside: bool) {
        assert_eq!(SampleWindow::in_sample().contains(date), inside);
    }

    #[test]
    fn out_of_sample_starts_at_cutoff() {
        let w = SampleWindow::out_of_sample();
        assert!(w.contains(d(2016, 1, 1)));
        assert!(w.contains(d(2030, 6, 1)));
        assert!(!w.contains(d(2015, 12, 31)));
    }

    #[test]
    fn full_contains_everything() {
        assert!(SampleWindow::full().contains(d(1900, 1, 1)));
    }
}
