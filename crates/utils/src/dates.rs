//! Date parsing.

use chrono::{DateTime, NaiveDateTime};
use tercile_primitives::Date;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Days between 0001-01-01 (day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parse a date written in one of the accepted encodings.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`, `YYYYMMDD`, an ISO date-time with or
/// without fractional seconds, and an RFC 3339 timestamp (whose date part is kept).
#[must_use]
pub fn parse_date(s: &str) -> Option<Date> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| Date::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Interpret an integer such as `20140630` as a date.
#[must_use]
pub fn date_from_yyyymmdd(value: i64) -> Option<Date> {
    let year = i32::try_from(value / 10_000).ok()?;
    let month = u32::try_from((value / 100) % 100).ok()?;
    let day = u32::try_from(value % 100).ok()?;
    Date::from_ymd_opt(year, month, day)
}

/// Convert days since 1970-01-01 into a date.
#[must_use]
pub fn date_from_epoch_days(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[rstest]
    #[case("2014-06-30")]
    #[case("2014/06/30")]
    #[case("06/30/2014")]
    #[case("20140630")]
    #[case("2014-06-30T00:00:00")]
    #[case("2014-06-30 16:00:00.000")]
    #[case("2014-06-30T00:00:00+00:00")]
    #[case("  2014-06-30 ")]
    fn accepted_encodings(#[case] input: &str) {
        assert_eq!(parse_date(input), Some(d(2014, 6, 30)));
    }

    #[rstest]
    #[case("")]
    #[case("not a date")]
    #[case("2014-13-01")]
    #[case("2014-02-30")]
    fn rejected_inputs(#[case] input: &str) {
        assert_eq!(parse_date(input), None);
    }

    #[test]
    fn integer_dates() {
        assert_eq!(date_from_yyyymmdd(20_001_231), Some(d(2000, 12, 31)));
        assert_eq!(date_from_yyyymmdd(20_001_331), None);
        assert_eq!(date_from_yyyymmdd(-5), None);
    }

    #[test]
    fn epoch_days() {
        assert_eq!(date_from_epoch_days(0), Some(d(1970, 1, 1)));
        assert_eq!(date_from_epoch_days(16_436), Some(d(2015, 1, 1)));
    }
}
