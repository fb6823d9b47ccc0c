// ── Calendar navigation ──
//
// Find the nearest date, forwards or backwards, that falls on a given day
// of the month and/or weekday. The sign of each argument picks the
// direction; the start date itself counts as a match.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::error::CoreError;

/// Upper bound on single steps taken by [`find_date`].
///
/// Weekly steps cover ~38 years, which is enough for any (day, weekday)
/// pair to recur.
pub const MAX_STEPS: u32 = 2_000;

/// Walk from `from` to the closest date matching `day` and/or `weekday`.
///
/// - `weekday`: 1 (Sunday) ..= 7 (Saturday); negative searches backwards.
///   Once it matches, the search continues a week at a time.
/// - `day`: day of month 1 ..= 31; negative searches backwards. Its sign is
///   only used when no weekday is given.
///
/// With neither argument, `from` is returned unchanged.
pub fn find_date(from: NaiveDate, day: Option<i32>, weekday: Option<i32>) -> Result<NaiveDate, CoreError> {
    let weekday = weekday.map(parse_weekday).transpose()?;
    let day = day.map(parse_day).transpose()?;

    let mut search = Search {
        date: from,
        steps: 0,
    };
    let mut stride = 0;

    if let Some((target, direction)) = weekday {
        while search.date.weekday().num_days_from_sunday() != target {
            search.advance(direction)?;
        }
        stride = direction * 7;
    }

    if let Some((target, direction)) = day {
        if stride == 0 {
            stride = direction;
        }
        while search.date.day() != target {
            search.advance(stride)?;
        }
    }

    Ok(search.date)
}

struct Search {
    date: NaiveDate,
    steps: u32,
}

impl Search {
    fn advance(&mut self, days: i64) -> Result<(), CoreError> {
        self.steps += 1;
        if self.steps > MAX_STEPS {
            return Err(CoreError::DateNotFound { max_steps: MAX_STEPS });
        }
        self.date = self
            .date
            .checked_add_signed(TimeDelta::days(days))
            .ok_or(CoreError::DateOutOfRange)?;
        Ok(())
    }
}

/// Returns the target as days-from-Sunday plus the step direction.
fn parse_weekday(weekday: i32) -> Result<(u32, i64), CoreError> {
    match weekday.unsigned_abs() {
        n @ 1..=7 => Ok((n - 1, direction(weekday))),
        _ => Err(CoreError::InvalidWeekday { weekday }),
    }
}

fn parse_day(day: i32) -> Result<(u32, i64), CoreError> {
    match day.unsigned_abs() {
        n @ 1..=31 => Ok((n, direction(day))),
        _ => Err(CoreError::InvalidDay { day }),
    }
}

fn direction(value: i32) -> i64 {
    if value < 0 { -1 } else { 1 }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(dd_mm_yyyy: &str) -> NaiveDate {
        NaiveDate::parse_from_str(dd_mm_yyyy, "%d/%m/%Y").unwrap()
    }

    fn check(from: &str, day: Option<i32>, weekday: Option<i32>, expected: &str) {
        assert_eq!(
            find_date(date(from), day, weekday).unwrap(),
            date(expected),
            "from {from}, day {day:?}, weekday {weekday:?}"
        );
    }

    #[test]
    fn next_day_of_month() {
        check("05/10/2024", Some(7), None, "07/10/2024");
        check("05/10/2024", Some(4), None, "04/11/2024");
        check("05/11/2024", Some(30), None, "30/11/2024");
        check("05/11/2024", Some(31), None, "31/12/2024");
        check("01/01/2025", Some(29), None, "29/01/2025");
        check("01/02/2025", Some(29), None, "29/03/2025");
    }

    #[test]
    fn previous_day_of_month() {
        check("05/10/2024", Some(-7), None, "07/09/2024");
        check("05/10/2024", Some(-4), None, "04/10/2024");
        check("05/11/2024", Some(-30), None, "30/10/2024");
        check("05/11/2024", Some(-31), None, "31/10/2024");
        check("01/01/2025", Some(-29), None, "29/12/2024");
        check("01/03/2025", Some(-29), None, "29/01/2025");
    }

    #[test]
    fn next_weekday() {
        check("05/10/2024", None, Some(7), "05/10/2024");
        check("05/10/2024", None, Some(6), "11/10/2024");
        check("08/10/2024", None, Some(4), "09/10/2024");
        check("27/10/2024", None, Some(7), "02/11/2024");
    }

    #[test]
    fn previous_weekday() {
        check("05/10/2024", None, Some(-7), "05/10/2024");
        check("05/10/2024", None, Some(-6), "04/10/2024");
        check("08/10/2024", None, Some(-4), "02/10/2024");
        check("06/11/2024", None, Some(-7), "02/11/2024");
    }

    #[test]
    fn next_day_on_weekday() {
        check("05/10/2024", Some(5), Some(7), "05/10/2024");
        check("05/10/2024", Some(8), Some(6), "08/11/2024");
        check("08/10/2024", Some(1), Some(1), "01/12/2024");
        check("27/10/2024", Some(29), Some(7), "29/03/2025");
    }

    #[test]
    fn previous_day_on_weekday() {
        check("05/10/2024", Some(-5), Some(-7), "05/10/2024");
        check("05/10/2024", Some(-8), Some(-6), "08/03/2024");
        check("08/10/2024", Some(-1), Some(-1), "01/09/2024");
        check("27/10/2024", Some(-17), Some(-7), "17/08/2024");
    }

    #[test]
    fn no_criteria_returns_start() {
        check("05/10/2024", None, None, "05/10/2024");
    }

    #[test]
    fn out_of_range_arguments_are_rejected() {
        let from = date("05/10/2024");
        assert_eq!(find_date(from, Some(0), None), Err(CoreError::InvalidDay { day: 0 }));
        assert_eq!(find_date(from, Some(-32), None), Err(CoreError::InvalidDay { day: -32 }));
        assert_eq!(find_date(from, None, Some(8)), Err(CoreError::InvalidWeekday { weekday: 8 }));
        assert_eq!(find_date(from, None, Some(0)), Err(CoreError::InvalidWeekday { weekday: 0 }));
    }

    #[test]
    fn invalid_day_is_reported_before_any_search() {
        let from = date("05/10/2024");
        assert_eq!(find_date(from, Some(40), Some(3)), Err(CoreError::InvalidDay { day: 40 }));
    }

    #[test]
    fn walking_off_the_calendar_is_an_error() {
        assert_eq!(find_date(NaiveDate::MAX, Some(1), None), Err(CoreError::DateOutOfRange));
        assert_eq!(find_date(NaiveDate::MIN, Some(-28), None), Err(CoreError::DateOutOfRange));
    }
}
