use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

use super::{HolidayError, easter_sunday, last_weekday, nth_weekday, ymd};

pub(super) fn holidays(year: i32) -> Result<HashSet<NaiveDate>, HolidayError> {
    let mut holidays = HashSet::new();
    let easter = easter_sunday(year)?;

    holidays.insert(ymd(year, 1, 1)?);

    // St Brigid's Day: first Monday of February, or 1 February when that is a Friday
    if year >= 2023 {
        let first = ymd(year, 2, 1)?;
        holidays.insert(if first.weekday() == Weekday::Fri {
            first
        } else {
            nth_weekday(year, 2, Weekday::Mon, 1)?
        });
    }

    holidays.insert(ymd(year, 3, 17)?);
    if year == 2022 {
        holidays.insert(ymd(year, 3, 18)?);
    }
    holidays.insert(easter + Duration::days(1));

    // May, June and August bank holidays, October bank holiday
    holidays.insert(nth_weekday(year, 5, Weekday::Mon, 1)?);
    holidays.insert(nth_weekday(year, 6, Weekday::Mon, 1)?);
    holidays.insert(nth_weekday(year, 8, Weekday::Mon, 1)?);
    holidays.insert(last_weekday(year, 10, Weekday::Mon)?);

    // Christmas Day, St Stephen's Day
    holidays.insert(ymd(year, 12, 25)?);
    holidays.insert(ymd(year, 12, 26)?);

    Ok(holidays)
}
