use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

use super::{
    HolidayError, easter_sunday, insert_pair_with_substitutes, insert_with_substitute,
    nth_weekday, weekday_on_or_before, ymd,
};

/// Federal statutory holidays; provincial days are not included.
pub(super) fn holidays(year: i32) -> Result<HashSet<NaiveDate>, HolidayError> {
    let mut holidays = HashSet::new();
    let easter = easter_sunday(year)?;

    insert_with_substitute(&mut holidays, ymd(year, 1, 1)?);
    holidays.insert(easter - Duration::days(2));

    // Victoria Day, the Monday before 25 May
    holidays.insert(weekday_on_or_before(ymd(year, 5, 24)?, Weekday::Mon));

    // Canada Day moves to 2 July only when it is a Sunday
    let canada_day = ymd(year, 7, 1)?;
    holidays.insert(canada_day);
    if canada_day.weekday() == Weekday::Sun {
        holidays.insert(canada_day + Duration::days(1));
    }

    // Labour Day
    holidays.insert(nth_weekday(year, 9, Weekday::Mon, 1)?);
    // National Day for Truth and Reconciliation
    if year >= 2021 {
        insert_with_substitute(&mut holidays, ymd(year, 9, 30)?);
    }
    // Thanksgiving
    holidays.insert(nth_weekday(year, 10, Weekday::Mon, 2)?);
    // Remembrance Day
    insert_with_substitute(&mut holidays, ymd(year, 11, 11)?);

    insert_pair_with_substitutes(&mut holidays, ymd(year, 12, 25)?);

    Ok(holidays)
}
