use chrono::{Duration, NaiveDate, Weekday};
use std::collections::HashSet;

use super::{
    HolidayError, easter_sunday, insert_pair_with_substitutes, insert_with_substitute,
    nth_weekday, ymd,
};

/// Matariki dates as set by the Te Kāhui o Matariki Public Holiday Act.
const MATARIKI: [(i32, u32, u32); 9] = [
    (2022, 6, 24),
    (2023, 7, 14),
    (2024, 6, 28),
    (2025, 6, 20),
    (2026, 7, 10),
    (2027, 6, 25),
    (2028, 7, 14),
    (2029, 7, 6),
    (2030, 6, 21),
];

/// National holidays; regional anniversary days are not included.
pub(super) fn holidays(year: i32) -> Result<HashSet<NaiveDate>, HolidayError> {
    let mut holidays = HashSet::new();
    let easter = easter_sunday(year)?;

    insert_pair_with_substitutes(&mut holidays, ymd(year, 1, 1)?);

    // Waitangi Day and Anzac Day are Mondayised from 2014
    for (month, day) in [(2, 6), (4, 25)] {
        let date = ymd(year, month, day)?;
        if year >= 2014 {
            insert_with_substitute(&mut holidays, date);
        } else {
            holidays.insert(date);
        }
    }

    holidays.insert(easter - Duration::days(2));
    holidays.insert(easter + Duration::days(1));

    // Sovereign's Birthday
    holidays.insert(nth_weekday(year, 6, Weekday::Mon, 1)?);

    // TODO: extend the Matariki table to 2052 from the Act's schedule.
    for (y, m, d) in MATARIKI {
        if y == year {
            holidays.insert(ymd(y, m, d)?);
        }
    }

    // Labour Day
    holidays.insert(nth_weekday(year, 10, Weekday::Mon, 4)?);

    insert_pair_with_substitutes(&mut holidays, ymd(year, 12, 25)?);

    Ok(holidays)
}
