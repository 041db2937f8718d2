//! State holidays on top of the federal calendar.
//!
//! Every state and DC is accepted. States without an entry below observe the
//! federal holidays only.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

use super::{HolidayError, last_weekday, nth_weekday, ymd};

const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct UsState(&'static str);

impl UsState {
    pub(super) fn from_code(code: &str) -> Option<Self> {
        STATE_CODES
            .into_iter()
            .find(|known| known.eq_ignore_ascii_case(code))
            .map(UsState)
    }
}

/// Fixed-date holidays falling on a weekend are observed on the nearest weekday.
fn insert_observed(holidays: &mut HashSet<NaiveDate>, date: NaiveDate) {
    holidays.insert(date);
    match date.weekday() {
        Weekday::Sat => {
            holidays.insert(date - Duration::days(1));
        }
        Weekday::Sun => {
            holidays.insert(date + Duration::days(1));
        }
        _ => {}
    }
}

pub(super) fn state_holidays(
    year: i32,
    state: UsState,
) -> Result<HashSet<NaiveDate>, HolidayError> {
    let mut holidays = HashSet::new();
    let day_after_thanksgiving = nth_weekday(year, 11, Weekday::Thu, 4)? + Duration::days(1);

    match state.0 {
        "CA" => {
            // César Chávez Day
            insert_observed(&mut holidays, ymd(year, 3, 31)?);
            holidays.insert(day_after_thanksgiving);
        }
        "TX" => {
            // Texas Independence Day, San Jacinto Day, Lyndon Baines Johnson Day
            holidays.insert(ymd(year, 3, 2)?);
            holidays.insert(ymd(year, 4, 21)?);
            holidays.insert(ymd(year, 8, 27)?);
            holidays.insert(day_after_thanksgiving);
        }
        // Patriots' Day
        "MA" | "ME" => {
            holidays.insert(nth_weekday(year, 4, Weekday::Mon, 3)?);
        }
        // Lincoln's Birthday
        "NY" => insert_observed(&mut holidays, ymd(year, 2, 12)?),
        "IL" => {
            insert_observed(&mut holidays, ymd(year, 2, 12)?);
            holidays.insert(day_after_thanksgiving);
        }
        "HI" => {
            // Prince Jonah Kūhiō Kalanianaʻole Day, King Kamehameha I Day
            insert_observed(&mut holidays, ymd(year, 3, 26)?);
            insert_observed(&mut holidays, ymd(year, 6, 11)?);
            // Statehood Day
            holidays.insert(nth_weekday(year, 8, Weekday::Fri, 3)?);
        }
        "AK" => {
            // Seward's Day
            holidays.insert(last_weekday(year, 3, Weekday::Mon)?);
            insert_observed(&mut holidays, ymd(year, 10, 18)?);
        }
        "WA" => {
            holidays.insert(day_after_thanksgiving);
        }
        // DC Emancipation Day
        "DC" if year >= 2005 => insert_observed(&mut holidays, ymd(year, 4, 16)?),
        _ => {}
    }

    Ok(holidays)
}
