//! Public-holiday reference data.
//!
//! The evaluator only needs a yes/no answer per (jurisdiction, date), so the
//! calendar sits behind [`HolidayCalendar`] and tests can swap in fixed data.

mod australia;
mod canada;
mod ireland;
mod new_zealand;
mod united_kingdom;
mod united_states;

use bdays::HolidayCalendar as BusinessCalendar;
use bdays::calendars::brazil::BRSettlement;
use bdays::calendars::us::USSettlement;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;
use thiserror::Error;

use australia::AuState;
use united_kingdom::UkNation;
use united_states::UsState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HolidayError {
    #[error("unsupported holiday jurisdiction '{0}'")]
    UnsupportedJurisdiction(String),
    #[error("holidays cannot be computed for year {0}")]
    YearOutOfRange(i32),
}

pub trait HolidayCalendar {
    /// Whether `country` (ISO code) and the optional subdivision are known.
    fn supports(&self, country: &str, subdivision: Option<&str>) -> bool;

    fn is_holiday(
        &self,
        country: &str,
        subdivision: Option<&str>,
        date: NaiveDate,
    ) -> Result<bool, HolidayError>;
}

/// Built-in calendar covering Australia and its states, the United States and
/// its states, the United Kingdom and its nations, Ireland, New Zealand,
/// Canada and Brazil.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicHolidays;

impl HolidayCalendar for PublicHolidays {
    fn supports(&self, country: &str, subdivision: Option<&str>) -> bool {
        Jurisdiction::resolve(country, subdivision).is_ok()
    }

    fn is_holiday(
        &self,
        country: &str,
        subdivision: Option<&str>,
        date: NaiveDate,
    ) -> Result<bool, HolidayError> {
        let year = date.year();
        let holidays = match Jurisdiction::resolve(country, subdivision)? {
            Jurisdiction::Australia(state) => australia::holidays(year, state)?,
            Jurisdiction::UnitedStates(state) => {
                if USSettlement.is_holiday(date) {
                    return Ok(true);
                }
                match state {
                    Some(state) => united_states::state_holidays(year, state)?,
                    None => return Ok(false),
                }
            }
            Jurisdiction::UnitedKingdom(nation) => united_kingdom::holidays(year, nation)?,
            Jurisdiction::Ireland => ireland::holidays(year)?,
            Jurisdiction::NewZealand => new_zealand::holidays(year)?,
            Jurisdiction::Canada => canada::holidays(year)?,
            Jurisdiction::Brazil => return Ok(BRSettlement.is_holiday(date)),
        };
        Ok(holidays.contains(&date))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Jurisdiction {
    Australia(Option<AuState>),
    UnitedStates(Option<UsState>),
    UnitedKingdom(Option<UkNation>),
    Ireland,
    NewZealand,
    Canada,
    Brazil,
}

impl Jurisdiction {
    fn resolve(country: &str, subdivision: Option<&str>) -> Result<Self, HolidayError> {
        let subdivision = subdivision.map(str::trim).filter(|s| !s.is_empty());
        let unsupported = || {
            let name = match subdivision {
                Some(sub) => format!("{country}/{sub}"),
                None => country.to_string(),
            };
            HolidayError::UnsupportedJurisdiction(name)
        };

        let country = country.trim().to_ascii_uppercase();
        match (country.as_str(), subdivision) {
            ("AU" | "AUS", None) => Ok(Jurisdiction::Australia(None)),
            ("AU" | "AUS", Some(code)) => AuState::from_code(code)
                .map(|state| Jurisdiction::Australia(Some(state)))
                .ok_or_else(unsupported),
            ("US" | "USA", None) => Ok(Jurisdiction::UnitedStates(None)),
            ("US" | "USA", Some(code)) => UsState::from_code(code)
                .map(|state| Jurisdiction::UnitedStates(Some(state)))
                .ok_or_else(unsupported),
            ("GB" | "GBR" | "UK", None) => Ok(Jurisdiction::UnitedKingdom(None)),
            ("GB" | "GBR" | "UK", Some(code)) => UkNation::from_code(code)
                .map(|nation| Jurisdiction::UnitedKingdom(Some(nation)))
                .ok_or_else(unsupported),
            ("IE" | "IRL", None) => Ok(Jurisdiction::Ireland),
            ("NZ" | "NZL", None) => Ok(Jurisdiction::NewZealand),
            ("CA" | "CAN", None) => Ok(Jurisdiction::Canada),
            ("BR" | "BRA", None) => Ok(Jurisdiction::Brazil),
            _ => Err(unsupported()),
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, HolidayError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(HolidayError::YearOutOfRange(year))
}

fn easter_sunday(year: i32) -> Result<NaiveDate, HolidayError> {
    bdays::easter::easter_naive_date(year).map_err(|_| HolidayError::YearOutOfRange(year))
}

fn monday_after_weekend(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => Some(date + Duration::days(2)),
        Weekday::Sun => Some(date + Duration::days(1)),
        _ => None,
    }
}

/// The day itself plus, when it lands on a weekend, the following Monday.
fn insert_with_substitute(holidays: &mut HashSet<NaiveDate>, date: NaiveDate) {
    holidays.insert(date);
    holidays.extend(monday_after_weekend(date));
}

/// Two consecutive holidays (Christmas and Boxing Day, New Year and 2
/// January) with the substitute weekdays used when either lands on a weekend.
fn insert_pair_with_substitutes(holidays: &mut HashSet<NaiveDate>, first: NaiveDate) {
    holidays.insert(first);
    holidays.insert(first + Duration::days(1));

    match first.weekday() {
        Weekday::Fri => {
            holidays.insert(first + Duration::days(3));
        }
        Weekday::Sat => {
            holidays.insert(first + Duration::days(2));
            holidays.insert(first + Duration::days(3));
        }
        Weekday::Sun => {
            holidays.insert(first + Duration::days(2));
        }
        _ => {}
    }
}

fn weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let offset = (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(offset))
}

fn weekday_on_or_before(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(offset))
}

/// The nth occurrence of a weekday in a month
fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Result<NaiveDate, HolidayError> {
    let first = weekday_on_or_after(ymd(year, month, 1)?, weekday);
    Ok(first + Duration::weeks(i64::from(n.saturating_sub(1))))
}

/// The last occurrence of a weekday in a month
fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Result<NaiveDate, HolidayError> {
    let next_month = if month == 12 {
        ymd(year + 1, 1, 1)?
    } else {
        ymd(year, month + 1, 1)?
    };
    Ok(weekday_on_or_before(next_month - Duration::days(1), weekday))
}
