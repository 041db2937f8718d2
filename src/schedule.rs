use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use crate::error::{GateError, GateResult};
use crate::schedule_validation;

/// Canonical day tokens accepted in `weekly[].days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            DayOfWeek::Mon => "mon",
            DayOfWeek::Tue => "tue",
            DayOfWeek::Wed => "wed",
            DayOfWeek::Thu => "thu",
            DayOfWeek::Fri => "fri",
            DayOfWeek::Sat => "sat",
            DayOfWeek::Sun => "sun",
        }
    }

    /// Monday = 0.
    pub fn index(self) -> u32 {
        Weekday::from(self).num_days_from_monday()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Mon => Weekday::Mon,
            DayOfWeek::Tue => Weekday::Tue,
            DayOfWeek::Wed => Weekday::Wed,
            DayOfWeek::Thu => Weekday::Thu,
            DayOfWeek::Fri => Weekday::Fri,
            DayOfWeek::Sat => Weekday::Sat,
            DayOfWeek::Sun => Weekday::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Half-open time-of-day range `[start, end)` in fractional hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub const FULL_DAY: Interval = Interval::new(0.0, 24.0);

    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: f64) -> bool {
        self.start <= hour && hour < self.end
    }
}

impl From<(f64, f64)> for Interval {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

impl From<Interval> for (f64, f64) {
    fn from(interval: Interval) -> Self {
        (interval.start, interval.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised date '{0}'")]
pub struct DateSpecError(String);

/// Parsed form of a dated rule's `date` string.
///
/// Strings carrying a year pin a single calendar date. Year-less strings such
/// as `12-25` or `Dec 25` recur on that month and day every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSpec {
    Exact(NaiveDate),
    Annual { month: u32, day: u32 },
}

static ORDINAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("ordinal pattern compiles")
});

impl DateSpec {
    // Month-first before day-first, so `05/06/2024` is 6 May.
    const DATE_FORMATS: &'static [&'static str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y.%m.%d",
        "%m/%d/%Y",
        "%d/%m/%Y",
        "%m-%d-%Y",
        "%d-%m-%Y",
        "%d.%m.%Y",
        "%d %B %Y",
        "%d %b %Y",
        "%d %B, %Y",
        "%d %b, %Y",
        "%B %d %Y",
        "%b %d %Y",
        "%B %d, %Y",
        "%b %d, %Y",
        "%A, %B %d, %Y",
        "%a, %d %b %Y",
    ];

    const DATETIME_FORMATS: &'static [&'static str] =
        &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

    const ANNUAL_FORMATS: &'static [&'static str] = &[
        "%m-%d", "%m/%d", "%d/%m", "%B %d", "%b %d", "%d %B", "%d %b",
    ];

    // Leap year so that an annual Feb 29 is representable.
    const ANNUAL_PROBE_YEAR: i32 = 2000;

    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            DateSpec::Exact(exact) => exact == date,
            DateSpec::Annual { month, day } => date.month() == month && date.day() == day,
        }
    }

    fn parse_exact(raw: &str) -> Option<NaiveDate> {
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(stamp.date_naive());
        }
        Self::DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|stamp| stamp.date())
            .or_else(|| Self::parse_compact(raw))
            .or_else(|| {
                Self::DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            })
    }

    /// `YYYYMMDD` without separators.
    fn parse_compact(raw: &str) -> Option<NaiveDate> {
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year = raw[..4].parse().ok()?;
        let month = raw[4..6].parse().ok()?;
        let day = raw[6..].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn parse_annual(raw: &str) -> Option<(u32, u32)> {
        let probe = format!("{raw} {}", Self::ANNUAL_PROBE_YEAR);
        Self::ANNUAL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&probe, &format!("{fmt} %Y")).ok())
            .map(|date| (date.month(), date.day()))
    }
}

impl FromStr for DateSpec {
    type Err = DateSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = ORDINAL_SUFFIX.replace_all(s.trim(), "$1");
        let raw: &str = &normalized;
        if let Some(date) = Self::parse_exact(raw) {
            return Ok(DateSpec::Exact(date));
        }
        Self::parse_annual(raw)
            .map(|(month, day)| DateSpec::Annual { month, day })
            .ok_or_else(|| DateSpecError(s.to_string()))
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSpec::Exact(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateSpec::Annual { month, day } => write!(f, "{month:02}-{day:02}"),
        }
    }
}

impl Serialize for DateSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRule {
    pub days: Vec<DayOfWeek>,
    pub intervals: Vec<Interval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRule {
    pub date: DateSpec,
    pub intervals: Vec<Interval>,
}

/// Restricts every public holiday of one jurisdiction during `intervals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayRule {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub intervals: Vec<Interval>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub weekly: Vec<WeeklyRule>,
    #[serde(default)]
    pub dates: Vec<DatedRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<HolidayRule>,
}

impl Default for Schedule {
    /// Weekdays before 07:00 and from 16:30, Christmas Day 2023, and NSW
    /// public holidays.
    fn default() -> Self {
        Self {
            weekly: vec![WeeklyRule {
                days: vec![
                    DayOfWeek::Mon,
                    DayOfWeek::Tue,
                    DayOfWeek::Wed,
                    DayOfWeek::Thu,
                    DayOfWeek::Fri,
                ],
                intervals: vec![Interval::new(0.0, 7.0), Interval::new(16.5, 24.0)],
            }],
            dates: vec![DatedRule {
                date: DateSpec::Exact(
                    NaiveDate::from_ymd_opt(2023, 12, 25).expect("valid calendar date"),
                ),
                intervals: vec![Interval::FULL_DAY],
            }],
            holidays: Some(HolidayRule {
                country: "AU".to_string(),
                state: Some("NSW".to_string()),
                intervals: vec![Interval::FULL_DAY],
            }),
        }
    }
}

impl Schedule {
    /// Parses, validates and deserializes a restricted-times JSON document.
    pub fn from_json(raw: &str) -> GateResult<Self> {
        let document: serde_json::Value =
            serde_json::from_str(raw).map_err(|err| parse_error(raw, err))?;
        schedule_validation::validate_schedule(&document).map_err(|err| parse_error(raw, err))?;
        serde_json::from_value(document).map_err(|err| parse_error(raw, err))
    }
}

fn parse_error<E>(raw: &str, source: E) -> GateError
where
    E: std::error::Error + Send + Sync + 'static,
{
    GateError::configuration_with_source(format!("Error parsing restricted times {raw}"), source)
}
