use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;
use tracing::debug;

use crate::error::{GateError, GateResult};
use crate::holidays::{HolidayCalendar, HolidayError};
use crate::schedule::{DatedRule, DayOfWeek, HolidayRule, Interval, Schedule, WeeklyRule};

pub fn validate_timezone(name: &str) -> GateResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| GateError::InvalidTimezone(name.to_string()))
}

/// Time of day as `hour + minute / 60`; seconds are not part of it.
pub fn fractional_hour(hour: u32, minute: u32) -> f64 {
    f64::from(hour) + f64::from(minute) / 60.0
}

/// An instant as seen on the wall clock of the target timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalMoment {
    pub date: NaiveDate,
    pub day: DayOfWeek,
    pub hour: f64,
}

impl LocalMoment {
    pub fn new(instant: DateTime<Utc>, timezone: Tz) -> Self {
        let local = instant.with_timezone(&timezone);
        Self {
            date: local.date_naive(),
            day: local.weekday().into(),
            hour: fractional_hour(local.hour(), local.minute()),
        }
    }
}

fn covers(intervals: &[Interval], hour: f64) -> bool {
    intervals.iter().any(|interval| interval.contains(hour))
}

/// One schedule rule, tagged by kind. Kinds are tried weekly, dated, holiday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule<'a> {
    Weekly(&'a WeeklyRule),
    Dated(&'a DatedRule),
    Holiday(&'a HolidayRule),
}

impl Rule<'_> {
    pub fn matches<H>(&self, moment: &LocalMoment, calendar: &H) -> Result<bool, HolidayError>
    where
        H: HolidayCalendar + ?Sized,
    {
        match self {
            Rule::Weekly(rule) => {
                Ok(rule.days.contains(&moment.day) && covers(&rule.intervals, moment.hour))
            }
            Rule::Dated(rule) => {
                Ok(rule.date.matches(moment.date) && covers(&rule.intervals, moment.hour))
            }
            Rule::Holiday(rule) => {
                if !covers(&rule.intervals, moment.hour) {
                    return Ok(false);
                }
                calendar.is_holiday(&rule.country, rule.state.as_deref(), moment.date)
            }
        }
    }
}

impl fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Weekly(rule) => {
                let days = rule
                    .days
                    .iter()
                    .map(|day| day.token())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "weekly rule [{days}]")
            }
            Rule::Dated(rule) => write!(f, "dated rule {}", rule.date),
            Rule::Holiday(rule) => match &rule.state {
                Some(state) => write!(f, "holiday rule {}/{}", rule.country, state),
                None => write!(f, "holiday rule {}", rule.country),
            },
        }
    }
}

impl Schedule {
    /// Every rule in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = Rule<'_>> {
        self.weekly
            .iter()
            .map(Rule::Weekly)
            .chain(self.dates.iter().map(Rule::Dated))
            .chain(self.holidays.iter().map(Rule::Holiday))
    }
}

/// First rule restricting `instant`, if any.
pub fn find_restriction<'a, H>(
    timezone: Tz,
    schedule: &'a Schedule,
    calendar: &H,
    instant: DateTime<Utc>,
) -> GateResult<Option<Rule<'a>>>
where
    H: HolidayCalendar + ?Sized,
{
    let moment = LocalMoment::new(instant, timezone);
    for rule in schedule.rules() {
        if rule.matches(&moment, calendar)? {
            debug!(
                %rule,
                local_date = %moment.date,
                local_hour = moment.hour,
                "restriction rule matched"
            );
            return Ok(Some(rule));
        }
    }
    debug!(local_date = %moment.date, local_hour = moment.hour, "no restriction rule matched");
    Ok(None)
}

/// Whether `instant` (default: now, sampled once) falls in a restricted window.
pub fn is_restricted<H>(
    timezone: Tz,
    schedule: &Schedule,
    calendar: &H,
    instant: Option<DateTime<Utc>>,
) -> GateResult<bool>
where
    H: HolidayCalendar + ?Sized,
{
    let instant = instant.unwrap_or_else(Utc::now);
    Ok(find_restriction(timezone, schedule, calendar, instant)?.is_some())
}
