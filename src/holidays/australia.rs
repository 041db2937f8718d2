use chrono::{Duration, NaiveDate, Weekday};
use std::collections::HashSet;

use super::{
    HolidayError, easter_sunday, insert_pair_with_substitutes, insert_with_substitute,
    last_weekday, monday_after_weekend, nth_weekday, weekday_on_or_after, ymd,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AuState {
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
    Act,
    Nt,
}

impl AuState {
    pub(super) fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "NSW" => Some(AuState::Nsw),
            "VIC" => Some(AuState::Vic),
            "QLD" => Some(AuState::Qld),
            "SA" => Some(AuState::Sa),
            "WA" => Some(AuState::Wa),
            "TAS" => Some(AuState::Tas),
            "ACT" => Some(AuState::Act),
            "NT" => Some(AuState::Nt),
            _ => None,
        }
    }
}

pub(super) fn holidays(
    year: i32,
    state: Option<AuState>,
) -> Result<HashSet<NaiveDate>, HolidayError> {
    use AuState::*;

    let mut holidays = HashSet::new();
    let easter = easter_sunday(year)?;

    insert_with_substitute(&mut holidays, ymd(year, 1, 1)?);

    // Australia Day moves to Monday
    let australia_day = ymd(year, 1, 26)?;
    holidays.insert(monday_after_weekend(australia_day).unwrap_or(australia_day));

    // Good Friday, Easter Monday
    holidays.insert(easter - Duration::days(2));
    holidays.insert(easter + Duration::days(1));

    let anzac_day = ymd(year, 4, 25)?;
    if state == Some(Wa) {
        insert_with_substitute(&mut holidays, anzac_day);
    } else {
        holidays.insert(anzac_day);
    }

    insert_pair_with_substitutes(&mut holidays, ymd(year, 12, 25)?);

    let Some(state) = state else {
        return Ok(holidays);
    };

    if matches!(state, Nsw | Vic | Qld | Sa | Act | Nt) {
        holidays.insert(easter - Duration::days(1));
    }
    if matches!(state, Nsw | Vic | Qld | Act | Wa) {
        holidays.insert(easter);
    }

    // Sovereign's Birthday
    holidays.insert(match state {
        Qld => nth_weekday(year, 10, Weekday::Mon, 1)?,
        Wa => last_weekday(year, 9, Weekday::Mon)?,
        _ => nth_weekday(year, 6, Weekday::Mon, 2)?,
    });

    // Labour Day (Eight Hours Day in Tasmania, May Day in the NT)
    holidays.insert(match state {
        Nsw | Act | Sa => nth_weekday(year, 10, Weekday::Mon, 1)?,
        Vic | Tas => nth_weekday(year, 3, Weekday::Mon, 2)?,
        Qld | Nt => nth_weekday(year, 5, Weekday::Mon, 1)?,
        Wa => nth_weekday(year, 3, Weekday::Mon, 1)?,
    });

    match state {
        // Melbourne Cup
        Vic => {
            holidays.insert(nth_weekday(year, 11, Weekday::Tue, 1)?);
        }
        // Adelaide Cup
        Sa => {
            holidays.insert(nth_weekday(year, 3, Weekday::Mon, 2)?);
        }
        // Western Australia Day
        Wa => {
            holidays.insert(nth_weekday(year, 6, Weekday::Mon, 1)?);
        }
        Act => {
            // Canberra Day
            holidays.insert(nth_weekday(year, 3, Weekday::Mon, 2)?);
            // Reconciliation Day, first Monday on or after 27 May
            if year >= 2018 {
                holidays.insert(weekday_on_or_after(ymd(year, 5, 27)?, Weekday::Mon));
            }
        }
        // Picnic Day
        Nt => {
            holidays.insert(nth_weekday(year, 8, Weekday::Mon, 1)?);
        }
        Nsw | Qld | Tas => {}
    }

    Ok(holidays)
}
