use chrono::{Duration, NaiveDate, Weekday};
use std::collections::HashSet;

use super::{
    HolidayError, easter_sunday, insert_pair_with_substitutes, insert_with_substitute,
    last_weekday, nth_weekday, ymd,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UkNation {
    England,
    Wales,
    Scotland,
    NorthernIreland,
}

impl UkNation {
    pub(super) fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "ENG" => Some(UkNation::England),
            "WLS" => Some(UkNation::Wales),
            "SCT" => Some(UkNation::Scotland),
            "NIR" => Some(UkNation::NorthernIreland),
            _ => None,
        }
    }
}

/// Bank holidays proclaimed for a single year.
const ONE_OFF: [(i32, u32, u32); 6] = [
    (2002, 6, 3),  // Golden Jubilee
    (2011, 4, 29), // Royal wedding
    (2012, 6, 5),  // Diamond Jubilee
    (2022, 6, 3),  // Platinum Jubilee
    (2022, 9, 19), // State funeral
    (2023, 5, 8),  // Coronation
];

/// Without a nation only the days shared by all four are included.
pub(super) fn holidays(
    year: i32,
    nation: Option<UkNation>,
) -> Result<HashSet<NaiveDate>, HolidayError> {
    use UkNation::*;

    let mut holidays = HashSet::new();
    let easter = easter_sunday(year)?;

    if nation == Some(Scotland) {
        insert_pair_with_substitutes(&mut holidays, ymd(year, 1, 1)?);
    } else {
        insert_with_substitute(&mut holidays, ymd(year, 1, 1)?);
    }

    holidays.insert(easter - Duration::days(2));

    // Early May bank holiday, moved to VE Day in 1995 and 2020
    holidays.insert(match year {
        1995 | 2020 => ymd(year, 5, 8)?,
        _ => nth_weekday(year, 5, Weekday::Mon, 1)?,
    });

    // Spring bank holiday, moved for the jubilees
    holidays.insert(match year {
        2002 | 2012 => ymd(year, 6, 4)?,
        2022 => ymd(year, 6, 2)?,
        _ => last_weekday(year, 5, Weekday::Mon)?,
    });

    insert_pair_with_substitutes(&mut holidays, ymd(year, 12, 25)?);

    for (y, m, d) in ONE_OFF {
        if y == year {
            holidays.insert(ymd(y, m, d)?);
        }
    }

    let Some(nation) = nation else {
        return Ok(holidays);
    };

    if nation != Scotland {
        holidays.insert(easter + Duration::days(1));
    }

    // Summer bank holiday
    holidays.insert(match nation {
        Scotland => nth_weekday(year, 8, Weekday::Mon, 1)?,
        England | Wales | NorthernIreland => last_weekday(year, 8, Weekday::Mon)?,
    });

    match nation {
        // St Andrew's Day
        Scotland if year >= 2007 => insert_with_substitute(&mut holidays, ymd(year, 11, 30)?),
        NorthernIreland => {
            // St Patrick's Day, Battle of the Boyne
            insert_with_substitute(&mut holidays, ymd(year, 3, 17)?);
            insert_with_substitute(&mut holidays, ymd(year, 7, 12)?);
        }
        _ => {}
    }

    Ok(holidays)
}
