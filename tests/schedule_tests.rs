use merge_gate::{DateSpec, DayOfWeek, HolidayRule, Interval, Schedule};

mod support;
use support::date;

#[test]
fn default_schedule_blocks_weekday_evenings_christmas_and_nsw_holidays() {
    let schedule = Schedule::default();

    assert_eq!(schedule.weekly.len(), 1);
    let weekly = &schedule.weekly[0];
    assert_eq!(
        weekly.days,
        vec![
            DayOfWeek::Mon,
            DayOfWeek::Tue,
            DayOfWeek::Wed,
            DayOfWeek::Thu,
            DayOfWeek::Fri
        ]
    );
    assert_eq!(
        weekly.intervals,
        vec![Interval::new(0.0, 7.0), Interval::new(16.5, 24.0)]
    );

    assert_eq!(schedule.dates.len(), 1);
    assert_eq!(schedule.dates[0].date, DateSpec::Exact(date(2023, 12, 25)));
    assert_eq!(schedule.dates[0].intervals, vec![Interval::FULL_DAY]);

    assert_eq!(
        schedule.holidays,
        Some(HolidayRule {
            country: "AU".to_string(),
            state: Some("NSW".to_string()),
            intervals: vec![Interval::FULL_DAY],
        })
    );
}

#[test]
fn default_schedule_survives_json() {
    let raw = serde_json::to_string(&Schedule::default()).unwrap();
    assert_eq!(Schedule::from_json(&raw).unwrap(), Schedule::default());
}

#[test]
fn missing_dates_and_holidays_default_to_never_matching() {
    let schedule =
        Schedule::from_json(r#"{"weekly": [{"days": ["sat", "sun"], "intervals": [[0, 24]]}]}"#)
            .unwrap();
    assert!(schedule.dates.is_empty());
    assert!(schedule.holidays.is_none());
    assert_eq!(schedule.rules().count(), 1);
}

#[test]
fn free_form_dates_are_parsed() {
    let schedule = Schedule::from_json(
        r#"{
            "weekly": [],
            "dates": [
                {"date": "December 24, 2024", "intervals": [[12, 24]]},
                {"date": "Jan 1", "intervals": [[0, 24]]},
                {"date": "31st December 2024", "intervals": [[18, 24]]}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(schedule.dates[0].date, DateSpec::Exact(date(2024, 12, 24)));
    assert_eq!(schedule.dates[1].date, DateSpec::Annual { month: 1, day: 1 });
    assert_eq!(schedule.dates[2].date, DateSpec::Exact(date(2024, 12, 31)));
}

#[test]
fn holiday_rule_without_intervals_has_none() {
    let schedule =
        Schedule::from_json(r#"{"weekly": [], "holidays": {"country": "AU"}}"#).unwrap();
    let holidays = schedule.holidays.unwrap();
    assert_eq!(holidays.state, None);
    assert!(holidays.intervals.is_empty());
}

#[test]
fn fractional_hours_keep_their_precision() {
    let schedule = Schedule::from_json(
        r#"{"weekly": [{"days": ["fri"], "intervals": [[12.25, 13.75]]}]}"#,
    )
    .unwrap();
    assert_eq!(schedule.weekly[0].intervals, vec![Interval::new(12.25, 13.75)]);
}
