#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Australia::Sydney;
use merge_gate::{CommentError, CommentOutcome, CommentPoster, HolidayCalendar, HolidayError};
use std::cell::RefCell;

/// Sydney wall-clock time as a UTC instant.
pub fn sydney(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    sydney_with_seconds(y, m, d, h, min, 0)
}

pub fn sydney_with_seconds(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Sydney
        .with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Calendar where exactly the listed dates are holidays, for any jurisdiction.
pub struct FixedHolidays(pub Vec<NaiveDate>);

impl HolidayCalendar for FixedHolidays {
    fn supports(&self, _country: &str, _subdivision: Option<&str>) -> bool {
        true
    }

    fn is_holiday(
        &self,
        _country: &str,
        _subdivision: Option<&str>,
        date: NaiveDate,
    ) -> Result<bool, HolidayError> {
        Ok(self.0.contains(&date))
    }
}

/// Calendar that fails every lookup.
pub struct UnreachableHolidays;

impl HolidayCalendar for UnreachableHolidays {
    fn supports(&self, _country: &str, _subdivision: Option<&str>) -> bool {
        true
    }

    fn is_holiday(
        &self,
        country: &str,
        _subdivision: Option<&str>,
        _date: NaiveDate,
    ) -> Result<bool, HolidayError> {
        Err(HolidayError::UnsupportedJurisdiction(country.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostedComment {
    pub repository: String,
    pub pr_number: u64,
    pub body: String,
}

/// In-memory pull request: `existing` bodies are already on it.
#[derive(Default)]
pub struct RecordingPoster {
    pub existing: Vec<String>,
    pub posted: RefCell<Vec<PostedComment>>,
}

impl RecordingPoster {
    pub fn with_existing(existing: &[&str]) -> Self {
        Self {
            existing: existing.iter().map(|body| body.to_string()).collect(),
            posted: RefCell::default(),
        }
    }

    pub fn posted(&self) -> Vec<PostedComment> {
        self.posted.borrow().clone()
    }
}

impl CommentPoster for RecordingPoster {
    fn post_comment(
        &self,
        repository: &str,
        pr_number: u64,
        body: &str,
        dedupe: bool,
    ) -> Result<CommentOutcome, CommentError> {
        if dedupe && self.existing.iter().any(|existing| existing == body) {
            return Ok(CommentOutcome::SkippedDuplicate);
        }
        self.posted.borrow_mut().push(PostedComment {
            repository: repository.to_string(),
            pr_number,
            body: body.to_string(),
        });
        Ok(CommentOutcome::Created)
    }
}

pub struct FailingPoster;

impl CommentPoster for FailingPoster {
    fn post_comment(
        &self,
        _repository: &str,
        _pr_number: u64,
        _body: &str,
        _dedupe: bool,
    ) -> Result<CommentOutcome, CommentError> {
        Err(CommentError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        })
    }
}
