pub mod config;
pub mod error;
pub mod exemption;
pub mod gate;
pub mod github;
pub mod holidays;
pub mod restriction;
pub mod schedule;
pub mod schedule_validation;

pub use config::{CliArgs, GateConfig, GitHubCredentials};
pub use error::{GateError, GateResult};
pub use exemption::is_exempt;
pub use gate::{Assessment, GateController, Verdict, validate_custom_message};
pub use github::{
    CommentError, CommentOutcome, CommentPoster, GitHubCommentPoster, parse_pull_request_number,
};
pub use holidays::{HolidayCalendar, HolidayError, PublicHolidays};
pub use restriction::{LocalMoment, Rule, find_restriction, is_restricted, validate_timezone};
pub use schedule::{
    DateSpec, DatedRule, DayOfWeek, HolidayRule, Interval, Schedule, WeeklyRule,
};
pub use schedule_validation::{ScheduleValidationError, validate_schedule};
