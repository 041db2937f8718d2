use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::config::GateConfig;
use crate::error::{GateError, GateResult};
use crate::exemption::is_exempt;
use crate::github::{CommentOutcome, CommentPoster, parse_pull_request_number};
use crate::holidays::HolidayCalendar;
use crate::restriction::{find_restriction, validate_timezone};
use crate::schedule::Schedule;

/// Outcome of evaluating the schedule and the exemption, before any side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Allowed,
    Exempt,
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Exempt,
    Blocked {
        pr_number: u64,
        comment: CommentOutcome,
    },
}

impl Verdict {
    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Allowed | Verdict::Exempt => 0,
            Verdict::Blocked { .. } => 1,
        }
    }
}

pub fn validate_custom_message(message: &str) -> GateResult<()> {
    if message.trim().is_empty() {
        return Err(GateError::configuration(
            "Custom message cannot be an empty string.",
        ));
    }
    Ok(())
}

/// A validated configuration, ready to decide one merge attempt.
#[derive(Debug, Clone)]
pub struct GateController {
    timezone: Tz,
    schedule: Schedule,
    pr_title: String,
    custom_message: String,
    check_existing_comment: bool,
    github_ref: Option<String>,
    repository: Option<String>,
}

impl GateController {
    pub fn from_config<H>(config: &GateConfig, calendar: &H) -> GateResult<Self>
    where
        H: HolidayCalendar + ?Sized,
    {
        let timezone = validate_timezone(&config.timezone)?;

        let schedule = match config.restricted_times.as_deref() {
            Some(raw) => Schedule::from_json(raw)?,
            None => Schedule::default(),
        };
        if let Some(rule) = &schedule.holidays {
            if !calendar.supports(&rule.country, rule.state.as_deref()) {
                return Err(GateError::configuration(format!(
                    "Unsupported holiday jurisdiction in restricted times: country '{}', state '{}'",
                    rule.country,
                    rule.state.as_deref().unwrap_or("")
                )));
            }
        }

        validate_custom_message(&config.custom_message)?;
        debug!(%timezone, rules = schedule.rules().count(), "gate configuration validated");

        Ok(Self {
            timezone,
            schedule,
            pr_title: config.pr_title.clone(),
            custom_message: config.custom_message.clone(),
            check_existing_comment: config.check_existing_comment,
            github_ref: config.github_ref.clone(),
            repository: config.repository.clone(),
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn assess<H>(&self, calendar: &H, instant: DateTime<Utc>) -> GateResult<Assessment>
    where
        H: HolidayCalendar + ?Sized,
    {
        let Some(rule) = find_restriction(self.timezone, &self.schedule, calendar, instant)?
        else {
            info!(%instant, "outside restricted windows");
            return Ok(Assessment::Allowed);
        };

        info!(%instant, %rule, "inside a restricted window");
        if is_exempt(&self.pr_title) {
            info!(title = %self.pr_title, "hotfix exemption applies");
            return Ok(Assessment::Exempt);
        }
        Ok(Assessment::Restricted)
    }

    /// Comments on the pull request named by the configured ref.
    pub fn block<P>(&self, poster: &P) -> GateResult<Verdict>
    where
        P: CommentPoster + ?Sized,
    {
        let reference = self.github_ref.as_deref().ok_or_else(|| {
            GateError::configuration("GITHUB_REF is not set; cannot tell which pull request to comment on.")
        })?;
        let pr_number = parse_pull_request_number(reference)?;
        let repository = self.repository.as_deref().ok_or_else(|| {
            GateError::configuration("GITHUB_REPOSITORY is not set; cannot tell where to comment.")
        })?;

        let comment = poster.post_comment(
            repository,
            pr_number,
            &self.custom_message,
            self.check_existing_comment,
        )?;
        Ok(Verdict::Blocked { pr_number, comment })
    }

    pub fn decide<H, P>(
        &self,
        calendar: &H,
        poster: &P,
        instant: DateTime<Utc>,
    ) -> GateResult<Verdict>
    where
        H: HolidayCalendar + ?Sized,
        P: CommentPoster + ?Sized,
    {
        match self.assess(calendar, instant)? {
            Assessment::Allowed => Ok(Verdict::Allowed),
            Assessment::Exempt => Ok(Verdict::Exempt),
            Assessment::Restricted => self.block(poster),
        }
    }
}
