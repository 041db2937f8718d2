use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use std::convert::Infallible;

use crate::github::DEFAULT_API_URL;

pub const DEFAULT_TIMEZONE: &str = "Australia/Sydney";
pub const DEFAULT_CUSTOM_MESSAGE: &str =
    "⚠️ **PR merging is not allowed outside business hours.** ⚠️";

/// Inputs the gate controller works from.
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    pub pr_title: String,
    pub timezone: String,
    /// Raw restricted-times JSON; `None` selects the built-in schedule.
    pub restricted_times: Option<String>,
    pub custom_message: String,
    pub check_existing_comment: bool,
    /// `refs/pull/<n>/merge`, only needed once a merge is blocked.
    pub github_ref: Option<String>,
    /// `owner/name`, only needed once a merge is blocked.
    pub repository: Option<String>,
    pub check_at: Option<DateTime<Utc>>,
}

impl GateConfig {
    pub fn new(pr_title: impl Into<String>) -> Self {
        Self {
            pr_title: pr_title.into(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            restricted_times: None,
            custom_message: DEFAULT_CUSTOM_MESSAGE.to_string(),
            check_existing_comment: true,
            github_ref: None,
            repository: None,
            check_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubCredentials {
    pub token: String,
    pub api_url: String,
}

#[derive(Debug, Parser)]
#[command(
    name = "merge-gate",
    version,
    about = "Blocks pull-request merges inside restricted time windows"
)]
pub struct CliArgs {
    /// Token used to comment on the pull request
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Pull-request title, scanned for `hotfix:`
    #[arg(long, env = "INPUT_PR_TITLE")]
    pub pr_title: String,

    /// IANA timezone the schedule is written in
    #[arg(long, env = "INPUT_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Restricted-times JSON document
    #[arg(long, env = "INPUT_RESTRICTED_TIMES")]
    pub restricted_times: Option<String>,

    /// Body of the comment posted when a merge is blocked
    #[arg(long, env = "INPUT_CUSTOM_MESSAGE", default_value = DEFAULT_CUSTOM_MESSAGE)]
    pub custom_message: String,

    /// Skip posting when an identical comment exists (`true` enables)
    #[arg(
        long,
        env = "INPUT_CHECK_EXISTING_COMMENT",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub check_existing_comment: bool,

    #[arg(long, env = "GITHUB_REF")]
    pub github_ref: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub github_repository: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// Evaluate this RFC 3339 instant instead of the current time
    #[arg(long, env = "INPUT_CHECK_AT", value_parser = parse_instant)]
    pub check_at: Option<DateTime<Utc>>,
}

impl CliArgs {
    pub fn into_parts(self) -> (GitHubCredentials, GateConfig) {
        let credentials = GitHubCredentials {
            token: self.github_token,
            api_url: self.github_api_url,
        };
        let config = GateConfig {
            pr_title: self.pr_title,
            timezone: self.timezone,
            restricted_times: self.restricted_times,
            custom_message: self.custom_message,
            check_existing_comment: self.check_existing_comment,
            github_ref: self.github_ref,
            repository: self.github_repository,
            check_at: self.check_at,
        };
        (credentials, config)
    }
}

/// Only a case-insensitive `true` turns a flag on; anything else is off.
pub fn parse_flag(raw: &str) -> Result<bool, Infallible> {
    Ok(raw.trim().eq_ignore_ascii_case("true"))
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|stamp| stamp.with_timezone(&Utc))
}
