//! GitHub pull-request comments.

use regex::Regex;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{GateError, GateResult};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT_VALUE: &str = "merge-gate";
const PAGE_SIZE: usize = 100;

static PULL_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"refs/pull/(\d+)/merge").expect("pull ref pattern compiles"));

#[derive(Debug, Error)]
pub enum CommentError {
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GitHub API error: HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOutcome {
    Created,
    SkippedDuplicate,
}

pub trait CommentPoster {
    /// Posts `body` on the pull request. With `dedupe`, nothing is posted when
    /// a comment with a byte-identical body already exists.
    fn post_comment(
        &self,
        repository: &str,
        pr_number: u64,
        body: &str,
        dedupe: bool,
    ) -> Result<CommentOutcome, CommentError>;
}

/// Extracts `<n>` from a `refs/pull/<n>/merge` reference.
pub fn parse_pull_request_number(reference: &str) -> GateResult<u64> {
    PULL_REF
        .captures(reference)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| GateError::InvalidReference(reference.to_string()))
}

#[derive(Debug, Deserialize)]
struct IssueComment {
    id: u64,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewComment<'a> {
    body: &'a str,
}

pub struct GitHubCommentPoster {
    client: Client,
    token: String,
    api_url: String,
}

impl GitHubCommentPoster {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            token: token.into(),
            api_url,
        }
    }

    fn comments_url(&self, repository: &str, pr_number: u64) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_url, repository, pr_number
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/vnd.github+json")
    }

    fn find_identical(&self, url: &str, body: &str) -> Result<Option<u64>, CommentError> {
        let mut page = 1usize;
        loop {
            let response = self
                .authorized(self.client.get(url))
                .query(&[("per_page", PAGE_SIZE), ("page", page)])
                .send()?;
            let comments: Vec<IssueComment> = ensure_success(response)?.json()?;
            debug!(page, count = comments.len(), "listed existing comments");

            if let Some(existing) = comments
                .iter()
                .find(|comment| comment.body.as_deref() == Some(body))
            {
                return Ok(Some(existing.id));
            }
            if comments.len() < PAGE_SIZE {
                return Ok(None);
            }
            page += 1;
        }
    }
}

impl CommentPoster for GitHubCommentPoster {
    fn post_comment(
        &self,
        repository: &str,
        pr_number: u64,
        body: &str,
        dedupe: bool,
    ) -> Result<CommentOutcome, CommentError> {
        let url = self.comments_url(repository, pr_number);

        if dedupe {
            if let Some(comment_id) = self.find_identical(&url, body)? {
                warn!(
                    repository,
                    pr_number, comment_id, "identical comment already present, not posting"
                );
                return Ok(CommentOutcome::SkippedDuplicate);
            }
        }

        let response = self
            .authorized(self.client.post(&url))
            .json(&NewComment { body })
            .send()?;
        ensure_success(response)?;
        info!(repository, pr_number, "posted merge-window comment");
        Ok(CommentOutcome::Created)
    }
}

fn ensure_success(response: Response) -> Result<Response, CommentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(CommentError::Status {
        status: status.as_u16(),
        body,
    })
}
