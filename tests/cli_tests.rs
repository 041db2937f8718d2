use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::str::contains as str_contains;
use serde_json::json;

// Tuesday 2024-03-05 in Sydney
const TUESDAY_10AM: &str = "2024-03-04T23:00:00Z";
const TUESDAY_2AM: &str = "2024-03-04T15:00:00Z";

#[allow(deprecated)]
fn gate(title: &str) -> Command {
    let mut cmd = Command::cargo_bin("merge-gate").expect("merge-gate binary");
    cmd.env_clear()
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .env("INPUT_GITHUB_TOKEN", "secret")
        .env("INPUT_PR_TITLE", title);
    cmd
}

#[test]
fn cli_allows_merges_inside_business_hours() {
    gate("Fix login bug")
        .args(["--check-at", TUESDAY_10AM])
        .assert()
        .success()
        .stdout(str_contains("Merging is allowed at this time."));
}

#[test]
fn cli_lets_hotfixes_through() {
    gate("hotfix: fix login bug")
        .args(["--check-at", TUESDAY_2AM])
        .assert()
        .success()
        .stdout(str_contains("Hotfix PRs are allowed to merge"));
}

#[test]
fn cli_reads_inputs_from_the_environment() {
    gate("Fix login bug")
        .env("INPUT_TIMEZONE", "UTC")
        .env(
            "INPUT_RESTRICTED_TIMES",
            r#"{"weekly": [{"days": ["tue"], "intervals": [[9, 12]]}]}"#,
        )
        .env("INPUT_CHECK_AT", "2024-03-05T10:00:00Z")
        .env("INPUT_CHECK_EXISTING_COMMENT", "false")
        .assert()
        .code(2)
        .stdout(str_contains("Merging is not allowed during the specified time."))
        .stderr(str_contains("GITHUB_REF"));
}

#[test]
fn cli_rejects_unknown_timezones() {
    gate("Fix login bug")
        .args(["--timezone", "Mars/Base", "--check-at", TUESDAY_10AM])
        .assert()
        .code(2)
        .stderr(str_contains("Invalid timezone: Mars/Base"));
}

#[test]
fn cli_rejects_schedules_without_weekly_rules() {
    gate("Fix login bug")
        .args(["--restricted-times", r#"{"dates": []}"#])
        .assert()
        .code(2)
        .stderr(str_contains("Missing 'weekly' key in restricted times."));
}

#[test]
fn cli_blocks_and_comments_on_the_pull_request() {
    let mut server = Server::new();
    let listing = server
        .mock("GET", "/repos/acme/widgets/issues/42/comments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();
    let created = server
        .mock("POST", "/repos/acme/widgets/issues/42/comments")
        .match_header("authorization", "Bearer secret")
        .match_body(Matcher::Json(json!({ "body": "Closed for merges." })))
        .with_status(201)
        .with_body("{}")
        .create();

    gate("Fix login bug")
        .env("GITHUB_API_URL", server.url())
        .env("GITHUB_REF", "refs/pull/42/merge")
        .env("GITHUB_REPOSITORY", "acme/widgets")
        .env("INPUT_CUSTOM_MESSAGE", "Closed for merges.")
        .args(["--check-at", TUESDAY_2AM])
        .assert()
        .code(1)
        .stdout(str_contains("Merging is not allowed during the specified time."));

    listing.assert();
    created.assert();
}

#[test]
fn cli_rejects_refs_that_are_not_pull_requests() {
    gate("Fix login bug")
        .env("GITHUB_REF", "refs/heads/main")
        .env("GITHUB_REPOSITORY", "acme/widgets")
        .args(["--check-at", TUESDAY_2AM])
        .assert()
        .code(2)
        .stderr(str_contains("Invalid GitHub ref: refs/heads/main"));
}

#[test]
fn cli_posts_a_duplicate_when_dedupe_is_disabled() {
    let mut server = Server::new();
    let listing = server
        .mock("GET", "/repos/acme/widgets/issues/42/comments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{ "id": 1, "body": "Closed for merges." }]).to_string())
        .expect(0)
        .create();
    let created = server
        .mock("POST", "/repos/acme/widgets/issues/42/comments")
        .match_body(Matcher::Json(json!({ "body": "Closed for merges." })))
        .with_status(201)
        .with_body("{}")
        .expect(1)
        .create();

    gate("Fix login bug")
        .env("GITHUB_API_URL", server.url())
        .env("GITHUB_REF", "refs/pull/42/merge")
        .env("GITHUB_REPOSITORY", "acme/widgets")
        .env("INPUT_CUSTOM_MESSAGE", "Closed for merges.")
        .env("INPUT_CHECK_EXISTING_COMMENT", "false")
        .args(["--check-at", TUESDAY_2AM])
        .assert()
        .code(1);

    listing.assert();
    created.assert();
}

#[test]
fn cli_skips_an_identical_comment_when_dedupe_is_enabled() {
    let mut server = Server::new();
    let listing = server
        .mock("GET", "/repos/acme/widgets/issues/42/comments")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{ "id": 1, "body": "Closed for merges." }]).to_string())
        .create();
    let created = server
        .mock("POST", "/repos/acme/widgets/issues/42/comments")
        .expect(0)
        .create();

    gate("Fix login bug")
        .env("GITHUB_API_URL", server.url())
        .env("GITHUB_REF", "refs/pull/42/merge")
        .env("GITHUB_REPOSITORY", "acme/widgets")
        .env("INPUT_CUSTOM_MESSAGE", "Closed for merges.")
        .env("INPUT_CHECK_EXISTING_COMMENT", "TRUE")
        .args(["--check-at", TUESDAY_2AM])
        .assert()
        .code(1);

    listing.assert();
    created.assert();
}
