use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use merge_gate::{
    Assessment, CliArgs, GateController, GitHubCommentPoster, PublicHolidays, Verdict,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const CONFIG_ERROR_EXIT: u8 = 2;

fn run(args: CliArgs) -> Result<Verdict> {
    let (credentials, config) = args.into_parts();
    let calendar = PublicHolidays;
    let gate = GateController::from_config(&config, &calendar)?;

    // Sampled once for the whole evaluation.
    let instant = config.check_at.unwrap_or_else(Utc::now);

    match gate.assess(&calendar, instant)? {
        Assessment::Allowed => {
            println!("✅ Merging is allowed at this time.");
            Ok(Verdict::Allowed)
        }
        Assessment::Exempt => {
            println!("✅ Hotfix PRs are allowed to merge outside business hours.");
            Ok(Verdict::Exempt)
        }
        Assessment::Restricted => {
            println!("❌ Merging is not allowed during the specified time.");
            let poster = GitHubCommentPoster::with_api_url(credentials.token, credentials.api_url);
            Ok(gate.block(&poster)?)
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match run(args) {
        Ok(verdict) => ExitCode::from(verdict.exit_code()),
        Err(err) => {
            eprintln!("❌ {err:#}");
            ExitCode::from(CONFIG_ERROR_EXIT)
        }
    }
}
