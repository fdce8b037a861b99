//! Organization activity reports.
//!
//! Each binary is one [`ReportKind`]: it parses its flags, fetches the report's activity sources from
//! GitHub and prints one row per active user to standard output.

mod args;

pub use args::Args;

use env_logger::Env;
use github_client::GithubClientBuilder;
use log::{error, info};
use manifest::api::Result;
use manifest::{report, FetchOptions, Fetcher, ReportKind};
use std::io::Write;
use std::process::ExitCode;

/// Logs to stderr at `info`, or `debug` when asked. `RUST_LOG` takes precedence.
pub fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    // No-op when a logger is already installed.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level)).try_init();
}

/// Runs the `kind` report and writes the rendered table to `out`.
///
/// `out` stays untouched when any page fails to load.
pub async fn run<W: Write>(kind: ReportKind, args: Args, out: W) -> Result<()> {
    let client = GithubClientBuilder::default()
        .with_github_url(&args.api_url)
        .try_with_token(args.github_token)?
        .build()?;
    let fetcher = Fetcher::new(
        client,
        FetchOptions::new(args.repo_type, args.issue_state, args.per_page),
    );
    let format = args.format.unwrap_or_else(|| kind.default_format());

    info!("{} of {} as {}", kind, args.github_organization_name, format);
    report::generate(
        &fetcher,
        &args.github_organization_name,
        kind.activities(),
        args.totals,
        format.writer(out),
    )
    .await
}

/// Entry point shared by the report binaries.
pub async fn execute(kind: ReportKind) -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse_for(kind);
    init_logging(args.debug);

    let stdout = std::io::stdout();
    match run(kind, args, stdout.lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{} failed", kind);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
