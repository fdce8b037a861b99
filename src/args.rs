use clap::{CommandFactory, FromArgMatches, Parser};
use github_client::DEFAULT_GITHUB_URL;
use manifest::api::{IssueState, RepoType, MAX_PAGE_SIZE};
use manifest::table::OutputFormat;
use manifest::ReportKind;
use secrecy::SecretString;
use std::ffi::OsString;
use std::{fmt::Display, str::FromStr};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub access token
    #[arg(long)]
    pub github_token: SecretString,

    /// GitHub organization name
    #[arg(long)]
    pub github_organization_name: String,

    /// GitHub API URL
    #[arg(long, default_value = DEFAULT_GITHUB_URL)]
    pub api_url: String,

    /// Type of organization repositories to scan (all, public, private, forks, sources, member)
    #[arg(long, default_value_t = RepoType::Public)]
    pub repo_type: RepoType,

    /// State of the issues to count (open, closed, all)
    #[arg(long, default_value_t = IssueState::Open)]
    pub issue_state: IssueState,

    /// Items requested per API page
    #[arg(long, default_value_t = MAX_PAGE_SIZE, value_parser = per_page_in_range)]
    pub per_page: u32,

    /// Output format (csv, table), the report's own default when omitted
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Append a footer with column totals
    #[arg(long)]
    pub totals: bool,

    /// Run in debug mode
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Command of `report`, every flag also read from `<PREFIX><FLAG>` environment variables.
    pub fn command_for(report: ReportKind) -> clap::Command {
        let prefix = report.env_prefix();
        Self::command()
            .name(report.command_name())
            .bin_name(report.command_name())
            .mut_args(move |arg| {
                let env = format!("{}{}", prefix, arg.get_id().as_str().to_uppercase());
                arg.env(env)
            })
    }

    pub fn parse_for(report: ReportKind) -> Self {
        let matches = Self::command_for(report).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
    }

    pub fn try_parse_for<I, T>(report: ReportKind, itr: I) -> clap::error::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command_for(report).try_get_matches_from(itr)?;
        Self::from_arg_matches(&matches)
    }
}

fn per_page_in_range(value: &str) -> Result<u32, String> {
    number_in_range(value, 1, MAX_PAGE_SIZE, "per_page".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}
