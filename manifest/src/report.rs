use crate::api::{Activity, Client, Result};
use crate::fetcher::Fetcher;
use crate::manifest::Manifest;
use crate::table::{OutputFormat, TableWriter};
use log::info;
use strum_macros::{Display, EnumString};

pub const USER_COLUMN: &str = "Github User";
pub const TOTAL_LABEL: &str = "Total";

/// Report variants, each a combination of activity sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ReportKind {
    #[strum(serialize = "issuemanifest")]
    Issues,
    #[strum(serialize = "flightmanifest")]
    Flight,
    #[strum(serialize = "passengermanifest")]
    Passenger,
}

impl ReportKind {
    pub fn activities(&self) -> &'static [Activity] {
        match self {
            ReportKind::Issues => &[Activity::IssueOpened],
            ReportKind::Flight => &[Activity::IssueOpened, Activity::RepositoryCommented],
            ReportKind::Passenger => &[
                Activity::IssueOpened,
                Activity::IssueCommented,
                Activity::RepositoryCommented,
            ],
        }
    }

    pub fn command_name(&self) -> String {
        self.to_string()
    }

    /// Prefix of the environment variables configuring the command, e.g. `FLIGHTMANIFEST_`.
    pub fn env_prefix(&self) -> String {
        format!("{}_", self.command_name().to_uppercase())
    }

    pub fn default_format(&self) -> OutputFormat {
        match self {
            ReportKind::Issues => OutputFormat::Table,
            ReportKind::Flight | ReportKind::Passenger => OutputFormat::Csv,
        }
    }
}

pub fn header(activities: &[Activity]) -> Vec<String> {
    std::iter::once(USER_COLUMN)
        .chain(activities.iter().map(Activity::column_title))
        .map(String::from)
        .collect()
}

/// Fills `table` with one row per login. With `totals` a footer sums every counter column.
pub fn tabulate<T>(manifest: &Manifest, activities: &[Activity], totals: bool, table: &mut T)
where
    T: TableWriter + ?Sized,
{
    table.set_header(header(activities));
    for (login, user) in manifest.iter() {
        let counts = activities.iter().map(|activity| user.count(*activity).to_string());
        table.append(std::iter::once(login.to_string()).chain(counts).collect());
    }
    if totals {
        let sums = activities.iter().map(|activity| manifest.total(*activity).to_string());
        table.set_footer(std::iter::once(TOTAL_LABEL.to_string()).chain(sums).collect());
    }
}

/// Fetches the selected activities of `org`, tallies them and renders the table.
///
/// Nothing reaches `table`'s writer unless every page was fetched and every record tallied.
pub async fn generate<'a, CLIENT>(
    fetcher: &Fetcher<CLIENT>,
    org: &str,
    activities: &[Activity],
    totals: bool,
    mut table: Box<dyn TableWriter + 'a>,
) -> Result<()>
where
    CLIENT: Client,
{
    let records = fetcher.activity_for_organization(org, activities).await?;
    info!("calculating report from {} records", records.len());
    let manifest = Manifest::from_records(&records)?;
    info!("reporting {} users", manifest.len());
    tabulate(&manifest, activities, totals, table.as_mut());
    table.render()
}
