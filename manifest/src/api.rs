use async_trait::async_trait;
use derive_more::Constructor;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

pub const FIRST_PAGE_NUMBER: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("API error {status} for {url}: {message}")]
    Api { status: u16, url: String, message: String },
    #[error("The {activity} {id} has no user login")]
    MissingLogin { activity: Activity, id: u64 },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "report")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Kind of activity counted per user, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum Activity {
    #[strum(serialize = "opened issue")]
    IssueOpened,
    #[strum(serialize = "issue comment")]
    IssueCommented,
    #[strum(serialize = "repository comment")]
    RepositoryCommented,
}

impl Activity {
    pub fn column_title(&self) -> &'static str {
        match self {
            Activity::IssueOpened => "Opened Issues",
            Activity::IssueCommented => "Issue Comments",
            Activity::RepositoryCommented => "Repository Comments",
        }
    }
}

/// Repository visibility filter of the organization repositories listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RepoType {
    All,
    #[default]
    Public,
    Private,
    Forks,
    Sources,
    Member,
}

/// Issue state filter of the repository issues listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    All,
}

/// Requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Page {
    pub page_no: u32,
    pub page_size: u32,
}

/// One page of results and the cursor of the following one, if the API reported any.
#[derive(Debug, PartialEq, Constructor)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Comment {
    pub id: u64,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityRecord {
    IssueOpened(Issue),
    IssueCommented(Comment),
    RepositoryCommented(Comment),
}

impl ActivityRecord {
    pub fn activity(&self) -> Activity {
        match self {
            ActivityRecord::IssueOpened(_) => Activity::IssueOpened,
            ActivityRecord::IssueCommented(_) => Activity::IssueCommented,
            ActivityRecord::RepositoryCommented(_) => Activity::RepositoryCommented,
        }
    }

    /// Issue number or comment id.
    pub fn id(&self) -> u64 {
        match self {
            ActivityRecord::IssueOpened(issue) => issue.number,
            ActivityRecord::IssueCommented(comment) | ActivityRecord::RepositoryCommented(comment) => comment.id,
        }
    }

    pub fn login(&self) -> Option<&str> {
        match self {
            ActivityRecord::IssueOpened(issue) => issue.user.as_deref(),
            ActivityRecord::IssueCommented(comment) | ActivityRecord::RepositoryCommented(comment) => {
                comment.user.as_deref()
            }
        }
    }
}

/// Read only access to the hosting service. Every call returns a single page.
#[async_trait]
pub trait Client: Send + Sync {
    async fn repositories(&self, org: &str, repo_type: RepoType, page: Page) -> Result<Paged<Repository>>;

    async fn issues(&self, repo: &Repository, state: IssueState, page: Page) -> Result<Paged<Issue>>;

    async fn issue_comments(&self, repo: &Repository, issue: &Issue, page: Page) -> Result<Paged<Comment>>;

    async fn repository_comments(&self, repo: &Repository, page: Page) -> Result<Paged<Comment>>;
}
