use crate::api::{Activity, ActivityRecord, Comment, Error, Issue, Result};
use std::collections::BTreeMap;

/// Activity counters of a single user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserActivity {
    pub opened_issues: u32,
    pub issue_comments: u32,
    pub repository_comments: u32,
}

impl UserActivity {
    pub fn count(&self, activity: Activity) -> u32 {
        match activity {
            Activity::IssueOpened => self.opened_issues,
            Activity::IssueCommented => self.issue_comments,
            Activity::RepositoryCommented => self.repository_comments,
        }
    }

    fn increment(&mut self, activity: Activity) {
        let counter = match activity {
            Activity::IssueOpened => &mut self.opened_issues,
            Activity::IssueCommented => &mut self.issue_comments,
            Activity::RepositoryCommented => &mut self.repository_comments,
        };
        *counter += 1;
    }
}

/// Activity tally keyed by user login, iterated in login order.
///
/// A login is present only after one of its records was counted. Logins are compared exactly as
/// returned by the API, so `Alice` and `alice` are two users.
#[derive(Debug, Default)]
pub struct Manifest {
    users: BTreeMap<String, UserActivity>,
}

impl Manifest {
    pub fn new() -> Self {
        Manifest::default()
    }

    pub fn from_records<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a ActivityRecord>,
    {
        let mut manifest = Manifest::new();
        for record in records {
            manifest.record(record)?;
        }
        Ok(manifest)
    }

    pub fn record(&mut self, record: &ActivityRecord) -> Result<()> {
        self.tally(record.login(), record.activity(), record.id())
    }

    pub fn record_issue_opened(&mut self, issue: &Issue) -> Result<()> {
        self.tally(issue.user.as_deref(), Activity::IssueOpened, issue.number)
    }

    pub fn record_issue_comment(&mut self, comment: &Comment) -> Result<()> {
        self.tally(comment.user.as_deref(), Activity::IssueCommented, comment.id)
    }

    pub fn record_repository_comment(&mut self, comment: &Comment) -> Result<()> {
        self.tally(comment.user.as_deref(), Activity::RepositoryCommented, comment.id)
    }

    /// Records without a user fail the whole tally instead of being skipped.
    fn tally(&mut self, login: Option<&str>, activity: Activity, id: u64) -> Result<()> {
        let login = login.ok_or(Error::MissingLogin { activity, id })?;
        self.users.entry(login.to_string()).or_default().increment(activity);
        Ok(())
    }

    pub fn get(&self, login: &str) -> Option<&UserActivity> {
        self.users.get(login)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserActivity)> {
        self.users.iter().map(|(login, activity)| (login.as_str(), activity))
    }

    pub fn total(&self, activity: Activity) -> u64 {
        self.users.values().map(|user| u64::from(user.count(activity))).sum()
    }
}
