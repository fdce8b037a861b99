use crate::api::{
    Activity, ActivityRecord, Client, Comment, Issue, IssueState, Page, Paged, RepoType, Repository, Result,
    FIRST_PAGE_NUMBER, MAX_PAGE_SIZE,
};
use derive_more::Constructor;
use log::{debug, info, warn};
use std::future::Future;

/// Filters and page size applied to every listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct FetchOptions {
    pub repo_type: RepoType,
    pub issue_state: IssueState,
    pub page_size: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions::new(RepoType::Public, IssueState::Open, MAX_PAGE_SIZE)
    }
}

/// Requests consecutive pages starting at [`FIRST_PAGE_NUMBER`] and concatenates their items.
///
/// Stops on the first empty page, when no next page is reported or when the reported cursor does not
/// move forward. The first failing page aborts the whole fetch.
pub async fn fetch_all<T, F, Fut>(page_size: u32, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Page) -> Fut,
    Fut: Future<Output = Result<Paged<T>>>,
{
    let mut all = Vec::new();
    let mut page_no = FIRST_PAGE_NUMBER;
    loop {
        let Paged { items, next_page } = fetch_page(Page::new(page_no, page_size)).await?;
        if items.is_empty() {
            break;
        }
        all.extend(items);
        match next_page {
            Some(next) if next > page_no => page_no = next,
            Some(next) => {
                warn!("Next page {} does not follow page {}. Stopping.", next, page_no);
                break;
            }
            None => break,
        }
    }
    Ok(all)
}

pub struct Fetcher<CLIENT>
where
    CLIENT: Client,
{
    client: CLIENT,
    options: FetchOptions,
}

impl<CLIENT> Fetcher<CLIENT>
where
    CLIENT: Client,
{
    pub fn new(client: CLIENT, options: FetchOptions) -> Self {
        Fetcher { client, options }
    }

    pub async fn public_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        let client = &self.client;
        let repo_type = self.options.repo_type;
        let repos = fetch_all(self.options.page_size, move |page| client.repositories(org, repo_type, page)).await?;
        debug!("Found {} repositories in {}", repos.len(), org);
        Ok(repos)
    }

    pub async fn issues(&self, repo: &Repository) -> Result<Vec<Issue>> {
        let client = &self.client;
        let state = self.options.issue_state;
        let issues = fetch_all(self.options.page_size, move |page| client.issues(repo, state, page)).await?;
        debug!("Found {} issues in {}", issues.len(), repo.full_name());
        Ok(issues)
    }

    pub async fn issue_comments(&self, repo: &Repository, issue: &Issue) -> Result<Vec<Comment>> {
        let client = &self.client;
        fetch_all(self.options.page_size, move |page| client.issue_comments(repo, issue, page)).await
    }

    pub async fn repository_comments(&self, repo: &Repository) -> Result<Vec<Comment>> {
        let client = &self.client;
        let comments = fetch_all(self.options.page_size, move |page| client.repository_comments(repo, page)).await?;
        debug!("Found {} repository comments in {}", comments.len(), repo.full_name());
        Ok(comments)
    }

    pub async fn all_issues_for_organization(&self, org: &str) -> Result<Vec<Issue>> {
        let mut all = Vec::new();
        for repo in self.public_repositories(org).await? {
            all.extend(self.issues(&repo).await?);
        }
        Ok(all)
    }

    pub async fn all_issue_comments_for_organization(&self, org: &str) -> Result<Vec<Comment>> {
        let mut all = Vec::new();
        for repo in self.public_repositories(org).await? {
            for issue in self.issues(&repo).await? {
                all.extend(self.issue_comments(&repo, &issue).await?);
            }
        }
        Ok(all)
    }

    pub async fn all_repository_comments_for_organization(&self, org: &str) -> Result<Vec<Comment>> {
        let mut all = Vec::new();
        for repo in self.public_repositories(org).await? {
            all.extend(self.repository_comments(&repo).await?);
        }
        Ok(all)
    }

    /// Collects the records of the selected `activities` across the organization.
    ///
    /// Repositories are listed once and issues are listed once per repository, no matter how many
    /// activities need them.
    pub async fn activity_for_organization(&self, org: &str, activities: &[Activity]) -> Result<Vec<ActivityRecord>> {
        let wants = |activity: Activity| activities.contains(&activity);

        info!("gathering repositories of {}", org);
        let repos = self.public_repositories(org).await?;

        let mut records = Vec::new();
        for repo in &repos {
            if wants(Activity::IssueOpened) || wants(Activity::IssueCommented) {
                info!("gathering issues of {}", repo.full_name());
                let issues = self.issues(repo).await?;
                if wants(Activity::IssueCommented) {
                    info!("gathering issue comments of {}", repo.full_name());
                    for issue in &issues {
                        let comments = self.issue_comments(repo, issue).await?;
                        records.extend(comments.into_iter().map(ActivityRecord::IssueCommented));
                    }
                }
                if wants(Activity::IssueOpened) {
                    records.extend(issues.into_iter().map(ActivityRecord::IssueOpened));
                }
            }
            if wants(Activity::RepositoryCommented) {
                info!("gathering repository comments of {}", repo.full_name());
                let comments = self.repository_comments(repo).await?;
                records.extend(comments.into_iter().map(ActivityRecord::RepositoryCommented));
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn paged<T: Clone>(pages: &[Vec<T>], page: Page, next: bool) -> Paged<T> {
        let index = (page.page_no - FIRST_PAGE_NUMBER) as usize;
        let items = pages.get(index).cloned().unwrap_or_default();
        let next_page = if next || index + 1 < pages.len() {
            Some(page.page_no + 1)
        } else {
            None
        };
        Paged::new(items, next_page)
    }

    #[tokio::test]
    async fn fetch_all_stops_without_next_page() {
        let pages = vec![vec![1, 2], vec![3], vec![4, 5]];
        let mut requests = Vec::new();
        let all = fetch_all(2, |page| {
            requests.push(page);
            let result = paged(&pages, page, false);
            async move { Ok(result) }
        })
        .await
        .unwrap();

        assert_eq!(all, vec![1, 2, 3, 4, 5]);
        assert_eq!(requests, vec![Page::new(1, 2), Page::new(2, 2), Page::new(3, 2)]);
    }

    #[tokio::test]
    async fn fetch_all_stops_on_empty_page() {
        let pages = vec![vec!["a"], vec!["b"]];
        let mut requests = 0;
        let all = fetch_all(1, |page| {
            requests += 1;
            let result = paged(&pages, page, true);
            async move { Ok(result) }
        })
        .await
        .unwrap();

        assert_eq!(all, vec!["a", "b"]);
        assert_eq!(requests, 3, "Two full pages and the empty one");
    }

    #[tokio::test]
    async fn fetch_all_stops_on_stale_cursor() {
        let mut requests = 0;
        let all = fetch_all(10, |page| {
            requests += 1;
            async move { Ok(Paged::new(vec![page.page_no], Some(page.page_no))) }
        })
        .await
        .unwrap();

        assert_eq!(all, vec![FIRST_PAGE_NUMBER]);
        assert_eq!(requests, 1);
    }

    #[tokio::test]
    async fn fetch_all_aborts_on_failed_page() {
        let mut requests = 0;
        let result: Result<Vec<u32>> = fetch_all(1, |page| {
            requests += 1;
            async move {
                if page.page_no == 2 {
                    Err(Error::Api {
                        status: 502,
                        url: "/page/2".to_string(),
                        message: "Bad Gateway".to_string(),
                    })
                } else {
                    Ok(Paged::new(vec![page.page_no], Some(page.page_no + 1)))
                }
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Api { status: 502, .. })));
        assert_eq!(requests, 2);
    }

    struct FakeClient {
        repos: Vec<Repository>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn new(repos: Vec<Repository>) -> Self {
            FakeClient {
                repos,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn log(&self, request: String) {
            self.requests.lock().unwrap().push(request);
        }
    }

    fn user(login: &str) -> Option<String> {
        Some(login.to_string())
    }

    #[async_trait]
    impl Client for FakeClient {
        async fn repositories(&self, org: &str, repo_type: RepoType, page: Page) -> Result<Paged<Repository>> {
            self.log(format!("repos {} {} {}", org, repo_type, page.page_no));
            Ok(paged(&[self.repos.clone()], page, false))
        }

        async fn issues(&self, repo: &Repository, state: IssueState, page: Page) -> Result<Paged<Issue>> {
            self.log(format!("issues {} {} {}", repo.name, state, page.page_no));
            let issues = vec![
                Issue::new(1, "first".to_string(), user("alice")),
                Issue::new(2, "second".to_string(), user("bob")),
            ];
            Ok(paged(&[issues], page, false))
        }

        async fn issue_comments(&self, repo: &Repository, issue: &Issue, page: Page) -> Result<Paged<Comment>> {
            self.log(format!("issue comments {} {} {}", repo.name, issue.number, page.page_no));
            Ok(paged(&[vec![Comment::new(issue.number * 10, user("carol"))]], page, false))
        }

        async fn repository_comments(&self, repo: &Repository, page: Page) -> Result<Paged<Comment>> {
            self.log(format!("repository comments {} {}", repo.name, page.page_no));
            Ok(paged(&[vec![Comment::new(99, user("dave"))]], page, false))
        }
    }

    fn repos() -> Vec<Repository> {
        vec![
            Repository::new("org".to_string(), "one".to_string()),
            Repository::new("org".to_string(), "two".to_string()),
        ]
    }

    #[tokio::test]
    async fn collects_every_selected_activity() {
        let fetcher = Fetcher::new(FakeClient::new(repos()), FetchOptions::default());
        let activities = [
            Activity::IssueOpened,
            Activity::IssueCommented,
            Activity::RepositoryCommented,
        ];
        let records = fetcher.activity_for_organization("org", &activities).await.unwrap();

        let count = |activity: Activity| records.iter().filter(|r| r.activity() == activity).count();
        assert_eq!(count(Activity::IssueOpened), 4);
        assert_eq!(count(Activity::IssueCommented), 4);
        assert_eq!(count(Activity::RepositoryCommented), 2);

        let requests = fetcher.client.requests.lock().unwrap();
        assert_eq!(requests[0], "repos org public 1");
        assert_eq!(
            requests.iter().filter(|r| r.starts_with("repos ")).count(),
            1,
            "Repositories should be listed once"
        );
        assert_eq!(requests.iter().filter(|r| r.starts_with("issues ")).count(), 2);
    }

    #[tokio::test]
    async fn skips_issue_listing_when_not_needed() {
        let fetcher = Fetcher::new(FakeClient::new(repos()), FetchOptions::default());
        let records = fetcher
            .activity_for_organization("org", &[Activity::RepositoryCommented])
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        let requests = fetcher.client.requests.lock().unwrap();
        assert!(requests.iter().all(|r| !r.starts_with("issue")));
        assert_eq!(requests.iter().filter(|r| r.starts_with("repos ")).count(), 1);
        assert_eq!(requests.iter().filter(|r| r.starts_with("repository comments")).count(), 2);
    }

    #[tokio::test]
    async fn organization_wide_listings_use_configured_filters() {
        let options = FetchOptions::new(RepoType::Sources, IssueState::Closed, 30);
        let fetcher = Fetcher::new(FakeClient::new(repos()), options);

        assert_eq!(fetcher.all_issues_for_organization("org").await.unwrap().len(), 4);
        assert_eq!(fetcher.all_issue_comments_for_organization("org").await.unwrap().len(), 4);
        assert_eq!(fetcher.all_repository_comments_for_organization("org").await.unwrap().len(), 2);

        let requests = fetcher.client.requests.lock().unwrap();
        assert!(requests.contains(&"repos org sources 1".to_string()));
        assert!(requests.contains(&"issues one closed 1".to_string()));
    }
}
