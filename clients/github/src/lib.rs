//! GitHub REST adapter of [`manifest::api::Client`].

mod builder;
mod link;
mod payload;

pub use builder::{GithubClientBuilder, DEFAULT_GITHUB_URL};

use async_trait::async_trait;
use log::debug;
use manifest::api::{Client, Comment, Error, Issue, IssueState, Page, Paged, RepoType, Repository, Result};
use serde::de::DeserializeOwned;
use url::Url;

pub struct GithubClient {
    client: reqwest::Client,
    github_url: Url,
}

pub(crate) fn network(err: reqwest::Error) -> Error {
    Error::Network(Box::new(err))
}

impl GithubClient {
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.github_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("GitHub URL {} cannot be a base", self.github_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_page<BODY, ITEM>(&self, url: Url, filter: &[(&str, &str)], page: Page) -> Result<Paged<ITEM>>
    where
        BODY: DeserializeOwned,
        ITEM: From<BODY>,
    {
        debug!("GET {} page {}", url, page.page_no);
        let response = self
            .client
            .get(url.clone())
            .query(filter)
            .query(&[("page", page.page_no), ("per_page", page.page_size)])
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unexpected status").to_string();
            let message = response
                .json::<payload::ErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or(reason);
            return Err(Error::Api {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        let next_page = link::next_page(response.headers());
        let items = response.json::<Vec<BODY>>().await.map_err(network)?;
        debug!("Got {} items, next page {:?}", items.len(), next_page);
        Ok(Paged::new(items.into_iter().map(ITEM::from).collect(), next_page))
    }
}

#[async_trait]
impl Client for GithubClient {
    async fn repositories(&self, org: &str, repo_type: RepoType, page: Page) -> Result<Paged<Repository>> {
        let url = self.endpoint(&["orgs", org, "repos"])?;
        self.get_page::<payload::Repo, _>(url, &[("type", repo_type.as_ref())], page)
            .await
    }

    async fn issues(&self, repo: &Repository, state: IssueState, page: Page) -> Result<Paged<Issue>> {
        let url = self.endpoint(&["repos", repo.owner.as_str(), repo.name.as_str(), "issues"])?;
        self.get_page::<payload::Issue, _>(url, &[("state", state.as_ref())], page)
            .await
    }

    async fn issue_comments(&self, repo: &Repository, issue: &Issue, page: Page) -> Result<Paged<Comment>> {
        let number = issue.number.to_string();
        let url = self.endpoint(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "issues",
            number.as_str(),
            "comments",
        ])?;
        self.get_page::<payload::Comment, _>(url, &[], page).await
    }

    async fn repository_comments(&self, repo: &Repository, page: Page) -> Result<Paged<Comment>> {
        let url = self.endpoint(&["repos", repo.owner.as_str(), repo.name.as_str(), "comments"])?;
        self.get_page::<payload::Comment, _>(url, &[], page).await
    }
}
