use crate::{network, GithubClient};
use manifest::api::{Error, Result};
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use url::Url;

pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        Self {
            client_builder: ClientBuilder::default(),
            github_url: DEFAULT_GITHUB_URL.to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    /// Authenticates every request with `Authorization: Bearer <token>`.
    pub fn try_with_token(mut self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| Error::Config("GitHub token is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        Ok(self)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    pub fn build(self) -> Result<GithubClient> {
        let github_url = Url::parse(&self.github_url)
            .map_err(|err| Error::Config(format!("Invalid GitHub URL {}: {}", self.github_url, err)))?;
        if github_url.cannot_be_a_base() {
            return Err(Error::Config(format!("GitHub URL {} cannot be a base", github_url)));
        }
        let client = self.client_builder.default_headers(self.headers).build().map_err(network)?;
        Ok(GithubClient { client, github_url })
    }
}
