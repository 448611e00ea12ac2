use async_trait::async_trait;
use reqwest::{Client, Url};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, error};

use crate::error::agent_error::AgentError;
use crate::tools::model::{
    GithubUser, Repository, RepositorySearch, ToolFailure, ToolOutput, ToolResult, UserProfile,
};
use crate::tools::{Tool, parse_params};

pub const GITHUB_SEARCH_TOOL: &str = "github_search_repos";

const MAX_PAGE_SIZE: usize = 100;

fn default_max_results() -> usize {
    10
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    name: String,
    html_url: String,
    description: Option<String>,
    stargazers_count: u64,
    language: Option<String>,
    owner: RepoOwner,
    forks_count: u64,
    updated_at: String,
}

#[derive(Debug, Deserialize)]
struct RepoOwner {
    login: String,
}

impl From<RepoItem> for Repository {
    fn from(item: RepoItem) -> Self {
        Self {
            name: item.name,
            url: item.html_url,
            description: item.description,
            stars: item.stargazers_count,
            language: item.language,
            owner: item.owner.login,
            forks: item.forks_count,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    public_repos: u64,
    followers: u64,
    following: u64,
    html_url: String,
}

/// Repository search against the GitHub REST API.
pub struct GithubSearchTool {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubSearchTool {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("opsagent/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = &self.token {
            if let Ok(value) = HeaderValue::from_str(&format!("token {token}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    /// Searches repositories sorted by stars (descending), first page only.
    pub async fn search(&self, query: &str, max_results: usize) -> ToolResult {
        match self.fetch_repositories(query, max_results).await {
            Ok(results) => ToolResult::Success(ToolOutput::Repositories(RepositorySearch {
                query: query.to_string(),
                count: results.len(),
                results,
            })),
            Err(e) => {
                let e = e.without_url();
                error!(query, error = %e, "GitHub API error");
                ToolResult::Error(ToolFailure::for_query(e, query))
            }
        }
    }

    async fn fetch_repositories(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Repository>, reqwest::Error> {
        let per_page = max_results.min(MAX_PAGE_SIZE).to_string();
        debug!(query, per_page = %per_page, "searching repositories");

        let response = self
            .client
            .get(format!("{}/search/repositories", self.base_url))
            .headers(self.headers())
            .query(&[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        Ok(body
            .items
            .into_iter()
            .take(max_results)
            .map(Repository::from)
            .collect())
    }

    /// `{base}/users/{username}` with the name percent-encoded as one segment.
    fn user_url(&self, username: &str) -> Option<Url> {
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("users")
            .push(username);
        Some(url)
    }

    async fn fetch_user(&self, url: Url) -> Result<UserResponse, reqwest::Error> {
        self.client
            .get(url)
            .headers(self.headers())
            .send()
            .await?
            .error_for_status()?
            .json::<UserResponse>()
            .await
    }

    /// Public profile for `username`.
    pub async fn user_info(&self, username: &str) -> ToolResult {
        let Some(url) = self.user_url(username) else {
            error!(base_url = %self.base_url, "Invalid GitHub API base URL");
            return ToolResult::Error(ToolFailure::for_username(
                "invalid GitHub API base URL",
                username,
            ));
        };

        match self.fetch_user(url).await {
            Ok(user) => ToolResult::Success(ToolOutput::User(UserProfile {
                user: GithubUser {
                    login: user.login,
                    name: user.name,
                    bio: user.bio,
                    public_repos: user.public_repos,
                    followers: user.followers,
                    following: user.following,
                    url: user.html_url,
                },
            })),
            Err(e) => {
                let e = e.without_url();
                error!(username, error = %e, "GitHub API error");
                ToolResult::Error(ToolFailure::for_username(e, username))
            }
        }
    }
}

#[async_trait]
impl Tool for GithubSearchTool {
    fn name(&self) -> &str {
        GITHUB_SEARCH_TOOL
    }

    fn description(&self) -> &str {
        "Search GitHub repositories by query and get detailed information"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query (e.g., 'language:python stars:>1000')"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results (default: 10)",
                    "default": 10
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: &Map<String, Value>) -> Result<ToolResult, AgentError> {
        let params: SearchParams = parse_params(self.name(), params)?;
        Ok(self.search(&params.query, params.max_results).await)
    }
}
