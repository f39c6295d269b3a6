use crate::config::GithubConfig;
use crate::models::search_result::SearchResultPayload;
use crate::models::user_data::UserData;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const ACCEPT: &str = "application/vnd.github+json";

/// The slice of the GitHub REST API this crate consumes.
#[async_trait]
pub trait GithubApi: Send + Sync {
    async fn search_users(&self, query: &str) -> Result<SearchResultPayload>;

    /// `None` when GitHub has no user with that login.
    async fn get_user(&self, login: &str) -> Result<Option<UserData>>;
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self::with_shared_client(client, &config.api_url))
    }

    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/users?q={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    fn user_url(&self, login: &str) -> String {
        format!("{}/users/{}", self.base_url, urlencoding::encode(login))
    }

    async fn error_from(response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::anyhow!("GitHub API error: {status} - {body}")
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn search_users(&self, query: &str) -> Result<SearchResultPayload> {
        let response = self
            .client
            .get(self.search_url(query))
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .await
            .context("GitHub user search request failed")?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let payload = response
            .json::<SearchResultPayload>()
            .await
            .context("Failed to decode GitHub search response")?;

        Ok(payload)
    }

    async fn get_user(&self, login: &str) -> Result<Option<UserData>> {
        let response = self
            .client
            .get(self.user_url(login))
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .await
            .context("GitHub user request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let user = response
            .json::<UserData>()
            .await
            .context("Failed to decode GitHub user response")?;

        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GithubClient {
        GithubClient::with_shared_client(Client::new(), "https://api.github.com/")
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = client().search_url("tom location:berlin");
        assert_eq!(
            url,
            "https://api.github.com/search/users?q=tom%20location%3Aberlin"
        );
    }

    #[test]
    fn test_user_url() {
        assert_eq!(
            client().user_url("octocat"),
            "https://api.github.com/users/octocat"
        );
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "login": "mojombo",
                    "id": 1,
                    "node_id": "MDQ6VXNlcjE=",
                    "avatar_url": "https://avatars.githubusercontent.com/u/1?v=4",
                    "url": "https://api.github.com/users/mojombo",
                    "html_url": "https://github.com/mojombo",
                    "type": "User",
                    "site_admin": false,
                    "score": 1.0
                },
                {
                    "login": "defunkt",
                    "id": 2,
                    "url": "https://api.github.com/users/defunkt",
                    "score": 0.5
                }
            ]
        }"#;

        let payload: SearchResultPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.total_count, 2);
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[0].login, "mojombo");
        assert_eq!(
            payload.items[0].html_url.as_deref(),
            Some("https://github.com/mojombo")
        );
        assert_eq!(payload.items[1].avatar_url, None);
    }

    #[test]
    fn test_parse_user_response_with_missing_optionals() {
        let body = r#"{
            "login": "ghost",
            "id": 10137,
            "name": null,
            "location": null,
            "html_url": "https://github.com/ghost",
            "public_repos": 0,
            "followers": 11000
        }"#;

        let user: UserData = serde_json::from_str(body).unwrap();
        assert_eq!(user.login, "ghost");
        assert_eq!(user.name, None);
        assert_eq!(user.location, None);
        assert_eq!(user.followers, 11_000);
    }
}
