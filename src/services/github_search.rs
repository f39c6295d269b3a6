//! Runs GitHub lookups on behalf of an owner and records them in history.

use crate::clients::github::GithubApi;
use crate::models::search_result::SearchResultRecord;
use crate::models::user_data::UserDataRecord;
use crate::services::history_service::{
    HistoryError, SearchResultHistoryService, UserDataHistoryService,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum GithubSearchError {
    #[error("GitHub request failed: {0:#}")]
    Upstream(anyhow::Error),

    #[error(transparent)]
    History(#[from] HistoryError),
}

pub struct GithubSearchService {
    github: Arc<dyn GithubApi>,
    search_history: Arc<dyn SearchResultHistoryService>,
    user_history: Arc<dyn UserDataHistoryService>,
}

impl GithubSearchService {
    #[must_use]
    pub fn new(
        github: Arc<dyn GithubApi>,
        search_history: Arc<dyn SearchResultHistoryService>,
        user_history: Arc<dyn UserDataHistoryService>,
    ) -> Self {
        Self {
            github,
            search_history,
            user_history,
        }
    }

    /// Searches GitHub users and stores the result page in `owner`'s history.
    pub async fn search_users(
        &self,
        query: &str,
        owner: &str,
    ) -> Result<SearchResultRecord, GithubSearchError> {
        let payload = self.github.search_users(query).await.map_err(|e| {
            warn!(query, error = %e, "GitHub user search failed");
            GithubSearchError::Upstream(e)
        })?;

        info!(
            query,
            owner,
            total_count = payload.total_count,
            "GitHub user search completed"
        );

        let mut record = SearchResultRecord::new(payload);
        Ok(self.search_history.insert(&mut record, query, owner).await?)
    }

    /// Fetches a profile and stores a snapshot in `owner`'s history.
    /// Unknown logins return `None` and record nothing.
    pub async fn lookup_user(
        &self,
        login: &str,
        owner: &str,
    ) -> Result<Option<UserDataRecord>, GithubSearchError> {
        let user = self.github.get_user(login).await.map_err(|e| {
            warn!(login, error = %e, "GitHub user lookup failed");
            GithubSearchError::Upstream(e)
        })?;

        let Some(user) = user else {
            info!(login, "GitHub user not found");
            return Ok(None);
        };

        Ok(Some(self.user_history.insert(&user, owner).await?))
    }
}
