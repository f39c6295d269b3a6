use std::sync::Arc;

use crate::clients::github::{GithubApi, GithubClient};
use crate::config::Config;
use crate::db::Store;
use crate::ids::{IdGenerator, SequenceGenerator};
use crate::services::{
    DefaultSearchResultHistoryService, DefaultUserDataHistoryService, GithubSearchService,
    SearchResultHistoryService, UserDataHistoryService,
};

/// Owns every long-lived component and wires them together.
#[derive(Clone)]
pub struct SharedState {
    pub store: Store,

    pub ids: Arc<dyn IdGenerator>,

    pub github: Arc<dyn GithubApi>,

    pub search_history: Arc<dyn SearchResultHistoryService>,

    pub user_history: Arc<dyn UserDataHistoryService>,

    pub github_search: Arc<GithubSearchService>,
}

impl SharedState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let github = Arc::new(GithubClient::new(&config.github)?);
        Self::with_github(config, github).await
    }

    /// Like [`SharedState::new`] but talks to GitHub through `github`.
    pub async fn with_github(config: &Config, github: Arc<dyn GithubApi>) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let ids: Arc<dyn IdGenerator> = Arc::new(SequenceGenerator::new(config.ids.node_id));

        let search_history = Arc::new(DefaultSearchResultHistoryService::new(
            store.search_result_repo(),
            ids.clone(),
        )) as Arc<dyn SearchResultHistoryService>;

        let user_history = Arc::new(DefaultUserDataHistoryService::new(store.user_data_repo()))
            as Arc<dyn UserDataHistoryService>;

        let github_search = Arc::new(GithubSearchService::new(
            github.clone(),
            search_history.clone(),
            user_history.clone(),
        ));

        Ok(Self {
            store,
            ids,
            github,
            search_history,
            user_history,
            github_search,
        })
    }
}
