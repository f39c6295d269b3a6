use crate::models::search_result::SearchResultRecord;
use crate::models::user_data::UserDataRecord;
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::{
    Repository, RepositoryError, SearchResultRepository, UserDataRepository,
};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        // Every pooled connection to an in-memory database would see its own empty schema.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to database: {db_url}"))?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn search_result_repo(&self) -> Arc<dyn Repository<SearchResultRecord>> {
        Arc::new(SearchResultRepository::new(self.conn.clone()))
    }

    #[must_use]
    pub fn user_data_repo(&self) -> Arc<dyn Repository<UserDataRecord>> {
        Arc::new(UserDataRepository::new(self.conn.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search_result::{SearchResultItem, SearchResultPayload};
    use chrono::Utc;

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:")
            .await
            .expect("in-memory store should open")
    }

    fn stamped(id: i64, owner: &str) -> SearchResultRecord {
        SearchResultRecord {
            id: Some(id),
            search_term: "rust".to_string(),
            owner: owner.to_string(),
            timestamp: Some(Utc::now()),
            payload: SearchResultPayload {
                total_count: 1,
                incomplete_results: false,
                items: vec![SearchResultItem {
                    login: "ferris".to_string(),
                    id: 7,
                    url: "https://api.github.com/users/ferris".to_string(),
                    html_url: None,
                    avatar_url: None,
                    score: 1.0,
                }],
            },
        }
    }

    #[tokio::test]
    async fn ping_succeeds_after_migrations() {
        let store = memory_store().await;
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn search_result_repo_round_trips_payload() {
        let repo = memory_store().await.search_result_repo();
        let record = stamped(42, "alice");

        let saved = repo.save(&record).await.unwrap();
        assert_eq!(saved, record);

        let found = repo.find_by_id(42).await.unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn search_result_repo_rejects_unstamped_records() {
        let repo = memory_store().await.search_result_repo();
        let record = SearchResultRecord::default();

        let err = repo.save(&record).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unstamped("id")));
    }

    #[tokio::test]
    async fn duplicate_search_result_id_is_a_database_error() {
        let repo = memory_store().await.search_result_repo();
        repo.save(&stamped(1, "alice")).await.unwrap();

        let err = repo.save(&stamped(1, "bob")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[tokio::test]
    async fn find_all_by_ids_skips_unknown_ids() {
        let repo = memory_store().await.search_result_repo();
        repo.save(&stamped(1, "alice")).await.unwrap();
        repo.save(&stamped(2, "alice")).await.unwrap();

        let found = repo.find_all_by_ids(&[2, 99]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(2));

        assert!(repo.find_all_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn user_data_repo_assigns_ids() {
        let repo = memory_store().await.user_data_repo();
        let record = UserDataRecord {
            id: None,
            login: "octocat".to_string(),
            location: Some("San Francisco".to_string()),
            name: None,
            search_time: Utc::now(),
            owner_id: "alice".to_string(),
        };

        let first = repo.save(&record).await.unwrap();
        let second = repo.save(&record).await.unwrap();

        assert!(first.id.is_some());
        assert_ne!(first.id, second.id);
        assert_eq!(first.login, "octocat");
        assert_eq!(first.name, None);
    }

    #[tokio::test]
    async fn deleting_unsaved_record_is_rejected() {
        let repo = memory_store().await.search_result_repo();
        let err = repo.delete(&SearchResultRecord::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unsaved));
    }

    #[tokio::test]
    async fn bulk_id_queries_are_split_below_the_sqlite_variable_limit() {
        let repo = memory_store().await.search_result_repo();
        repo.save(&stamped(7, "alice")).await.unwrap();
        repo.save(&stamped(40_000, "alice")).await.unwrap();

        let ids: Vec<i64> = (1..=40_001).collect();
        let found = repo.find_all_by_ids(&ids).await.unwrap();
        assert_eq!(found.len(), 2);

        repo.delete_all(&found).await.unwrap();
        assert!(repo.find_by_owner("alice").await.unwrap().is_empty());
    }
}
