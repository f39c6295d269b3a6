//! Repository-backed implementation of `SearchResultHistoryService`.

use crate::db::Repository;
use crate::ids::IdGenerator;
use crate::models::search_result::SearchResultRecord;
use crate::services::history_service::{HistoryError, SearchResultHistoryService};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

pub struct DefaultSearchResultHistoryService {
    repository: Arc<dyn Repository<SearchResultRecord>>,
    ids: Arc<dyn IdGenerator>,
}

impl DefaultSearchResultHistoryService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn Repository<SearchResultRecord>>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { repository, ids }
    }
}

#[async_trait]
impl SearchResultHistoryService for DefaultSearchResultHistoryService {
    async fn insert(
        &self,
        record: &mut SearchResultRecord,
        search_term: &str,
        owner: &str,
    ) -> Result<SearchResultRecord, HistoryError> {
        record.search_term = search_term.to_string();
        record.timestamp = Some(Utc::now());
        record.id = Some(self.ids.next_globally_unique());
        record.owner = owner.to_string();

        self.repository.save(record).await?;

        debug!(id = ?record.id, owner, search_term, "Recorded search result");
        Ok(record.clone())
    }

    async fn get_history(&self, owner: &str) -> Result<Vec<SearchResultRecord>, HistoryError> {
        Ok(self.repository.find_by_owner(owner).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<SearchResultRecord>, HistoryError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    async fn delete_history(&self, ids: &[i64]) -> Result<(), HistoryError> {
        for &id in ids {
            match self.repository.find_by_id(id).await? {
                Some(record) => {
                    self.repository.delete(&record).await?;
                    debug!(id, "Deleted search result");
                }
                None => debug!(id, "Search result not found, skipping delete"),
            }
        }

        Ok(())
    }
}
