//! Repository-backed implementation of `UserDataHistoryService`.

use crate::db::Repository;
use crate::models::user_data::{UserData, UserDataRecord};
use crate::services::history_service::{HistoryError, UserDataHistoryService};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

pub struct DefaultUserDataHistoryService {
    repository: Arc<dyn Repository<UserDataRecord>>,
}

impl DefaultUserDataHistoryService {
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<UserDataRecord>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserDataHistoryService for DefaultUserDataHistoryService {
    async fn insert(
        &self,
        user_data: &UserData,
        owner_id: &str,
    ) -> Result<UserDataRecord, HistoryError> {
        let record = UserDataRecord::snapshot(user_data, owner_id, Utc::now());
        let saved = self.repository.save(&record).await?;

        debug!(id = ?saved.id, owner_id, login = %saved.login, "Recorded user data");
        Ok(saved)
    }

    async fn delete_entities(&self, ids: &[i64]) -> Result<(), HistoryError> {
        let records = self.repository.find_all_by_ids(ids).await?;
        self.repository.delete_all(&records).await?;

        debug!(
            requested = ids.len(),
            deleted = records.len(),
            "Deleted user data history"
        );
        Ok(())
    }

    async fn get_history(&self, owner_id: &str) -> Result<Vec<UserDataRecord>, HistoryError> {
        Ok(self.repository.find_by_owner(owner_id).await?)
    }
}
