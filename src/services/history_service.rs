//! Domain service traits for search and profile history.
//!
//! Both services are thin facades over a [`Repository`]: they stamp the
//! bookkeeping fields (id, owner, time) and delegate. Neither validates its
//! string inputs; empty owners and search terms are stored as given.
//!
//! [`Repository`]: crate::db::Repository

use crate::db::RepositoryError;
use crate::models::search_result::SearchResultRecord;
use crate::models::user_data::{UserData, UserDataRecord};
use thiserror::Error;

/// Errors surfaced by the history services.
///
/// Storage failures pass through untouched; a missing record is never an
/// error.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[async_trait::async_trait]
pub trait SearchResultHistoryService: Send + Sync {
    /// Stamps `record` in place with `search_term`, `owner`, the current time
    /// and a freshly generated id, persists it and returns a copy.
    async fn insert(
        &self,
        record: &mut SearchResultRecord,
        search_term: &str,
        owner: &str,
    ) -> Result<SearchResultRecord, HistoryError>;

    /// Every record for `owner`. Order is whatever storage returns; do not
    /// rely on it being chronological.
    async fn get_history(&self, owner: &str) -> Result<Vec<SearchResultRecord>, HistoryError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<SearchResultRecord>, HistoryError>;

    /// Deletes the records one id at a time. Unknown ids are skipped.
    ///
    /// There is no surrounding transaction: if a later id fails, deletions
    /// already made stay deleted.
    async fn delete_history(&self, ids: &[i64]) -> Result<(), HistoryError>;
}

#[async_trait::async_trait]
pub trait UserDataHistoryService: Send + Sync {
    /// Persists a new snapshot of `user_data` for `owner_id`. The input is
    /// left untouched.
    async fn insert(
        &self,
        user_data: &UserData,
        owner_id: &str,
    ) -> Result<UserDataRecord, HistoryError>;

    /// Fetches all matching records, then deletes them as one set. The
    /// repository splits long id lists into several statements. Unknown ids
    /// are ignored, so repeating a call is harmless.
    async fn delete_entities(&self, ids: &[i64]) -> Result<(), HistoryError>;

    async fn get_history(&self, owner_id: &str) -> Result<Vec<UserDataRecord>, HistoryError>;
}
