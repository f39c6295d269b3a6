//! Persistence for the two history record types.
//!
//! Services only see the [`Repository`] trait, so they can be exercised
//! against any backing store. The sea-orm implementations live in the
//! submodules.

pub mod search_result;
pub mod user_data;

use async_trait::async_trait;
use thiserror::Error;

pub use search_result::SearchResultRepository;
pub use user_data::UserDataRepository;

/// Ids bound per `IN (...)` clause; SQLite caps variables per statement.
pub(crate) const ID_CHUNK_SIZE: usize = 500;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Stored payload could not be (de)serialized: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Record is missing its {0}")]
    Unstamped(&'static str),

    #[error("Record has not been saved")]
    Unsaved,
}

/// Keyed storage for one record type.
///
/// Every call is a single statement against the store; nothing here opens a
/// transaction spanning more than one call.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Persists `record` and returns it as stored, including any
    /// database-assigned id.
    async fn save(&self, record: &T) -> Result<T, RepositoryError>;

    /// All records belonging to `owner`, in whatever order the store yields.
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<T>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepositoryError>;

    /// Ids without a matching row are simply missing from the result.
    async fn find_all_by_ids(&self, ids: &[i64]) -> Result<Vec<T>, RepositoryError>;

    async fn delete(&self, record: &T) -> Result<(), RepositoryError>;

    /// Deletes every record in `records`, `ID_CHUNK_SIZE` ids per statement.
    async fn delete_all(&self, records: &[T]) -> Result<(), RepositoryError>;
}
