use crate::db::repositories::{ID_CHUNK_SIZE, Repository, RepositoryError};
use crate::entities::{prelude::*, search_result_history};
use crate::models::search_result::{SearchResultPayload, SearchResultRecord};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

impl TryFrom<search_result_history::Model> for SearchResultRecord {
    type Error = serde_json::Error;

    fn try_from(model: search_result_history::Model) -> Result<Self, Self::Error> {
        let payload: SearchResultPayload = serde_json::from_str(&model.payload_json)?;

        Ok(Self {
            id: Some(model.id),
            search_term: model.search_term,
            owner: model.owner,
            timestamp: Some(model.timestamp),
            payload,
        })
    }
}

fn to_records(
    models: Vec<search_result_history::Model>,
) -> Result<Vec<SearchResultRecord>, RepositoryError> {
    models
        .into_iter()
        .map(|m| SearchResultRecord::try_from(m).map_err(RepositoryError::from))
        .collect()
}

pub struct SearchResultRepository {
    conn: DatabaseConnection,
}

impl SearchResultRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<SearchResultRecord> for SearchResultRepository {
    async fn save(&self, record: &SearchResultRecord) -> Result<SearchResultRecord, RepositoryError> {
        let id = record.id.ok_or(RepositoryError::Unstamped("id"))?;
        let timestamp = record
            .timestamp
            .ok_or(RepositoryError::Unstamped("timestamp"))?;

        let active_model = search_result_history::ActiveModel {
            id: Set(id),
            search_term: Set(record.search_term.clone()),
            owner: Set(record.owner.clone()),
            timestamp: Set(timestamp),
            payload_json: Set(serde_json::to_string(&record.payload)?),
        };

        let saved = active_model.insert(&self.conn).await?;
        Ok(SearchResultRecord::try_from(saved)?)
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<SearchResultRecord>, RepositoryError> {
        let rows = SearchResultHistory::find()
            .filter(search_result_history::Column::Owner.eq(owner))
            .all(&self.conn)
            .await?;

        to_records(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SearchResultRecord>, RepositoryError> {
        let row = SearchResultHistory::find_by_id(id).one(&self.conn).await?;

        row.map(SearchResultRecord::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    async fn find_all_by_ids(&self, ids: &[i64]) -> Result<Vec<SearchResultRecord>, RepositoryError> {
        let mut rows = Vec::with_capacity(ids.len().min(ID_CHUNK_SIZE));
        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            let found = SearchResultHistory::find()
                .filter(search_result_history::Column::Id.is_in(chunk.iter().copied()))
                .all(&self.conn)
                .await?;
            rows.extend(found);
        }

        to_records(rows)
    }

    async fn delete(&self, record: &SearchResultRecord) -> Result<(), RepositoryError> {
        let id = record.id.ok_or(RepositoryError::Unsaved)?;

        SearchResultHistory::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }

    async fn delete_all(&self, records: &[SearchResultRecord]) -> Result<(), RepositoryError> {
        let ids = records
            .iter()
            .map(|r| r.id.ok_or(RepositoryError::Unsaved))
            .collect::<Result<Vec<_>, _>>()?;

        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            SearchResultHistory::delete_many()
                .filter(search_result_history::Column::Id.is_in(chunk.iter().copied()))
                .exec(&self.conn)
                .await?;
        }

        Ok(())
    }
}
