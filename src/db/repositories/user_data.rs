use crate::db::repositories::{ID_CHUNK_SIZE, Repository, RepositoryError};
use crate::entities::{prelude::*, user_data_history};
use crate::models::user_data::UserDataRecord;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

impl From<user_data_history::Model> for UserDataRecord {
    fn from(model: user_data_history::Model) -> Self {
        Self {
            id: Some(model.id),
            login: model.login,
            location: model.location,
            name: model.name,
            search_time: model.search_time,
            owner_id: model.owner_id,
        }
    }
}

pub struct UserDataRepository {
    conn: DatabaseConnection,
}

impl UserDataRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<UserDataRecord> for UserDataRepository {
    async fn save(&self, record: &UserDataRecord) -> Result<UserDataRecord, RepositoryError> {
        let active_model = user_data_history::ActiveModel {
            id: record.id.map_or(NotSet, Set),
            login: Set(record.login.clone()),
            location: Set(record.location.clone()),
            name: Set(record.name.clone()),
            search_time: Set(record.search_time),
            owner_id: Set(record.owner_id.clone()),
        };

        let saved = active_model.insert(&self.conn).await?;
        Ok(saved.into())
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<UserDataRecord>, RepositoryError> {
        let rows = UserDataHistory::find()
            .filter(user_data_history::Column::OwnerId.eq(owner))
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(UserDataRecord::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserDataRecord>, RepositoryError> {
        let row = UserDataHistory::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(UserDataRecord::from))
    }

    async fn find_all_by_ids(&self, ids: &[i64]) -> Result<Vec<UserDataRecord>, RepositoryError> {
        let mut rows = Vec::with_capacity(ids.len().min(ID_CHUNK_SIZE));
        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            let found = UserDataHistory::find()
                .filter(user_data_history::Column::Id.is_in(chunk.iter().copied()))
                .all(&self.conn)
                .await?;
            rows.extend(found);
        }

        Ok(rows.into_iter().map(UserDataRecord::from).collect())
    }

    async fn delete(&self, record: &UserDataRecord) -> Result<(), RepositoryError> {
        let id = record.id.ok_or(RepositoryError::Unsaved)?;

        UserDataHistory::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }

    async fn delete_all(&self, records: &[UserDataRecord]) -> Result<(), RepositoryError> {
        let ids = records
            .iter()
            .map(|r| r.id.ok_or(RepositoryError::Unsaved))
            .collect::<Result<Vec<_>, _>>()?;

        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            UserDataHistory::delete_many()
                .filter(user_data_history::Column::Id.is_in(chunk.iter().copied()))
                .exec(&self.conn)
                .await?;
        }

        Ok(())
    }
}
