use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchResultHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchResultHistory::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SearchResultHistory::SearchTerm)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SearchResultHistory::Owner).string().not_null())
                    .col(
                        ColumnDef::new(SearchResultHistory::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SearchResultHistory::PayloadJson)
                            .text()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_result_history_owner")
                    .table(SearchResultHistory::Table)
                    .col(SearchResultHistory::Owner)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // SQLite only honours AUTOINCREMENT on an INTEGER primary key, which is 64-bit anyway.
        manager
            .create_table(
                Table::create()
                    .table(UserDataHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserDataHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserDataHistory::Login).string().not_null())
                    .col(ColumnDef::new(UserDataHistory::Location).string().null())
                    .col(ColumnDef::new(UserDataHistory::Name).string().null())
                    .col(
                        ColumnDef::new(UserDataHistory::SearchTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserDataHistory::OwnerId).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_data_history_owner_id")
                    .table(UserDataHistory::Table)
                    .col(UserDataHistory::OwnerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserDataHistory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SearchResultHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchResultHistory {
    Table,
    Id,
    SearchTerm,
    Owner,
    Timestamp,
    PayloadJson,
}

#[derive(DeriveIden)]
enum UserDataHistory {
    Table,
    Id,
    Login,
    Location,
    Name,
    SearchTime,
    OwnerId,
}
