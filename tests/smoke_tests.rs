//! Smoke test for the binary's bootstrap path.

use gitweb_history::config::Config;

#[tokio::test]
async fn run_prepares_a_fresh_database() {
    let dir = std::env::temp_dir().join(format!("gitweb-history-smoke-{}", uuid::Uuid::new_v4()));
    let db_path = dir.join("nested").join("history.db");

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    gitweb_history::run(config.clone()).await.unwrap();
    assert!(db_path.exists());

    // Migrations are idempotent across restarts.
    gitweb_history::run(config).await.unwrap();

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn run_rejects_invalid_config() {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.ids.node_id = 4096;

    assert!(gitweb_history::run(config).await.is_err());
}
