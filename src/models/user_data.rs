use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub user profile as returned by `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub login: String,
    #[serde(default)]
    pub id: i64,
    pub name: Option<String>,
    pub location: Option<String>,
    pub html_url: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
}

/// Snapshot of a fetched profile, stored per requesting owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataRecord {
    /// Assigned by the database on save.
    pub id: Option<i64>,
    pub login: String,
    pub location: Option<String>,
    pub name: Option<String>,
    pub search_time: DateTime<Utc>,
    pub owner_id: String,
}

impl UserDataRecord {
    #[must_use]
    pub fn snapshot(user_data: &UserData, owner_id: &str, search_time: DateTime<Utc>) -> Self {
        Self {
            id: None,
            login: user_data.login.clone(),
            location: user_data.location.clone(),
            name: user_data.name.clone(),
            search_time,
            owner_id: owner_id.to_string(),
        }
    }
}
