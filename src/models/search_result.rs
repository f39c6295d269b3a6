use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a GitHub user search, kept verbatim alongside each history row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResultPayload {
    pub total_count: i64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<SearchResultItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub login: String,
    pub id: i64,
    pub url: String,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub score: f64,
}

/// One recorded search.
///
/// `id` and `timestamp` stay `None` until the record has been through
/// `SearchResultHistoryService::insert`, which fills them in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResultRecord {
    pub id: Option<i64>,
    pub search_term: String,
    pub owner: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub payload: SearchResultPayload,
}

impl SearchResultRecord {
    #[must_use]
    pub fn new(payload: SearchResultPayload) -> Self {
        Self {
            payload,
            ..Default::default()
        }
    }
}
