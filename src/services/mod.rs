pub mod history_service;
pub use history_service::{HistoryError, SearchResultHistoryService, UserDataHistoryService};

pub mod search_history_service_impl;
pub use search_history_service_impl::DefaultSearchResultHistoryService;

pub mod user_data_history_service_impl;
pub use user_data_history_service_impl::DefaultUserDataHistoryService;

pub mod github_search;
pub use github_search::{GithubSearchError, GithubSearchService};
