pub use super::search_result_history::Entity as SearchResultHistory;
pub use super::user_data_history::Entity as UserDataHistory;
