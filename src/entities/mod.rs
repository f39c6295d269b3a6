pub mod prelude;

pub mod search_result_history;
pub mod user_data_history;
