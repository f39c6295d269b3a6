pub mod search_result;
pub mod user_data;

pub use search_result::{SearchResultItem, SearchResultPayload, SearchResultRecord};
pub use user_data::{UserData, UserDataRecord};
