pub mod analytics;
pub mod api_client;
pub mod auth_api;
pub mod category_api;
pub mod transaction_api;

pub use api_client::ApiClient;
pub use auth_api::AuthApi;
pub use category_api::CategoryApi;
pub use transaction_api::TransactionApi;
