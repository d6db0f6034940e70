pub mod query_service;
pub mod visibility;

pub use query_service::QueryService;
pub use visibility::Visibility;
