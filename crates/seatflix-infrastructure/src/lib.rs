pub mod config_service;
pub mod paths;
pub mod storage;
pub mod trending_repository;

pub use crate::config_service::ConfigService;
pub use crate::storage::FileDurableStorage;
pub use crate::trending_repository::FileTrendingRepository;
