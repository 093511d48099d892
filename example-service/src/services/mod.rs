pub mod database;
pub mod error;
pub mod example_service;
pub mod filter;
pub mod memory;
pub mod metrics;
pub mod pagination;
pub mod repository;

pub use database::StoreClient;
pub use error::RepositoryError;
pub use example_service::ExampleService;
pub use filter::{Condition, ExampleField, ExampleFilter, FilterValue, Operator};
pub use memory::InMemoryExampleRepository;
pub use self::metrics::{get_metrics, init_metrics, record_store_operation};
pub use pagination::{Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use repository::{ExampleRepository, MongoExampleRepository, EXAMPLES_COLLECTION};
