pub mod examples;
pub mod health;

pub use examples::{create_example, delete_example, get_example, list_examples, update_example};
pub use health::{health_check, metrics_endpoint, openapi, readiness_check};
