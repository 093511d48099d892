pub mod example;
pub mod example_id;

pub use example::{Example, ExampleUpdate, NewExample};
pub use example_id::ExampleId;
