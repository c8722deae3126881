//! Device description fetching and capability parsing.

pub mod description;
pub mod fetch;
pub mod resolver;

pub use description::{parse_capabilities, parse_description};
pub use fetch::{Description, DescriptionFetcher, HttpFetcher};
pub use resolver::{into_input_order, resolve, resolve_all, resolve_stream};
