//! Result types shared by providers and the aggregation engine

mod types;

pub use types::*;
