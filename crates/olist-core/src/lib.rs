pub mod error;
pub mod types;
pub mod enrichment;
pub mod filter;
pub mod aggregations;
pub mod delays;
pub mod reviews;
pub mod summary;
pub mod geo;
