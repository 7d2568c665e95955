//! Analytics projection and refresh engine behind a sales-performance dashboard.
//!
//! The crate turns a handful of denormalized records into presentation-ready
//! structures (chart series, summaries, table rows) and simulates a live data
//! source by perturbing those records. Rendering is left to the consumer.

pub mod config;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod projection;
pub mod query;
pub mod refresh;
pub mod reports;
pub mod seed;
pub mod store;
pub mod summary;
