//! Query, aggregation and presentation logic.

pub mod cards;
pub mod charts;
pub mod client_filter;
pub mod import;
pub mod stats;
