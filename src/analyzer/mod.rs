// Analyzer module: price statistics and table ordering for analysis records.

pub mod sorting;
pub mod statistics;

pub use sorting::{SortColumn, SortState, sort_by};
pub use statistics::{compute_buckets, compute_summary};
