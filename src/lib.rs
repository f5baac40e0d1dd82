pub mod errors;
pub mod geometry;
pub mod hashed_list;
#[cfg(feature = "setup_tracing")]
mod logging;
pub mod metric_tree;
pub mod poly_fit;
pub mod selectors;
pub mod track_fit;
