pub mod frost_aggregator;
pub mod preprocessor;

pub use frost_aggregator::{FrostAggregation, FrostAggregator};
pub use preprocessor::{PreprocessReport, Preprocessor};
