pub mod languages;
pub mod pipeline;
pub mod temporal;

pub use languages::LanguageAggregator;
pub use pipeline::WrapPipeline;
pub use temporal::{busiest_periods, BusiestPeriods};
