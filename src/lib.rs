pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod contributions;
pub mod taxonomy;
pub mod analysis;
pub mod render;

pub use config::{Config, PipelineConfig};
pub use error::{Error, ErrorKind, Result};
pub use github::{GitHubClient, GitHubSource, RetryPolicy};
pub use contributions::{ContributionClient, ContributionSource, YearSelector};
pub use analysis::WrapPipeline;
