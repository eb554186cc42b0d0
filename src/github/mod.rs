pub mod classifier;
pub mod client;
pub mod retry;
pub mod source;

pub use classifier::{classify_response, classify_status};
pub use client::GitHubClient;
pub use retry::RetryPolicy;
pub use source::GitHubSource;
