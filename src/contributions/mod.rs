pub mod client;
pub mod normalize;
pub mod source;

pub use client::ContributionClient;
pub use normalize::normalize_calendar;
pub use source::{ContributionSource, YearSelector};
