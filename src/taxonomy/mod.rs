pub mod languages;

pub use languages::{language_color, DEFAULT_LANGUAGE_COLOR};
