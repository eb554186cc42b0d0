pub mod user;
pub mod contribution;
pub mod wrap;

pub use user::*;
pub use contribution::*;
pub use wrap::*;
