//! Request handlers.

pub mod health;
pub mod summarize;

pub use health::*;
pub use summarize::*;
