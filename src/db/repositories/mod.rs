//! Repository implementations for database operations.

pub mod prompt;
pub mod tag;

pub use prompt::*;
pub use tag::*;
