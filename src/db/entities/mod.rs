//! Database entities backing the prompt store.

pub mod prompt;
pub mod tag;

pub use prompt::*;
pub use tag::*;

/// Generate a nano ID (21 characters) for primary keys.
pub fn generate_nano_id() -> String {
    nanoid::nanoid!(21)
}
