//! Validation rules and the rule registry shared by schemas and sets.

mod rule;
mod validators;

pub use rule::Rule;
pub use validators::{Validatable, Validators};
