//! Shared helpers: input limits and upload validation.

pub mod validation;
