//! Support modules for the `ordlista` binary, exposed as a library so
//! integration tests can exercise them directly.

pub mod exclusions;
pub mod output;
