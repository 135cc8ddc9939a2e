//! phq9-core
//!
//! Pure domain types and entity naming conventions for the PHQ-9 screening
//! integration. No host or async dependency. This is the shared vocabulary
//! of every other crate in the workspace.

pub mod error;
pub mod keys;
pub mod models;

pub use crate::error::CoreError;
