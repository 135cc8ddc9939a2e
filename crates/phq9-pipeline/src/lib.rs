//! phq9-pipeline
//!
//! The PHQ-9 screening runtime. For every person the host knows about it
//! registers nine question inputs and a difficulty input, then keeps three
//! derived sensors current:
//!
//! - total score: sum of the nine item weights, recomputed on every change
//! - score interpretation: severity band of the total score sensor's value
//! - last evaluated: when any of the ten inputs last changed
//!
//! Each sensor first discovers the entities it reads with a bounded retry,
//! then reacts to their change notifications from a single task.
//!
//! Public API:
//! - `Phq9Integration::setup()` / `unload()`: full lifecycle, reloading on
//!   person registry changes
//! - `SubjectPipeline`: one subject's entities and sensors
//! - `select_option()`: the writable input surface
//! - `snapshot()`: read a subject's screening back from the host

pub mod clock;
pub mod config;
pub mod discovery;
pub mod entities;
pub mod error;
pub mod input;
pub mod integration;
pub mod sensor;
pub mod sensors;
pub mod snapshot;
pub mod subject;

pub use crate::clock::{Clock, SystemClock};
pub use crate::config::{ConfigError, Phq9Config};
pub use crate::discovery::{DiscoveryOutcome, DiscoveryState, RetryPolicy};
pub use crate::error::PipelineError;
pub use crate::input::select_option;
pub use crate::integration::Phq9Integration;
pub use crate::snapshot::snapshot;
pub use crate::subject::SubjectPipeline;
