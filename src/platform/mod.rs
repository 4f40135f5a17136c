//! Platform abstraction layer
//!
//! Browser-independent pieces of the shell:
//! - Input events (key names to held flags and commands)
//! - Time (fixed-step frame clock)

pub mod input;
pub mod time;

pub use input::{Command, InputTracker};
pub use time::FixedStep;
