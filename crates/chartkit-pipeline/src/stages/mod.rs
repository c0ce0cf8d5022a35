//! Stage implementations
//!
//! Each stage is a pure function from the previous stage's output to a new
//! value; the orchestrator owns sequencing, timing and status.

pub mod preprocess;
pub mod transform;
pub mod validate;
