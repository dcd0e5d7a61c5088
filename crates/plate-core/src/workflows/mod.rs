//! # Workflows Module
//!
//! High-level entry points that tie the engine and the plate model together.
//!
//! - **Overflow Workflow** ([`overflow`]) - lays a sample queue out over as
//!   many plates as needed, building a fresh calibrated grid for each plate and
//!   failing fast when some group can never fit a row.

pub mod overflow;
