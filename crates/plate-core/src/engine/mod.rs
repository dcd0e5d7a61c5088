//! # Engine Module
//!
//! The placement engine: the greedy first-fit scheduler and the configuration,
//! progress, and error types around it.
//!
//! - **Scheduling** ([`scheduler`]) - row-bounded first-fit placement with front reinsertion of split groups
//! - **Configuration** ([`config`]) - plate geometry, standards, and design builder
//! - **Progress Monitoring** ([`progress`]) - per-plate progress callbacks
//! - **Error Handling** ([`error`]) - configuration, group, and starvation errors

pub mod config;
pub mod error;
pub mod progress;
pub mod scheduler;
