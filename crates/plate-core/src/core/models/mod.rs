//! # Core Models Module
//!
//! The entity model shared by the scheduler, the overflow workflow, and the
//! layout file format.
//!
//! ## Key Components
//!
//! - [`well`] - row labels and well addresses (`B5`)
//! - [`grid`] - the plate grid, its calibration standards, and well contents
//! - [`group`] - sample ids, replicate groups, and the placement queue
//! - [`assignment`] - scheduler output: assignments and leftovers
//! - [`experiment`] - expansion of subjects and timepoints into groups
//!
//! ## Usage
//!
//! ```ignore
//! use elisa_plate::core::models::{grid::PlateGrid, group::{Group, GroupQueue}};
//!
//! let grid = PlateGrid::build(8, 12, 1, &[0.0, 0.1, 0.2, 0.4, 0.8, 1.6, 3.2, 6.4])?;
//! let queue: GroupQueue = vec![Group::new(["M1_t1", "M1_t0"], 2)?].into();
//! ```

pub mod assignment;
pub mod experiment;
pub mod grid;
pub mod group;
pub mod well;
