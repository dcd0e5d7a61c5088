//! # Core Module
//!
//! Plate and sample data structures plus layout file I/O.
//!
//! - **Plate Representation** ([`models`]) - wells, grids, calibration, groups, assignments
//! - **File I/O** ([`io`]) - reading and writing plate layouts as CSV

pub mod io;
pub mod models;
