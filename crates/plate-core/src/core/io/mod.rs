//! Provides input/output for saved plate layouts.
//!
//! Layouts are exchanged as flat CSV tables so that a plate edited by hand
//! re-imports into the same well and assignment types without loss.

pub mod layout_csv;
