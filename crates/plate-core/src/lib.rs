//! # ELISA Plate Layout Library
//!
//! A deterministic layout engine for ELISA assay plates. It places groups of
//! biologically linked samples (one subject across several timepoints, each
//! measured in replicate) onto the sample wells of a plate, keeps a reserved
//! region for the calibration standards, and spreads overflow across as many
//! plates as the design needs.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Value types for the plate (`Well`,
//!   `PlateGrid`), the sample queue (`Group`, `GroupQueue`), scheduler output
//!   (`Assignment`, `PlacementResult`), and the CSV layout format.
//!
//! - **[`engine`]: The Logic Core.** The greedy row-bounded first-fit
//!   scheduler, configuration, progress reporting, and the error taxonomy.
//!
//! - **[`workflows`]: The Public API.** The multi-plate overflow workflow that
//!   chains leftovers onto fresh plates and detects groups that can never fit.

pub mod core;
pub mod engine;
pub mod workflows;
