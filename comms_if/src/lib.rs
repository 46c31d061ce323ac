//! # Communications interface crate.
//!
//! Provides the interface types exchanged between the navigation controller and its external
//! collaborators (perception and actuation).

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data definitions for equipment (perception in, actuation out)
pub mod eqpt;
