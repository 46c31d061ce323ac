//! # Navigation library.
//!
//! This library allows other crates in the workspace to access the rover's navigation controller.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Navigation controller - turns perception snapshots into actuator commands
pub mod nav_ctrl;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use nav_ctrl::{NavCtrl, NavCtrlError, NavCtrlParams, NavMode, NavModeKind, NavTm};
