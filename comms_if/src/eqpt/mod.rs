//! # Equipment Interface
//!
//! This module defines the interface structures passed between the navigation controller and the
//! equipment around it.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod actuator;
pub mod perception;
