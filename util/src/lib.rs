//! Utility library for the rover navigation software

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod logger;
pub mod maths;
pub mod params;
pub mod session;
pub mod time;
