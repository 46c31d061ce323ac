//! # Perception Snapshot
//!
//! The snapshot is produced once per tick by the perception pipeline and is read-only to the
//! navigation controller. Nothing in it is retained across ticks.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Distance reported when no candidate sample pixels are visible.
///
/// Large enough that every "sample in range" check fails.
pub const NO_SAMPLE_DIST_PX: f64 = 1.0e9;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single perception snapshot.
///
/// The `Default` value is the empty snapshot: no position, no navigable terrain and no sample in
/// view. Missing fields in a serialized snapshot take their default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Snapshot {
    /// Rover position in the world frame, `None` until localisation is available.
    ///
    /// Units: meters
    pub position_m: Option<Point2<f64>>,

    /// Rover forward velocity.
    ///
    /// Units: meters/second
    pub velocity_ms: f64,

    /// Rover heading.
    ///
    /// Units: degrees
    pub yaw_deg: f64,

    /// Bearings of the navigable terrain pixels, positive counter-clockwise from the rover's
    /// forward axis. `None` or empty means there is no usable forward visibility.
    ///
    /// Units: radians
    pub nav_angles_rad: Option<Vec<f64>>,

    /// Mean distance to the candidate sample pixels, or [`NO_SAMPLE_DIST_PX`] if none.
    ///
    /// Units: pixels (rover frame)
    pub sample_dist_px: f64,

    /// Mean bearing of the candidate sample pixels, or `0.0` if none.
    ///
    /// Units: radians
    pub sample_angle_rad: f64,

    /// An obstacle blocks the way directly ahead.
    pub obstacle_ahead: bool,

    /// There is too little navigable terrain directly ahead.
    pub wall_ahead: bool,

    /// A sample is visible in the camera frame.
    pub sees_sample: bool,

    /// The rover is close enough to pick up a sample.
    pub near_sample: bool,

    /// A pickup action is currently in progress.
    pub picking_up: bool,

    /// Mission statistics from the mapping subsystem.
    pub stats: MissionStats,
}

/// Mission progress statistics, read but never written by the controller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MissionStats {
    /// Percentage of the world map that has been mapped.
    pub percent_mapped: f64,

    /// Percentage of mapped cells that agree with ground truth.
    pub fidelity: f64,

    /// Time since the mission began.
    ///
    /// Units: seconds
    pub elapsed_s: f64,

    pub samples_collected: u32,

    pub samples_total: u32,
}

/// Reduced view of the candidate sample pixels in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSighting {
    pub dist_px: f64,
    pub angle_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            position_m: None,
            velocity_ms: 0.0,
            yaw_deg: 0.0,
            nav_angles_rad: None,
            sample_dist_px: NO_SAMPLE_DIST_PX,
            sample_angle_rad: 0.0,
            obstacle_ahead: false,
            wall_ahead: false,
            sees_sample: false,
            near_sample: false,
            picking_up: false,
            stats: MissionStats::default(),
        }
    }
}

impl Snapshot {
    /// Return the navigable terrain angles, or `None` if there are none.
    ///
    /// An empty list is treated the same as an absent one.
    pub fn nav_angles(&self) -> Option<&[f64]> {
        match self.nav_angles_rad {
            Some(ref a) if !a.is_empty() => Some(a.as_slice()),
            _ => None,
        }
    }

    /// Set the sample distance and angle from a sighting.
    pub fn set_sample_sighting(&mut self, sighting: SampleSighting) {
        self.sample_dist_px = sighting.dist_px;
        self.sample_angle_rad = sighting.angle_rad;
    }
}

impl SampleSighting {
    /// The sighting used when no candidate pixels are visible.
    pub const NONE: SampleSighting = SampleSighting {
        dist_px: NO_SAMPLE_DIST_PX,
        angle_rad: 0.0,
    };

    /// Build a sighting from the polar coordinates of the candidate sample pixels.
    ///
    /// Distance and angle are the means over all pixels. If there are no pixels, or the slices
    /// differ in length, [`SampleSighting::NONE`] is returned.
    pub fn from_polar(dists_px: &[f64], angles_rad: &[f64]) -> Self {
        if dists_px.is_empty() || dists_px.len() != angles_rad.len() {
            return Self::NONE;
        }

        let n = dists_px.len() as f64;

        Self {
            dist_px: dists_px.iter().sum::<f64>() / n,
            angle_rad: angles_rad.iter().sum::<f64>() / n,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
