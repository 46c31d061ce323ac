//! # Actuator Command
//!
//! The command produced by the navigation controller each tick for the actuation layer.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Maximum absolute steering angle that can be demanded.
///
/// Units: degrees
pub const STEER_LIMIT_DEG: f64 = 15.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Actuator demands for the rover.
///
/// The command is a long-lived record: a field that is not written on a given tick keeps the value
/// it had on the previous tick. Writes go through the setters so that the steering limit and the
/// non-negative brake always hold.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ActuatorCmd {
    /// Throttle demand, negative values reverse.
    throttle: f64,

    /// Brake demand, never negative.
    brake: f64,

    /// Steering demand, positive to the left.
    ///
    /// Units: degrees
    steer_deg: f64,

    /// Level signal asking the actuation layer to start a sample pickup.
    pickup_request: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ActuatorCmd {
    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn brake(&self) -> f64 {
        self.brake
    }

    pub fn steer_deg(&self) -> f64 {
        self.steer_deg
    }

    pub fn pickup_request(&self) -> bool {
        self.pickup_request
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle;
    }

    /// Set the brake demand. Negative demands are clamped to zero.
    pub fn set_brake(&mut self, brake: f64) {
        self.brake = brake.max(0.0);
    }

    /// Set the steering demand, clamped to `[-STEER_LIMIT_DEG, STEER_LIMIT_DEG]`.
    pub fn set_steer(&mut self, steer_deg: f64) {
        self.steer_deg = steer_deg.max(-STEER_LIMIT_DEG).min(STEER_LIMIT_DEG);
    }

    pub fn set_pickup_request(&mut self, pickup_request: bool) {
        self.pickup_request = pickup_request;
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_setter_limits() {
        let mut cmd = ActuatorCmd::default();

        cmd.set_steer(40.0);
        assert_eq!(cmd.steer_deg(), STEER_LIMIT_DEG);
        cmd.set_steer(-16.0);
        assert_eq!(cmd.steer_deg(), -STEER_LIMIT_DEG);
        cmd.set_steer(3.0);
        assert_eq!(cmd.steer_deg(), 3.0);

        cmd.set_brake(-0.2);
        assert_eq!(cmd.brake(), 0.0);
        cmd.set_brake(10.0);
        assert_eq!(cmd.brake(), 10.0);

        cmd.set_throttle(-2.0);
        assert_eq!(cmd.throttle(), -2.0);
    }
}
