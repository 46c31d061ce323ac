//! # [`NavMode::Idle`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{actuator::ActuatorCmd, perception::Snapshot};

use super::{ModeAction, NavCtrlParams, NavModeKind, NavPersistantData};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Idle mode of the NavCtrl, waiting for the rover to get sight of navigable terrain.
///
/// Possible transitions:
/// - WallFollow, once navigable terrain is visible
#[derive(Debug, Clone, Default)]
pub struct Idle;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Idle {
    pub fn new() -> Self {
        Self
    }

    /// Idle leaves the actuator command untouched.
    pub fn act(
        &mut self,
        _params: &NavCtrlParams,
        _persistant: &mut NavPersistantData,
        _snapshot: &Snapshot,
        _cmd: &mut ActuatorCmd,
    ) {
    }

    pub fn decide(
        &mut self,
        _params: &NavCtrlParams,
        _persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        match snapshot.nav_angles() {
            Some(_) => ModeAction::Switch(NavModeKind::WallFollow),
            None => ModeAction::Stay,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_idle_waits_for_sight() {
        let params = NavCtrlParams::default();
        let persistant = NavPersistantData::default();
        let mut idle = Idle::new();

        let mut snap = Snapshot::default();
        assert_eq!(idle.decide(&params, &persistant, &snap), ModeAction::Stay);

        snap.nav_angles_rad = Some(vec![]);
        assert_eq!(idle.decide(&params, &persistant, &snap), ModeAction::Stay);

        snap.nav_angles_rad = Some(vec![0.2]);
        assert_eq!(
            idle.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::WallFollow)
        );
    }
}
