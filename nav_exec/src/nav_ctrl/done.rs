//! # [`NavMode::Done`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{actuator::ActuatorCmd, perception::Snapshot};
use log::info;
use serde::Deserialize;

use super::{tm::MissionSummary, ModeAction, NavCtrlParams, NavPersistantData};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Done mode of the NavCtrl. The rover is home and the mission is complete.
///
/// There are no transitions out of Done.
#[derive(Debug, Clone, Default)]
pub struct Done;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DoneParams {
    pub brake: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for DoneParams {
    fn default() -> Self {
        Self { brake: 2.0 }
    }
}

impl Done {
    pub fn new() -> Self {
        Self
    }

    /// Build and log the mission summary. Called once, when Done is entered.
    pub fn summarise(snapshot: &Snapshot) -> MissionSummary {
        let summary = MissionSummary::from(&snapshot.stats);

        info!(
            "Returned home, mapped {:.1}% with {:.1}% fidelity in {:.1} s",
            summary.percent_mapped, summary.fidelity, summary.elapsed_s
        );
        info!(
            "Collected {} out of {} samples on the way",
            summary.samples_collected, summary.samples_total
        );
        info!("Mission complete");

        summary
    }

    pub fn act(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &mut NavPersistantData,
        _snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        cmd.set_brake(params.done.brake);
    }

    pub fn decide(
        &mut self,
        _params: &NavCtrlParams,
        _persistant: &NavPersistantData,
        _snapshot: &Snapshot,
    ) -> ModeAction {
        ModeAction::Stay
    }
}
