//! # NavCtrl module
//!
//! This module implements the [`NavCtrl`] state machine, which drives the rover around an unknown
//! map, picking up any samples it comes across and returning home once the map is mostly
//! complete. Exactly one mode is active at a time:
//!
//! - `Idle` - No navigable terrain is visible, the actuator command is left untouched.
//! - `WallFollow` - Exploring the map by keeping the terrain edge on the left.
//! - `Stopped` - An obstacle or wall is ahead, the rover is brought to a stop.
//! - `SteerRight` - Turning right away from an obstacle.
//! - `ApproachSample` - Driving towards a sample that has been spotted.
//! - `CollectSample` - Holding still while the sample is picked up.
//! - `ReturnHome` - The map is mostly complete and home is nearby.
//! - `Done` - The rover is home and the mission is over. There is no way out of Done.
//! - `SetBack` - Reversing to free the rover after a stall.
//! - `Quicksand` - Spinning in place after reversing didn't free the rover.
//!
//! Each call to [`NavCtrl::tick`] runs the active mode's `decide` followed by the `act` of
//! whichever mode is active after the decision, both on the same [`Snapshot`].

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod approach_sample;
mod collect_sample;
mod done;
mod idle;
mod params;
mod quicksand;
mod return_home;
mod set_back;
mod steer_right;
mod stopped;
pub mod tm;
mod wall_follow;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{fmt::Display, path::Path};

use comms_if::eqpt::{actuator::ActuatorCmd, perception::Snapshot};
use log::{info, trace};
use nalgebra::Point2;
use serde::Serialize;

pub use self::{
    params::NavCtrlParams,
    tm::{MissionSummary, NavTm},
};

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub mod states {
    pub use super::approach_sample::{ApproachSample, ApproachSampleParams};
    pub use super::collect_sample::{CollectSample, CollectSampleParams};
    pub use super::done::{Done, DoneParams};
    pub use super::idle::Idle;
    pub use super::quicksand::{Quicksand, QuicksandParams};
    pub use super::return_home::{ReturnHome, ReturnHomeParams};
    pub use super::set_back::{SetBack, SetBackParams};
    pub use super::steer_right::{SteerRight, SteerRightParams};
    pub use super::stopped::{Stopped, StoppedParams};
    pub use super::wall_follow::{WallFollow, WallFollowParams};
}

use states::*;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Navigation controller
///
/// Owns the active mode and the actuator command, and steps them once per perception snapshot.
pub struct NavCtrl {
    /// Parameters for the NavCtrl and all its modes.
    params: NavCtrlParams,

    /// Data which is valid over all modes.
    persistant: NavPersistantData,

    /// The currently active mode.
    mode: NavMode,

    /// The actuator command.
    ///
    /// This is a single long-lived record, any field a mode doesn't write in its `act` keeps the
    /// value it had on the previous tick.
    cmd: ActuatorCmd,

    /// Telemetry packet describing the state of the controller.
    tm: NavTm,
}

/// Persistant data of the NavCtrl.
///
/// This is data which survives mode changes.
#[derive(Debug, Clone, Default)]
pub struct NavPersistantData {
    /// The rover's home position.
    pub home: HomePosition,
}

/// The position the rover must return to at the end of the mission.
///
/// Can only be set once, any later attempt to set it is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HomePosition(Option<Point2<f64>>);

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the navigation controller.
#[derive(Debug, thiserror::Error)]
pub enum NavCtrlError {
    #[error("Failed to load NavCtrlParams: {0}")]
    ParamLoadError(util::params::LoadError),
}

#[derive(Debug, Clone)]
pub enum NavMode {
    Idle(Idle),
    WallFollow(WallFollow),
    Stopped(Stopped),
    SteerRight(SteerRight),
    ApproachSample(ApproachSample),
    CollectSample(CollectSample),
    ReturnHome(ReturnHome),
    Done(Done),
    SetBack(SetBack),
    Quicksand(Quicksand),
}

/// The kind of a [`NavMode`], without any of its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavModeKind {
    Idle,
    WallFollow,
    Stopped,
    SteerRight,
    ApproachSample,
    CollectSample,
    ReturnHome,
    Done,
    SetBack,
    Quicksand,
}

/// Action to perform at the end of a mode's decide function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    /// Keep the current mode, including its state.
    Stay,

    /// Switch to a fresh instance of the given mode.
    Switch(NavModeKind),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavCtrl {
    /// Create a new controller in Idle.
    pub fn new(params: NavCtrlParams) -> Self {
        let mut nav_ctrl = Self {
            params,
            persistant: NavPersistantData::default(),
            mode: NavMode::Idle(Idle::new()),
            cmd: ActuatorCmd::default(),
            tm: NavTm::default(),
        };

        info!("NavCtrl mode change to: {}", nav_ctrl.mode);

        // Idle doesn't write anything, this only puts Idle through its startup step
        nav_ctrl.mode.act(
            &nav_ctrl.params,
            &mut nav_ctrl.persistant,
            &Snapshot::default(),
            &mut nav_ctrl.cmd,
        );

        nav_ctrl
    }

    /// Load the parameters from the given file and create a new controller.
    pub fn init<P: AsRef<Path>>(params_path: P) -> Result<Self, NavCtrlError> {
        let params: NavCtrlParams = match util::params::load(params_path.as_ref()) {
            Ok(p) => p,
            Err(e) => return Err(NavCtrlError::ParamLoadError(e)),
        };

        info!("NavCtrlParams loaded from {:?}", params_path.as_ref());

        Ok(Self::new(params))
    }

    /// Run the controller on a new snapshot, returning the resulting actuator command.
    pub fn tick(&mut self, snapshot: &Snapshot) -> ActuatorCmd {
        let action = self
            .mode
            .decide(&self.params, &self.persistant, snapshot);

        if let ModeAction::Switch(kind) = action {
            self.enter(kind, snapshot);
        }

        self.mode
            .act(&self.params, &mut self.persistant, snapshot, &mut self.cmd);

        self.tm.tick += 1;
        self.tm.mode = self.mode.kind();
        self.tm.home_position = self.persistant.home.get();
        self.tm.cmd = self.cmd;

        trace!("NavCtrl {} output: {:?}", self.mode, self.cmd);

        self.cmd
    }

    pub fn mode_kind(&self) -> NavModeKind {
        self.mode.kind()
    }

    pub fn mode(&self) -> &NavMode {
        &self.mode
    }

    pub fn cmd(&self) -> ActuatorCmd {
        self.cmd
    }

    pub fn params(&self) -> &NavCtrlParams {
        &self.params
    }

    pub fn home_position(&self) -> Option<Point2<f64>> {
        self.persistant.home.get()
    }

    pub fn get_tm(&self) -> NavTm {
        self.tm.clone()
    }

    pub fn is_done(&self) -> bool {
        matches!(self.mode, NavMode::Done(_))
    }

    /// Replace the active mode with a fresh instance of the given kind.
    fn enter(&mut self, kind: NavModeKind, snapshot: &Snapshot) {
        self.mode = NavMode::new(kind, &self.params);
        self.tm.num_mode_changes += 1;

        info!("NavCtrl mode change to: {}", self.mode);

        // A pickup request is only valid for the CollectSample that raised it
        self.cmd.set_pickup_request(false);

        if kind == NavModeKind::Done {
            self.tm.mission_summary = Some(Done::summarise(snapshot));
        }
    }
}

impl HomePosition {
    pub fn get(&self) -> Option<Point2<f64>> {
        self.0
    }

    /// Set the home position if it hasn't already been set. Returns `true` if this call set it.
    pub fn set_once(&mut self, position: Point2<f64>) -> bool {
        match self.0 {
            Some(_) => false,
            None => {
                self.0 = Some(position);
                true
            }
        }
    }

    /// Distance from the given position to home, or `None` if either is unknown.
    pub fn distance_from(&self, position: Option<Point2<f64>>) -> Option<f64> {
        match (self.0, position) {
            (Some(home), Some(pos)) => Some(util::maths::distance(&home, &pos)),
            _ => None,
        }
    }
}

impl NavMode {
    /// Build a fresh mode of the given kind.
    pub fn new(kind: NavModeKind, params: &NavCtrlParams) -> Self {
        match kind {
            NavModeKind::Idle => NavMode::Idle(Idle::new()),
            NavModeKind::WallFollow => NavMode::WallFollow(WallFollow::new(params)),
            NavModeKind::Stopped => NavMode::Stopped(Stopped::new()),
            NavModeKind::SteerRight => NavMode::SteerRight(SteerRight::new(params)),
            NavModeKind::ApproachSample => NavMode::ApproachSample(ApproachSample::new()),
            NavModeKind::CollectSample => NavMode::CollectSample(CollectSample::new()),
            NavModeKind::ReturnHome => NavMode::ReturnHome(ReturnHome::new()),
            NavModeKind::Done => NavMode::Done(Done::new()),
            NavModeKind::SetBack => NavMode::SetBack(SetBack::new()),
            NavModeKind::Quicksand => NavMode::Quicksand(Quicksand::new()),
        }
    }

    pub fn kind(&self) -> NavModeKind {
        match self {
            NavMode::Idle(_) => NavModeKind::Idle,
            NavMode::WallFollow(_) => NavModeKind::WallFollow,
            NavMode::Stopped(_) => NavModeKind::Stopped,
            NavMode::SteerRight(_) => NavModeKind::SteerRight,
            NavMode::ApproachSample(_) => NavModeKind::ApproachSample,
            NavMode::CollectSample(_) => NavModeKind::CollectSample,
            NavMode::ReturnHome(_) => NavModeKind::ReturnHome,
            NavMode::Done(_) => NavModeKind::Done,
            NavMode::SetBack(_) => NavModeKind::SetBack,
            NavMode::Quicksand(_) => NavModeKind::Quicksand,
        }
    }

    fn act(
        &mut self,
        params: &NavCtrlParams,
        persistant: &mut NavPersistantData,
        snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        match self {
            NavMode::Idle(idle) => idle.act(params, persistant, snapshot, cmd),
            NavMode::WallFollow(wall_follow) => wall_follow.act(params, persistant, snapshot, cmd),
            NavMode::Stopped(stopped) => stopped.act(params, persistant, snapshot, cmd),
            NavMode::SteerRight(steer_right) => steer_right.act(params, persistant, snapshot, cmd),
            NavMode::ApproachSample(approach) => approach.act(params, persistant, snapshot, cmd),
            NavMode::CollectSample(collect) => collect.act(params, persistant, snapshot, cmd),
            NavMode::ReturnHome(return_home) => return_home.act(params, persistant, snapshot, cmd),
            NavMode::Done(done) => done.act(params, persistant, snapshot, cmd),
            NavMode::SetBack(set_back) => set_back.act(params, persistant, snapshot, cmd),
            NavMode::Quicksand(quicksand) => quicksand.act(params, persistant, snapshot, cmd),
        }
    }

    fn decide(
        &mut self,
        params: &NavCtrlParams,
        persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        match self {
            NavMode::Idle(idle) => idle.decide(params, persistant, snapshot),
            NavMode::WallFollow(wall_follow) => wall_follow.decide(params, persistant, snapshot),
            NavMode::Stopped(stopped) => stopped.decide(params, persistant, snapshot),
            NavMode::SteerRight(steer_right) => steer_right.decide(params, persistant, snapshot),
            NavMode::ApproachSample(approach) => approach.decide(params, persistant, snapshot),
            NavMode::CollectSample(collect) => collect.decide(params, persistant, snapshot),
            NavMode::ReturnHome(return_home) => return_home.decide(params, persistant, snapshot),
            NavMode::Done(done) => done.decide(params, persistant, snapshot),
            NavMode::SetBack(set_back) => set_back.decide(params, persistant, snapshot),
            NavMode::Quicksand(quicksand) => quicksand.decide(params, persistant, snapshot),
        }
    }
}

impl Display for NavMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind().fmt(f)
    }
}

impl Display for NavModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavModeKind::Idle => write!(f, "NavMode::Idle"),
            NavModeKind::WallFollow => write!(f, "NavMode::WallFollow"),
            NavModeKind::Stopped => write!(f, "NavMode::Stopped"),
            NavModeKind::SteerRight => write!(f, "NavMode::SteerRight"),
            NavModeKind::ApproachSample => write!(f, "NavMode::ApproachSample"),
            NavModeKind::CollectSample => write!(f, "NavMode::CollectSample"),
            NavModeKind::ReturnHome => write!(f, "NavMode::ReturnHome"),
            NavModeKind::Done => write!(f, "NavMode::Done"),
            NavModeKind::SetBack => write!(f, "NavMode::SetBack"),
            NavModeKind::Quicksand => write!(f, "NavMode::Quicksand"),
        }
    }
}

impl Default for NavModeKind {
    fn default() -> Self {
        NavModeKind::Idle
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Count consecutive stalled ticks, resetting the counter as soon as the rover moves.
pub(crate) fn update_stall(stall_ticks: &mut u32, stalled: bool) {
    if stalled {
        *stall_ticks = stall_ticks.saturating_add(1);
    } else {
        *stall_ticks = 0;
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
