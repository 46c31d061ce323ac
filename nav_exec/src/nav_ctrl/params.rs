//! # NavCtrl Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use super::{
    approach_sample::ApproachSampleParams, collect_sample::CollectSampleParams, done::DoneParams,
    quicksand::QuicksandParams, return_home::ReturnHomeParams, set_back::SetBackParams,
    steer_right::SteerRightParams, stopped::StoppedParams, wall_follow::WallFollowParams,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the NavCtrl and all its modes.
///
/// Any table or key missing from the parameter file takes its default value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NavCtrlParams {
    pub wall_follow: WallFollowParams,

    pub stopped: StoppedParams,

    pub steer_right: SteerRightParams,

    pub approach_sample: ApproachSampleParams,

    pub collect_sample: CollectSampleParams,

    pub return_home: ReturnHomeParams,

    pub done: DoneParams,

    pub set_back: SetBackParams,

    pub quicksand: QuicksandParams,
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
