//! Operator-facing control layer.
//!
//! - [`arbiter`]: turns button edges into mode, gait and offset events.
//! - [`body`]: body translate and rotate producers.
//! - [`one_leg`]: direct joint control of the two front legs.
//! - [`calibration`]: servo alignment mode.
use core::fmt::Display;

pub mod arbiter;
pub mod body;
pub mod calibration;
pub mod one_leg;

/// Which producer drives the legs this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobotMode {
    #[default]
    Idle,
    Walk,
    TranslateXyz,
    RotateYpr,
    OneLegLift,
    Calibration,
}

impl Display for RobotMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RobotMode::Idle => f.write_str("Idle"),
            RobotMode::Walk => f.write_str("Walk"),
            RobotMode::TranslateXyz => f.write_str("Control x-y-z"),
            RobotMode::RotateYpr => f.write_str("Control y-p-r"),
            RobotMode::OneLegLift => f.write_str("One leg"),
            RobotMode::Calibration => f.write_str("Calibration"),
        }
    }
}
