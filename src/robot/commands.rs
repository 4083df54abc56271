//! Operator command types.
//!
//! Turns raw gamepad axes into the walking command consumed by the gait
//! engine. Bindings follow the controller layout: right stick drives forward
//! motion and turning, the throttles strafe.
#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use crate::robot::config::COMMAND_DEADBAND;
use crate::robot::gamepad::{Axis, Gamepad};

/// Linear re-scale of `x` from one range to another, without clamping.
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Commanded body motion, each component roughly in -127..=127.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WalkCommand {
    /// Forward (+) / backward (-).
    pub x: f32,
    /// Strafe.
    pub y: f32,
    /// Turn.
    pub r: f32,
}

impl WalkCommand {
    pub const fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }

    pub fn from_gamepad(pad: &impl Gamepad) -> Self {
        let strafe =
            pad.analog(Axis::ThrottleR) as f32 - pad.analog(Axis::ThrottleL) as f32;
        Self {
            x: map_range(pad.analog(Axis::Ry) as f32, 0.0, 255.0, 127.0, -127.0),
            y: map_range(strafe, -255.0, 255.0, 127.0, -127.0),
            r: map_range(pad.analog(Axis::Rx) as f32, 0.0, 255.0, 127.0, -127.0),
        }
    }

    /// True when any component leaves the dead-band.
    pub fn is_active(&self) -> bool {
        self.x.abs() > COMMAND_DEADBAND
            || self.y.abs() > COMMAND_DEADBAND
            || self.r.abs() > COMMAND_DEADBAND
    }
}
