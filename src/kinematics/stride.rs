//! Stride lengths and per-leg trajectory amplitudes.
use core::f32::consts::PI;
#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use crate::robot::{
    commands::WalkCommand,
    config::{body_to_foot, MAX_AMPLITUDE, MAX_ROTATION, MAX_STRIDE},
    leg::Leg,
};

/// Stride of one gait cycle derived from a walking command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stride {
    /// mm
    pub x: f32,
    /// mm
    pub y: f32,
    /// Rotation about the body Z axis, degrees.
    pub r: f32,
    sin_r: f32,
    cos_r: f32,
}

/// Half-range of foot motion of one leg, mm.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Amplitude {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Stride {
    pub fn new(command: &WalkCommand) -> Self {
        let r = MAX_ROTATION * command.r / 127.0;
        let radians = r * PI / 180.0;
        Self {
            x: MAX_STRIDE * command.x / 127.0,
            y: MAX_STRIDE * command.y / 127.0,
            r,
            sin_r: radians.sin(),
            cos_r: radians.cos(),
        }
    }

    /// Amplitudes of `leg` for this stride.
    ///
    /// The body rotation is applied to the body-center-to-toe vector of the
    /// leg, and the X/Y amplitudes are clamped so neighbouring legs never
    /// collide. The vertical amplitude follows whichever axis dominates.
    pub fn amplitudes(&self, leg: Leg, step_height: f32) -> Amplitude {
        let total = body_to_foot(leg);

        let rot_x = total.y * self.sin_r + total.x * self.cos_r - total.x;
        let rot_y = total.y * self.cos_r - total.x * self.sin_r - total.y;

        let span_x = self.x + rot_x;
        let span_y = self.y + rot_y;

        let z = if span_x.abs() > span_y.abs() {
            step_height * span_x / 4.0
        } else {
            step_height * span_y / 4.0
        };

        Amplitude {
            x: (span_x / 2.0).clamp(-MAX_AMPLITUDE, MAX_AMPLITUDE),
            y: (span_y / 2.0).clamp(-MAX_AMPLITUDE, MAX_AMPLITUDE),
            z,
        }
    }
}
