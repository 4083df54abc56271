//! Mode and gait selection from button edges.
//!
//! Only press edges are considered, never held levels. The directional pad
//! picks a gait outside calibration; inside calibration the same buttons
//! belong to the calibration editor.
use log::info;

use crate::control::RobotMode;
use crate::kinematics::gaits::GaitType;
use crate::robot::gamepad::{Button, Gamepad};

/// Side effects requested by one frame of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Events {
    /// Move every foot back to home before the producer runs.
    pub reset_position: bool,
    /// Lock the active manual mode's deltas into the offsets.
    pub capture_offsets: bool,
    /// Zero all offsets and the step height multiplier.
    pub clear_offsets: bool,
    pub toggle_speed: bool,
}

/// Single writer of the robot mode and the selected gait.
#[derive(Debug, Clone, Default)]
pub struct Arbiter {
    mode: RobotMode,
    gait: GaitType,
}

const GAIT_BUTTONS: [(Button, GaitType); 4] = [
    (Button::PadDown, GaitType::Tripod),
    (Button::PadLeft, GaitType::Wave),
    (Button::PadUp, GaitType::Ripple),
    (Button::PadRight, GaitType::Tetrapod),
];

const MODE_BUTTONS: [(Button, RobotMode); 4] = [
    (Button::Y, RobotMode::Walk),
    (Button::X, RobotMode::TranslateXyz),
    (Button::B, RobotMode::RotateYpr),
    (Button::A, RobotMode::OneLegLift),
];

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> RobotMode {
        self.mode
    }

    pub fn gait(&self) -> GaitType {
        self.gait
    }

    pub fn set_mode(&mut self, mode: RobotMode) {
        if self.mode != mode {
            info!("[ARBITER] {mode} mode applied");
            if mode == RobotMode::Walk {
                info!("[ARBITER] {} gait applied", self.gait);
            }
            self.mode = mode;
        }
    }

    pub fn set_gait(&mut self, gait: GaitType) {
        if self.gait != gait {
            info!("[ARBITER] {gait} gait selected");
            self.gait = gait;
        }
    }

    /// Applies this frame's button presses.
    pub fn process(&mut self, pad: &impl Gamepad) -> Events {
        let mut events = Events::default();

        if self.mode != RobotMode::Calibration {
            for (button, gait) in GAIT_BUTTONS {
                if pad.button_pressed(button) {
                    self.set_mode(RobotMode::Idle);
                    self.set_gait(gait);
                    events.reset_position = true;
                }
            }
        }

        for (button, mode) in MODE_BUTTONS {
            if pad.button_pressed(button) {
                self.set_mode(mode);
                events.reset_position = true;
            }
        }

        if pad.button_pressed(Button::Start) {
            events.toggle_speed = true;
        }

        if pad.button_pressed(Button::Select) {
            if self.mode != RobotMode::Calibration {
                self.set_mode(RobotMode::Calibration);
            } else {
                self.set_mode(RobotMode::Idle);
                self.set_gait(GaitType::default());
            }
            events.reset_position = true;
        }

        if pad.button_pressed(Button::Tl) || pad.button_pressed(Button::Tr) {
            events.capture_offsets = true;
        }

        if pad.button_pressed(Button::L2) || pad.button_pressed(Button::R2) {
            events.clear_offsets = true;
        }

        events
    }
}
