//! Scripted operator.
//!
//! Stands in for a real controller listener: it replays a list of button and
//! stick actions into the [`SharedGamepad`] until the frame loop terminates
//! the input source.
use embassy_time::Timer;
use log::{debug, info};

use crate::robot::gamepad::{Axis, Button, GamepadState, SharedGamepad};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Press(Button),
    Release(Button),
    Axis(Axis, u8),
    /// Sticks centered, every button up.
    Neutral,
    WaitMs(u64),
}

/// Walks forward with each gait in turn, then strikes a body pose.
pub const DEMO_SCRIPT: &[ScriptStep] = &[
    ScriptStep::WaitMs(500),
    ScriptStep::Press(Button::Y),
    ScriptStep::WaitMs(50),
    ScriptStep::Release(Button::Y),
    ScriptStep::Axis(Axis::Ry, 30),
    ScriptStep::WaitMs(3000),
    ScriptStep::Neutral,
    ScriptStep::Press(Button::PadUp),
    ScriptStep::WaitMs(50),
    ScriptStep::Release(Button::PadUp),
    ScriptStep::Press(Button::Y),
    ScriptStep::WaitMs(50),
    ScriptStep::Release(Button::Y),
    ScriptStep::Axis(Axis::Rx, 220),
    ScriptStep::WaitMs(3000),
    ScriptStep::Neutral,
    ScriptStep::Press(Button::X),
    ScriptStep::WaitMs(50),
    ScriptStep::Release(Button::X),
    ScriptStep::Axis(Axis::Ly, 200),
    ScriptStep::WaitMs(1000),
    ScriptStep::Neutral,
    ScriptStep::Press(Button::PadDown),
    ScriptStep::WaitMs(50),
    ScriptStep::Release(Button::PadDown),
];

/// Applies an instantaneous step. Returns the delay requested by a wait.
pub fn apply(gamepad: &SharedGamepad, step: ScriptStep) -> Option<u64> {
    match step {
        ScriptStep::Press(button) => gamepad.update(|s| s.press(button)),
        ScriptStep::Release(button) => gamepad.update(|s| s.release(button)),
        ScriptStep::Axis(axis, value) => gamepad.update(|s| s.set_axis(axis, value)),
        ScriptStep::Neutral => gamepad.publish(GamepadState::NEUTRAL),
        ScriptStep::WaitMs(ms) => return Some(ms),
    }
    None
}

#[embassy_executor::task]
pub async fn input_task(gamepad: &'static SharedGamepad, script: &'static [ScriptStep]) {
    info!("[INPUT_TASK] replaying {} steps", script.len());
    'replay: loop {
        for step in script {
            if gamepad.is_terminated() {
                break 'replay;
            }
            debug!("[INPUT_TASK] {step:?}");
            if let Some(ms) = apply(gamepad, *step) {
                Timer::after_millis(ms).await;
            }
        }
        if !script.iter().any(|s| matches!(s, ScriptStep::WaitMs(_))) {
            break;
        }
    }
    info!("[INPUT_TASK] input source terminated");
}
