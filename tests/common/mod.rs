#![allow(dead_code)]

use hexapod::robot::{
    calibration::{CalibrationStore, MemoryStore},
    config::RobotConfig,
    gamepad::{Axis, Button, SharedGamepad, SnapshotGamepad},
    servo::{DummyServo, Servo, ServoBank},
};
use hexapod::{FrameReport, Hexapod};

pub type TestHexapod<'a> = Hexapod<DummyServo, SnapshotGamepad<'a>, MemoryStore>;

pub fn robot(shared: &SharedGamepad) -> TestHexapod<'_> {
    Hexapod::new(
        RobotConfig::default(),
        ServoBank::dummy(),
        SnapshotGamepad::new(shared),
        MemoryStore::new(),
    )
    .unwrap()
}

/// Presses `button` for exactly one frame. The release is only seen by the
/// next frame, so tapping the same button twice needs a frame in between.
pub fn tap<S: Servo, C: CalibrationStore>(
    shared: &SharedGamepad,
    hexapod: &mut Hexapod<S, SnapshotGamepad<'_>, C>,
    button: Button,
) -> FrameReport {
    shared.update(|s| s.press(button));
    let report = hexapod.step();
    shared.update(|s| s.release(button));
    report
}

pub fn set_axis(shared: &SharedGamepad, axis: Axis, value: u8) {
    shared.update(|s| s.set_axis(axis, value));
}

pub fn run_frames<S: Servo, C: CalibrationStore>(
    hexapod: &mut Hexapod<S, SnapshotGamepad<'_>, C>,
    frames: usize,
) {
    for _ in 0..frames {
        hexapod.step();
    }
}
