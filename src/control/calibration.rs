//! Servo alignment mode.
//!
//! Every joint is held at 90 degrees plus its calibration so misalignment is
//! visible by eye. The pad moves a cursor over the calibration values and
//! nudges the selected one; each nudge is persisted immediately.
use log::{error, info};

use crate::robot::{
    calibration::{Calibration, CalibrationCursor, CalibrationStore},
    gamepad::{Button, Gamepad},
    joint::Joint,
    leg::Leg,
    servo::{Servo, ServoBank},
};

#[derive(Debug, Clone, Default)]
pub struct CalibrationMode {
    cursor: CalibrationCursor,
}

impl CalibrationMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles the editor buttons for one frame.
    pub fn process(
        &mut self,
        pad: &impl Gamepad,
        calibration: &mut Calibration,
        store: &mut impl CalibrationStore,
    ) {
        let mut pressed = false;

        if pad.button_pressed(Button::Select) {
            info!("[CALIBRATION] {calibration}");
            pressed = true;
        }

        let delta = if pad.button_pressed(Button::PadUp) {
            Some(1)
        } else if pad.button_pressed(Button::PadDown) {
            Some(-1)
        } else {
            None
        };

        if let Some(delta) = delta {
            let value = calibration.get_mut(self.cursor.joint(), self.cursor.leg());
            *value = value.saturating_add(delta);
            if let Err(e) = store.save(calibration) {
                error!("[CALIBRATION] could not save calibration: {e}");
            }
            pressed = true;
        } else if pad.button_pressed(Button::PadLeft) {
            self.cursor.step(false);
            pressed = true;
        } else if pad.button_pressed(Button::PadRight) {
            self.cursor.step(true);
            pressed = true;
        }

        if pressed {
            let (joint, leg) = (self.cursor.joint(), self.cursor.leg());
            info!(
                "[CALIBRATION] {joint}[{}] = {}",
                leg.index(),
                calibration.get(joint, leg)
            );
        }
    }

    /// Drives all 18 leg joints to `90 + calibration`.
    pub fn hold<S: Servo>(calibration: &Calibration, servos: &mut ServoBank<S>) {
        for leg in Leg::ALL {
            for joint in Joint::ALL {
                let angle = calibration.get(joint, leg).saturating_add(90).clamp(0, 180) as u8;
                servos.write(leg, joint, angle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::calibration::MemoryStore;
    use crate::robot::gamepad::{SharedGamepad, SnapshotGamepad};
    use crate::robot::servo::DummyServo;

    fn tap(shared: &SharedGamepad, pad: &mut SnapshotGamepad<'_>, button: Button) {
        shared.update(|s| s.press(button));
        pad.read_gamepad();
    }

    fn release_all(shared: &SharedGamepad, pad: &mut SnapshotGamepad<'_>) {
        shared.publish(Default::default());
        pad.read_gamepad();
    }

    #[test]
    fn up_and_down_edit_and_save_the_selected_value() {
        let shared = SharedGamepad::new();
        let mut pad = SnapshotGamepad::new(&shared);
        let mut mode = CalibrationMode::new();
        let mut calibration = Calibration::default();
        let mut store = MemoryStore::new();

        tap(&shared, &mut pad, Button::PadRight);
        mode.process(&pad, &mut calibration, &mut store);
        release_all(&shared, &mut pad);

        tap(&shared, &mut pad, Button::PadUp);
        mode.process(&pad, &mut calibration, &mut store);
        release_all(&shared, &mut pad);
        tap(&shared, &mut pad, Button::PadUp);
        mode.process(&pad, &mut calibration, &mut store);
        release_all(&shared, &mut pad);
        tap(&shared, &mut pad, Button::PadDown);
        mode.process(&pad, &mut calibration, &mut store);

        assert_eq!(calibration.coxa, [0, 1, 0, 0, 0, 0]);
        assert_eq!(store.saves(), 3);
        assert_eq!(store.load().unwrap(), calibration);
    }

    #[test]
    fn held_button_edits_only_once() {
        let shared = SharedGamepad::new();
        let mut pad = SnapshotGamepad::new(&shared);
        let mut mode = CalibrationMode::new();
        let mut calibration = Calibration::default();
        let mut store = MemoryStore::new();

        tap(&shared, &mut pad, Button::PadUp);
        mode.process(&pad, &mut calibration, &mut store);
        pad.read_gamepad();
        mode.process(&pad, &mut calibration, &mut store);

        assert_eq!(calibration.coxa[0], 1);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn hold_writes_center_plus_calibration() {
        let mut calibration = Calibration::default();
        calibration.tibia[4] = -7;
        calibration.femur[0] = 120;
        let mut bank = ServoBank::<DummyServo>::dummy();
        CalibrationMode::hold(&calibration, &mut bank);

        assert_eq!(bank.read(Leg::LeftMiddle, Joint::Tibia), 83);
        assert_eq!(bank.read(Leg::RightFront, Joint::Femur), 180);
        assert_eq!(bank.read(Leg::RightRear, Joint::Coxa), 90);
    }

    #[test]
    fn extreme_trims_saturate() {
        let shared = SharedGamepad::new();
        let mut pad = SnapshotGamepad::new(&shared);
        let mut mode = CalibrationMode::new();
        let mut calibration = Calibration::default();
        calibration.coxa[0] = i32::MAX;
        calibration.femur[0] = i32::MIN;
        let mut store = MemoryStore::new();

        tap(&shared, &mut pad, Button::PadUp);
        mode.process(&pad, &mut calibration, &mut store);
        assert_eq!(calibration.coxa[0], i32::MAX);

        let mut bank = ServoBank::<DummyServo>::dummy();
        CalibrationMode::hold(&calibration, &mut bank);
        assert_eq!(bank.read(Leg::RightFront, Joint::Coxa), 180);
        assert_eq!(bank.read(Leg::RightFront, Joint::Femur), 0);
    }
}
