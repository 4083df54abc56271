//! One-leg-lift mode: the two front legs are driven joint by joint from the
//! sticks, bypassing IK.
//!
//! On the first frame in this mode each front leg latches its current servo
//! angles as a baseline and leaves IK control. Pulling a stick back instead
//! selects a step height, which a capture press turns into the walking step
//! height multiplier.
use log::info;

use crate::robot::{
    commands::map_range,
    gamepad::{Axis, Gamepad},
    joint::Joint,
    leg::Leg,
    servo::{Servo, ServoBank},
};

/// Stick pair driving one front leg.
#[derive(Debug, Clone)]
struct ManualLeg {
    leg: Leg,
    sweep: Axis,
    raise: Axis,
    ik_control: bool,
    base: [u8; 3],
    z_height: f32,
}

impl ManualLeg {
    const fn new(leg: Leg, sweep: Axis, raise: Axis) -> Self {
        Self {
            leg,
            sweep,
            raise,
            ik_control: true,
            base: [0; 3],
            z_height: 0.0,
        }
    }

    fn drive<S: Servo>(&mut self, pad: &impl Gamepad, servos: &mut ServoBank<S>) {
        if self.ik_control {
            self.base = Joint::ALL.map(|joint| servos.read(self.leg, joint));
            self.ik_control = false;
        }
        let [coxa, femur, tibia] = self.base.map(f32::from);

        let sweep = map_range(pad.analog(self.sweep) as f32, 0.0, 255.0, 45.0, -45.0);
        servos.write(self.leg, Joint::Coxa, joint_angle(coxa + sweep, 45, 135));

        let raise = pad.analog(self.raise);
        if raise < 117 {
            let t = map_range(raise as f32, 116.0, 0.0, 0.0, 24.0);
            servos.write(self.leg, Joint::Femur, joint_angle(femur + t, 0, 170));
            servos.write(self.leg, Joint::Tibia, joint_angle(tibia + 4.0 * t, 0, 170));
        } else {
            let raise = raise.clamp(140, 255) as f32;
            self.z_height = map_range(raise, 140.0, 255.0, 1.0, 8.0);
        }
    }
}

/// Truncates like the servo protocol, then limits to `min..=max`.
fn joint_angle(angle: f32, min: i32, max: i32) -> u8 {
    (angle as i32).clamp(min, max) as u8
}

#[derive(Debug, Clone)]
pub struct OneLegLift {
    right: ManualLeg,
    left: ManualLeg,
}

impl OneLegLift {
    /// Legs that can be taken away from IK.
    pub const LEGS: [Leg; 2] = [Leg::RightFront, Leg::LeftFront];

    pub fn new() -> Self {
        Self {
            right: ManualLeg::new(Leg::RightFront, Axis::Rx, Axis::Ry),
            left: ManualLeg::new(Leg::LeftFront, Axis::Lx, Axis::Ly),
        }
    }

    /// False while a front leg is driven directly by this mode.
    pub fn is_ik_controlled(&self, leg: Leg) -> bool {
        match leg {
            Leg::RightFront => self.right.ik_control,
            Leg::LeftFront => self.left.ik_control,
            _ => true,
        }
    }

    /// Hands both front legs back to IK; baselines are latched again on
    /// the next entry.
    pub fn rearm(&mut self) {
        self.right.ik_control = true;
        self.left.ik_control = true;
    }

    /// Higher of the two selected step heights, 1..=8.
    pub fn z_height(&self) -> f32 {
        self.right.z_height.max(self.left.z_height)
    }

    /// Runs one frame. Returns the new step height multiplier when a capture
    /// was requested.
    pub fn run<S: Servo>(
        &mut self,
        pad: &impl Gamepad,
        servos: &mut ServoBank<S>,
        capture: bool,
    ) -> Option<f32> {
        self.right.drive(pad, servos);
        self.left.drive(pad, servos);

        let z_height = self.z_height();
        self.right.z_height = z_height;

        if !capture {
            return None;
        }
        let multiplier = 1.0 + (z_height - 1.0) / 3.0;
        info!("[ONE_LEG] step height multiplier set to {multiplier}");
        Some(multiplier)
    }
}

impl Default for OneLegLift {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::gamepad::{SharedGamepad, SnapshotGamepad};
    use crate::robot::servo::DummyServo;
    use approx::assert_abs_diff_eq;

    fn bank_at(angle: u8) -> ServoBank<DummyServo> {
        let mut bank = ServoBank::dummy();
        for leg in Leg::ALL {
            for joint in Joint::ALL {
                bank.write(leg, joint, angle);
            }
        }
        bank
    }

    #[test]
    fn first_frame_latches_and_leaves_ik() {
        let shared = SharedGamepad::new();
        let mut pad = SnapshotGamepad::new(&shared);
        pad.read_gamepad();
        let mut bank = bank_at(90);
        let mut mode = OneLegLift::new();

        assert!(mode.is_ik_controlled(Leg::RightFront));
        mode.run(&pad, &mut bank, false);
        assert!(!mode.is_ik_controlled(Leg::RightFront));
        assert!(!mode.is_ik_controlled(Leg::LeftFront));
        assert!(mode.is_ik_controlled(Leg::RightMiddle));

        mode.rearm();
        assert!(mode.is_ik_controlled(Leg::LeftFront));
    }

    #[test]
    fn sticks_move_front_legs_from_their_baseline() {
        let shared = SharedGamepad::new();
        let mut pad = SnapshotGamepad::new(&shared);
        let mut bank = bank_at(90);
        let mut mode = OneLegLift::new();

        shared.update(|s| {
            s.set_axis(Axis::Rx, 0);
            s.set_axis(Axis::Ry, 0);
        });
        pad.read_gamepad();
        mode.run(&pad, &mut bank, false);

        assert_eq!(bank.read(Leg::RightFront, Joint::Coxa), 135);
        assert_eq!(bank.read(Leg::RightFront, Joint::Femur), 114);
        assert_eq!(bank.read(Leg::RightFront, Joint::Tibia), 170);
        // baseline is kept: a second frame does not accumulate
        mode.run(&pad, &mut bank, false);
        assert_eq!(bank.read(Leg::RightFront, Joint::Femur), 114);
        // neutral left stick keeps the left front coxa near its baseline
        assert_eq!(bank.read(Leg::LeftFront, Joint::Coxa), 89);
    }

    #[test]
    fn pulling_back_selects_step_height() {
        let shared = SharedGamepad::new();
        let mut pad = SnapshotGamepad::new(&shared);
        let mut bank = bank_at(90);
        let mut mode = OneLegLift::new();

        shared.update(|s| s.set_axis(Axis::Ly, 255));
        pad.read_gamepad();
        assert_eq!(mode.run(&pad, &mut bank, false), None);
        assert_abs_diff_eq!(mode.z_height(), 8.0);

        let multiplier = mode.run(&pad, &mut bank, true).unwrap();
        assert_abs_diff_eq!(multiplier, 1.0 + 7.0 / 3.0);
        // femur untouched while the stick selects height
        assert_eq!(bank.read(Leg::LeftFront, Joint::Femur), 90);
    }
}
