use fugit::{HertzU32, MillisDurationU32};

use crate::robot::leg::{Leg, PerLeg};
use crate::robot::state::Position;

// ROBOT SIZE
pub const COXA_LENGTH: f32 = 51.0;
pub const FEMUR_LENGTH: f32 = 65.0;
pub const TIBIA_LENGTH: f32 = 121.0;

/// Femur and tibia horn offsets of the servo mounting, in degrees.
pub const FEMUR_HORN_OFFSET: f32 = 14.0;
pub const TIBIA_HORN_OFFSET: f32 = 23.0;

/// Translate and rotate travel limit, mm.
pub const TRAVEL: f32 = 30.0;

/// 12 and 30 degrees in radians x 1,000,000.
pub const A12DEG: f32 = 209_440.0;
pub const A30DEG: f32 = 523_599.0;

// STRIDE
pub const MAX_STRIDE: f32 = 90.0;
pub const MAX_ROTATION: f32 = 35.0;
pub const MAX_AMPLITUDE: f32 = 50.0;
pub const COMMAND_DEADBAND: f32 = 15.0;

/// Coxa-to-toe home positions.
pub const HOME_X: [f32; 6] = [82.0, 0.0, -82.0, -82.0, 0.0, 82.0];
pub const HOME_Y: [f32; 6] = [82.0, 116.0, 82.0, -82.0, -116.0, -82.0];
pub const HOME_Z: [f32; 6] = [-80.0, -80.0, -80.0, -80.0, -80.0, -80.0];

/// Body center-to-coxa servo distances.
pub const BODY_X: [f32; 6] = [110.4, 0.0, -110.4, -110.4, 0.0, 110.4];
pub const BODY_Y: [f32; 6] = [58.4, 90.8, 58.4, -58.4, -90.8, -58.4];
pub const BODY_Z: [f32; 6] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

// SERVO
pub const SERVO_MIN_PULSE_US: u32 = 544;
pub const SERVO_MAX_PULSE_US: u32 = 2400;
pub const SERVO_ANGLE_RANGE: u32 = 180;
pub const SERVO_FREQUENCY: HertzU32 = HertzU32::from_raw(50);

/// Coxa offset added after IK to compensate for how the leg is mounted on
/// the body. `atan2` changes sign across the mounting boundary of the rear
/// and left legs, so those need a separate constant for negative angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountCorrection {
    pub non_negative: f32,
    pub negative: f32,
}

impl MountCorrection {
    pub const fn uniform(offset: f32) -> Self {
        Self {
            non_negative: offset,
            negative: offset,
        }
    }

    pub fn apply(&self, raw_coxa: f32) -> f32 {
        if raw_coxa < 0.0 {
            raw_coxa + self.negative
        } else {
            raw_coxa + self.non_negative
        }
    }
}

pub const MOUNT_CORRECTION: [MountCorrection; 6] = [
    MountCorrection::uniform(45.0),
    MountCorrection::uniform(90.0),
    MountCorrection::uniform(135.0),
    MountCorrection {
        non_negative: -135.0,
        negative: 225.0,
    },
    MountCorrection {
        non_negative: -90.0,
        negative: 270.0,
    },
    MountCorrection {
        non_negative: -45.0,
        negative: 315.0,
    },
];

/// Home foot position of a leg.
pub fn home(leg: Leg) -> Position {
    let i = leg.index();
    Position::new(HOME_X[i], HOME_Y[i], HOME_Z[i])
}

/// Distance from the body center to the foot of a leg standing at home.
pub fn body_to_foot(leg: Leg) -> Position {
    let i = leg.index();
    home(leg) + Position::new(BODY_X[i], BODY_Y[i], BODY_Z[i])
}

/// Stores the run-time tunables of the controller.
#[derive(Debug, Clone)]
pub struct RobotConfig {
    /// Period of one control frame.
    pub frame_time: MillisDurationU32,
    /// Duration of one full gait cycle at normal speed.
    pub normal_cycle: MillisDurationU32,
    /// Duration of one full gait cycle at slow speed.
    pub slow_cycle: MillisDurationU32,
    /// Head tilt servo range, degrees.
    pub head_tilt_range: (u8, u8),
    /// Head rotate servo range, degrees.
    pub head_rotate_range: (u8, u8),
    /// PWM frequency handed to every [`PwmServo`](crate::robot::servo::PwmServo).
    pub servo_frequency: HertzU32,
    pub mount_correction: PerLeg<MountCorrection>,
}

impl RobotConfig {
    pub fn new() -> Self {
        Self {
            frame_time: MillisDurationU32::from_ticks(10),
            normal_cycle: MillisDurationU32::from_ticks(1080),
            slow_cycle: MillisDurationU32::from_ticks(3240),
            head_tilt_range: (60, 120),
            head_rotate_range: (30, 150),
            servo_frequency: SERVO_FREQUENCY,
            mount_correction: PerLeg(MOUNT_CORRECTION),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::new()
    }
}
