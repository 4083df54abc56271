//! Joint enumeration and display helpers.
//!
//! Defines the [`Joint`] enum for identifying each leg joint (coxa, femur,
//! tibia) in hip-to-toe order, the [`HeadJoint`] pair, and display formatting
//! for debugging and logging.
use core::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Coxa = 0,
    Femur = 1,
    Tibia = 2,
}

impl Joint {
    pub const ALL: [Joint; 3] = [Joint::Coxa, Joint::Femur, Joint::Tibia];
}

impl Display for Joint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Joint::Coxa => f.write_str("coxa"),
            Joint::Femur => f.write_str("femur"),
            Joint::Tibia => f.write_str("tibia"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadJoint {
    Tilt = 0,
    Rotate = 1,
}

impl Display for HeadJoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HeadJoint::Tilt => f.write_str("head tilt"),
            HeadJoint::Rotate => f.write_str("head rotate"),
        }
    }
}

/// Joint angles of one leg in degrees, already clamped to the servo range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    pub coxa: f32,
    pub femur: f32,
    pub tibia: f32,
}

impl JointAngles {
    pub fn get(&self, joint: Joint) -> f32 {
        match joint {
            Joint::Coxa => self.coxa,
            Joint::Femur => self.femur,
            Joint::Tibia => self.tibia,
        }
    }
}
