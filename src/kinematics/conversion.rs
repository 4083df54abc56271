//! Inverse kinematics for one leg.
//!
//! Converts a foot position in the body frame into coxa, femur and tibia
//! servo angles, applying the joint calibration and the coxa mounting
//! correction of the leg.
//!
//! Used by [`crate::Hexapod`] for every leg still under IK control.
use core::f32::consts::PI;
#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use crate::robot::{
    calibration::Calibration,
    config::{
        MountCorrection, COXA_LENGTH, FEMUR_HORN_OFFSET, FEMUR_LENGTH, TIBIA_HORN_OFFSET,
        TIBIA_LENGTH,
    },
    joint::{Joint, JointAngles},
    leg::Leg,
    state::Position,
};

const RAD_TO_DEG: f32 = 180.0 / PI;

/// Femur-to-toe distance for a target, `(L0, L3)`.
fn reach(target: Position) -> (f32, f32) {
    let l0 = (target.x.powi(2) + target.y.powi(2)).sqrt() - COXA_LENGTH;
    let l3 = (l0.powi(2) + target.z.powi(2)).sqrt();
    (l0, l3)
}

/// True when the femur-to-toe distance is strictly inside the leg envelope.
pub fn is_reachable(target: Position) -> bool {
    let (_, l3) = reach(target);
    l3 > TIBIA_LENGTH - FEMUR_LENGTH && l3 < TIBIA_LENGTH + FEMUR_LENGTH
}

/// Solves the joint angles of `leg` for a foot `target`.
///
/// Returns `None` when the target lies outside the leg envelope; the caller
/// leaves the joints where they are. Every returned angle is in `[0, 180]`.
pub fn leg_ik(
    leg: Leg,
    target: Position,
    calibration: &Calibration,
    mount: &MountCorrection,
) -> Option<JointAngles> {
    if !is_reachable(target) {
        return None;
    }
    let (l0, l3) = reach(target);

    let phi_tibia = ((FEMUR_LENGTH.powi(2) + TIBIA_LENGTH.powi(2) - l3.powi(2))
        / (2.0 * FEMUR_LENGTH * TIBIA_LENGTH))
        .acos();
    let tibia = phi_tibia * RAD_TO_DEG - TIBIA_HORN_OFFSET
        + calibration.get(Joint::Tibia, leg) as f32;

    let gamma_femur = target.z.atan2(l0);
    let phi_femur = ((FEMUR_LENGTH.powi(2) + l3.powi(2) - TIBIA_LENGTH.powi(2))
        / (2.0 * FEMUR_LENGTH * l3))
        .acos();
    let femur = (phi_femur + gamma_femur) * RAD_TO_DEG
        + FEMUR_HORN_OFFSET
        + 90.0
        + calibration.get(Joint::Femur, leg) as f32;

    let coxa = target.x.atan2(target.y) * RAD_TO_DEG + calibration.get(Joint::Coxa, leg) as f32;
    let coxa = mount.apply(coxa);

    Some(JointAngles {
        coxa: coxa.clamp(0.0, 180.0),
        femur: femur.clamp(0.0, 180.0),
        tibia: tibia.clamp(0.0, 180.0),
    })
}
