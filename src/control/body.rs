//! Body translate and rotate producers.
//!
//! Both modes hold every foot on the ground and move the body above them.
//! A capture press locks the current displacement into the per-leg offsets,
//! puts the feet back at home and hands control back to Idle.
#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use log::info;

use crate::robot::{
    commands::map_range,
    config::{body_to_foot, home, A12DEG, A30DEG, TRAVEL},
    gamepad::{Axis, Gamepad},
    leg::{Leg, PerLeg},
    state::{Legs, Position},
};

/// Body height change from the left stick: down lowers by up to three
/// travels, up raises by one.
pub fn lift(pad: &impl Gamepad) -> f32 {
    let ly = pad.analog(Axis::Ly) as f32;
    if ly > 127.0 {
        map_range(ly, 128.0, 255.0, 0.0, TRAVEL)
    } else {
        map_range(ly, 0.0, 127.0, -3.0 * TRAVEL, 0.0)
    }
}

/// Body translation commanded by the sticks.
pub fn translation(pad: &impl Gamepad) -> Position {
    Position::new(
        map_range(
            pad.analog(Axis::Ry) as f32,
            0.0,
            255.0,
            -2.0 * TRAVEL,
            2.0 * TRAVEL,
        ),
        map_range(
            pad.analog(Axis::Rx) as f32,
            0.0,
            255.0,
            2.0 * TRAVEL,
            -2.0 * TRAVEL,
        ),
        lift(pad),
    )
}

/// Sine and cosine of a stick angle given in radians x 1,000,000.
fn trig(value: u8, from: f32, to: f32) -> (f32, f32) {
    let angle = map_range(value as f32, 0.0, 255.0, from, to) / 1_000_000.0;
    (angle.sin(), angle.cos())
}

/// Per-leg foot displacement for the body attitude commanded by the sticks.
///
/// Roll and pitch are limited to 12 degrees, yaw to 30 degrees.
pub fn rotation(pad: &impl Gamepad) -> PerLeg<Position> {
    let (sin_x, cos_x) = trig(pad.analog(Axis::Rx), A12DEG, -A12DEG);
    let (sin_y, cos_y) = trig(pad.analog(Axis::Ry), A12DEG, -A12DEG);
    let (sin_z, cos_z) = trig(pad.analog(Axis::Lx), -A30DEG, A30DEG);
    let lift = lift(pad);

    PerLeg::from_fn(|leg| {
        let t = body_to_foot(leg);
        let x = t.x * cos_y * cos_z + t.y * sin_x * sin_y * cos_z + t.y * cos_x * sin_z
            - t.z * cos_x * sin_y * cos_z
            + t.z * sin_x * sin_z
            - t.x;
        let y = -t.x * cos_y * sin_z - t.y * sin_x * sin_y * sin_z + t.y * cos_x * cos_z
            + t.z * cos_x * sin_y * sin_z
            + t.z * sin_x * cos_z
            - t.y;
        let z = t.x * sin_y - t.y * sin_x * cos_y + t.z * cos_x * cos_y - t.z;
        Position::new(x, y, z + lift)
    })
}

/// Places every foot at home displaced by `delta`, or captures the deltas
/// into the offsets when `capture` is set. Returns whether a capture happened.
fn apply(legs: &mut Legs, delta: impl Fn(Leg) -> Position, capture: bool) -> bool {
    for leg in Leg::ALL {
        let state = &mut legs[leg];
        if capture {
            state.offset += delta(leg);
            state.current = home(leg);
        } else {
            state.current = home(leg) + delta(leg);
        }
    }
    if capture {
        info!("[BODY] offsets saved");
    }
    capture
}

pub fn translate(pad: &impl Gamepad, legs: &mut Legs, capture: bool) -> bool {
    let delta = translation(pad);
    apply(legs, |_| delta, capture)
}

pub fn rotate(pad: &impl Gamepad, legs: &mut Legs, capture: bool) -> bool {
    let deltas = rotation(pad);
    apply(legs, |leg| deltas[leg], capture)
}
