use core::ops::{Add, AddAssign, Sub};

use crate::robot::config::home;
use crate::robot::leg::{Leg, PerLeg};

/// Foot position in millimeters, body-centered frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ZERO: Position = Position::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        *self = *self + rhs;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Foot state of one leg: the working position for this frame and the
/// operator-captured bias added on top of it every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LegState {
    pub current: Position,
    pub offset: Position,
}

impl LegState {
    pub fn target(&self) -> Position {
        self.current + self.offset
    }
}

/// Foot state of all six legs.
#[derive(Debug, Clone, PartialEq)]
pub struct Legs(PerLeg<LegState>);

impl Legs {
    pub fn at_home() -> Self {
        Self(PerLeg::from_fn(|leg| LegState {
            current: home(leg),
            offset: Position::ZERO,
        }))
    }

    /// Moves every foot back to home; offsets are kept.
    pub fn reset_to_home(&mut self) {
        for (leg, state) in self.0.iter_mut() {
            state.current = home(leg);
        }
    }

    pub fn clear_offsets(&mut self) {
        for (_, state) in self.0.iter_mut() {
            state.offset = Position::ZERO;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Leg, &LegState)> {
        self.0.iter()
    }
}

impl core::ops::Index<Leg> for Legs {
    type Output = LegState;

    fn index(&self, leg: Leg) -> &LegState {
        &self.0[leg]
    }
}

impl core::ops::IndexMut<Leg> for Legs {
    fn index_mut(&mut self, leg: Leg) -> &mut LegState {
        &mut self.0[leg]
    }
}
