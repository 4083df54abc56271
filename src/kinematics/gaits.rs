//! The four gait state machines.
//!
//! Every gait keeps one phase value per leg, numbered from 1 like the
//! classic hexapod sketches. Phase 1 is always the swing (foot in the air);
//! the remaining phases move the foot back along the ground. A gait only
//! touches the phases it owns, so switching gaits and coming back resumes
//! mid-cycle.
use core::f32::consts::PI;
use core::fmt::Display;
#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use crate::kinematics::stride::{Amplitude, Stride};
use crate::robot::{
    config::home,
    leg::{Leg, PerLeg},
    state::{Legs, Position},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaitType {
    #[default]
    Tripod,
    Wave,
    Ripple,
    Tetrapod,
}

impl GaitType {
    /// Number of phases a leg walks through in one full cycle.
    pub const fn cases(self) -> u32 {
        match self {
            GaitType::Tripod => 2,
            GaitType::Tetrapod => 3,
            GaitType::Wave | GaitType::Ripple => 6,
        }
    }
}

impl Display for GaitType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GaitType::Tripod => f.write_str("Tripod"),
            GaitType::Wave => f.write_str("Wave"),
            GaitType::Ripple => f.write_str("Ripple"),
            GaitType::Tetrapod => f.write_str("Tetrapod"),
        }
    }
}

/// Position inside the current phase: `count` in `0..ticks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub count: u32,
    pub ticks: u32,
}

impl Tick {
    /// Last tick of the phase; legs hand over to their next phase here.
    pub fn is_last(&self) -> bool {
        self.count + 1 >= self.ticks
    }

    fn angle(&self) -> f32 {
        PI * self.count as f32 / self.ticks as f32
    }
}

/// Foot on the half-cosine swing arc, raised by a half-sine.
fn swing(home: Position, amplitude: &Amplitude, angle: f32) -> Position {
    let (sin, cos) = (angle.sin(), angle.cos());
    Position::new(
        home.x - amplitude.x * cos,
        home.y - amplitude.y * cos,
        home.z + amplitude.z.abs() * sin,
    )
}

/// Moves a grounded foot back by `1/divisor` of the amplitude.
fn stance_step(current: &mut Position, home: Position, amplitude: &Amplitude, divisor: f32) {
    current.x -= amplitude.x / divisor;
    current.y -= amplitude.y / divisor;
    current.z = home.z;
}

/// A per-leg phase machine advanced once per frame.
pub trait Gait {
    fn phases(&self) -> &PerLeg<u8>;

    fn phases_mut(&mut self) -> &mut PerLeg<u8>;

    /// Moves one leg according to its phase and hands it to the next phase
    /// on the last tick.
    fn step_leg(
        &self,
        phase: &mut u8,
        home: Position,
        current: &mut Position,
        amplitude: &Amplitude,
        tick: Tick,
    );

    /// Advances every leg by one tick.
    fn advance(&mut self, legs: &mut Legs, stride: &Stride, step_height: f32, tick: Tick) {
        for leg in Leg::ALL {
            let amplitude = stride.amplitudes(leg, step_height);
            let mut phase = self.phases()[leg];
            self.step_leg(&mut phase, home(leg), &mut legs[leg].current, &amplitude, tick);
            self.phases_mut()[leg] = phase;
        }
    }
}

/// Three legs swing while the other three push.
#[derive(Debug, Clone, PartialEq)]
pub struct Tripod {
    phases: PerLeg<u8>,
}

impl Default for Tripod {
    fn default() -> Self {
        Self {
            phases: PerLeg([1, 2, 1, 2, 1, 2]),
        }
    }
}

impl Gait for Tripod {
    fn phases(&self) -> &PerLeg<u8> {
        &self.phases
    }

    fn phases_mut(&mut self) -> &mut PerLeg<u8> {
        &mut self.phases
    }

    fn step_leg(
        &self,
        phase: &mut u8,
        home: Position,
        current: &mut Position,
        amplitude: &Amplitude,
        tick: Tick,
    ) {
        match *phase {
            1 => {
                *current = swing(home, amplitude, tick.angle());
                if tick.is_last() {
                    *phase = 2;
                }
            }
            2 => {
                let cos = tick.angle().cos();
                current.x = home.x + amplitude.x * cos;
                current.y = home.y + amplitude.y * cos;
                current.z = home.z;
                if tick.is_last() {
                    *phase = 1;
                }
            }
            _ => {}
        }
    }
}

/// One leg swings at a time, the other five each push a fifth.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    phases: PerLeg<u8>,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            phases: PerLeg([1, 2, 3, 4, 5, 6]),
        }
    }
}

impl Gait for Wave {
    fn phases(&self) -> &PerLeg<u8> {
        &self.phases
    }

    fn phases_mut(&mut self) -> &mut PerLeg<u8> {
        &mut self.phases
    }

    fn step_leg(
        &self,
        phase: &mut u8,
        home: Position,
        current: &mut Position,
        amplitude: &Amplitude,
        tick: Tick,
    ) {
        match *phase {
            1 => {
                *current = swing(home, amplitude, tick.angle());
                if tick.is_last() {
                    *phase = 6;
                }
            }
            2..=6 => {
                stance_step(current, home, amplitude, tick.ticks as f32 * 2.5);
                if tick.is_last() {
                    *phase -= 1;
                }
            }
            _ => {}
        }
    }
}

/// Swing split into a raise and a lower phase, then four pushing phases.
/// The right side runs half a swing behind the left.
#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    phases: PerLeg<u8>,
}

impl Default for Ripple {
    fn default() -> Self {
        Self {
            phases: PerLeg([2, 6, 4, 1, 3, 5]),
        }
    }
}

impl Gait for Ripple {
    fn phases(&self) -> &PerLeg<u8> {
        &self.phases
    }

    fn phases_mut(&mut self) -> &mut PerLeg<u8> {
        &mut self.phases
    }

    fn step_leg(
        &self,
        phase: &mut u8,
        home: Position,
        current: &mut Position,
        amplitude: &Amplitude,
        tick: Tick,
    ) {
        let ticks = tick.ticks as f32;
        match *phase {
            1 => {
                let angle = PI * tick.count as f32 / (ticks * 2.0);
                *current = swing(home, amplitude, angle);
            }
            2 => {
                let angle = PI * (ticks + tick.count as f32) / (ticks * 2.0);
                *current = swing(home, amplitude, angle);
            }
            3..=6 => stance_step(current, home, amplitude, ticks * 2.0),
            _ => return,
        }
        if tick.is_last() {
            *phase = *phase % 6 + 1;
        }
    }
}

/// Diagonal pairs swing together: right front with left rear, then right
/// middle with left front, then right rear with left middle.
#[derive(Debug, Clone, PartialEq)]
pub struct Tetrapod {
    phases: PerLeg<u8>,
}

impl Default for Tetrapod {
    fn default() -> Self {
        Self {
            phases: PerLeg([1, 3, 2, 1, 2, 3]),
        }
    }
}

impl Gait for Tetrapod {
    fn phases(&self) -> &PerLeg<u8> {
        &self.phases
    }

    fn phases_mut(&mut self) -> &mut PerLeg<u8> {
        &mut self.phases
    }

    fn step_leg(
        &self,
        phase: &mut u8,
        home: Position,
        current: &mut Position,
        amplitude: &Amplitude,
        tick: Tick,
    ) {
        match *phase {
            1 => *current = swing(home, amplitude, tick.angle()),
            2 | 3 => stance_step(current, home, amplitude, tick.ticks as f32),
            _ => return,
        }
        if tick.is_last() {
            *phase = *phase % 3 + 1;
        }
    }
}
