//! Operator input: the [`Gamepad`] capability and the snapshot handoff.
//!
//! Input devices and network relays run their own listeners and publish into
//! a [`SharedGamepad`]. The frame loop owns a [`SnapshotGamepad`] that copies
//! the shared state once per frame and derives press/release edges by
//! comparing the previous copy with the new one.
use core::cell::Cell;
use core::fmt::Display;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    Select = 4,
    Start = 5,
    ThumbL = 6,
    ThumbR = 7,
    Tl = 8,
    Tr = 9,
    L2 = 10,
    R2 = 11,
    PadUp = 12,
    PadDown = 13,
    PadLeft = 14,
    PadRight = 15,
}

impl Button {
    const fn mask(self) -> u16 {
        1 << self as u16
    }
}

impl Display for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Lx = 0,
    Ly = 1,
    ThrottleL = 2,
    Rx = 3,
    Ry = 4,
    ThrottleR = 5,
}

impl Axis {
    pub const COUNT: usize = 6;
}

/// Copy of the whole controller at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadState {
    axes: [u8; Axis::COUNT],
    buttons: u16,
}

impl GamepadState {
    /// Sticks centered, throttles released, no button down.
    pub const NEUTRAL: GamepadState = GamepadState {
        axes: [128, 128, 0, 128, 128, 0],
        buttons: 0,
    };

    pub const fn axis(&self, axis: Axis) -> u8 {
        self.axes[axis as usize]
    }

    pub fn set_axis(&mut self, axis: Axis, value: u8) {
        self.axes[axis as usize] = value;
    }

    pub const fn is_down(&self, button: Button) -> bool {
        self.buttons & button.mask() != 0
    }

    pub fn press(&mut self, button: Button) {
        self.buttons |= button.mask();
    }

    pub fn release(&mut self, button: Button) {
        self.buttons &= !button.mask();
    }
}

impl Default for GamepadState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Capability the frame loop needs from any input source.
pub trait Gamepad {
    /// Advances the debounce snapshot. Called exactly once per frame, before
    /// any edge query.
    fn read_gamepad(&mut self);

    /// Axis value, 0..=255.
    fn analog(&self, axis: Axis) -> u8;

    /// True only on the up -> down transition since the last sample.
    fn button_pressed(&self, button: Button) -> bool;

    /// True only on the down -> up transition since the last sample.
    fn button_released(&self, button: Button) -> bool;

    /// Level of the button in the latest sample.
    fn button(&self, button: Button) -> bool;

    fn terminate(&mut self);
}

/// Single-producer/single-consumer handoff cell between an input listener and
/// the frame loop.
pub struct SharedGamepad {
    state: Mutex<CriticalSectionRawMutex, Cell<GamepadState>>,
    terminated: Mutex<CriticalSectionRawMutex, Cell<bool>>,
}

impl SharedGamepad {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(GamepadState::NEUTRAL)),
            terminated: Mutex::new(Cell::new(false)),
        }
    }

    pub fn publish(&self, state: GamepadState) {
        self.state.lock(|cell| cell.set(state));
    }

    pub fn update(&self, f: impl FnOnce(&mut GamepadState)) {
        self.state.lock(|cell| {
            let mut state = cell.get();
            f(&mut state);
            cell.set(state);
        });
    }

    pub fn snapshot(&self) -> GamepadState {
        self.state.lock(|cell| cell.get())
    }

    /// Asks the producer side to stop.
    pub fn terminate(&self) {
        self.terminated.lock(|cell| cell.set(true));
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.lock(|cell| cell.get())
    }
}

impl Default for SharedGamepad {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame-loop side of a [`SharedGamepad`].
pub struct SnapshotGamepad<'a> {
    source: &'a SharedGamepad,
    old: GamepadState,
    new: GamepadState,
}

impl<'a> SnapshotGamepad<'a> {
    pub fn new(source: &'a SharedGamepad) -> Self {
        let now = source.snapshot();
        Self {
            source,
            old: now,
            new: now,
        }
    }
}

impl Gamepad for SnapshotGamepad<'_> {
    fn read_gamepad(&mut self) {
        self.old = self.new;
        self.new = self.source.snapshot();
    }

    fn analog(&self, axis: Axis) -> u8 {
        self.new.axis(axis)
    }

    fn button_pressed(&self, button: Button) -> bool {
        !self.old.is_down(button) && self.new.is_down(button)
    }

    fn button_released(&self, button: Button) -> bool {
        self.old.is_down(button) && !self.new.is_down(button)
    }

    fn button(&self, button: Button) -> bool {
        self.new.is_down(button)
    }

    fn terminate(&mut self) {
        info!("[INPUT] terminating gamepad listener");
        self.source.terminate();
    }
}
