use core::fmt::Display;

use fugit::MillisDurationU32;
use log::info;
#[cfg(not(feature = "std"))]
use micromath::F32Ext;

use crate::kinematics::gaits::{Gait, GaitType, Ripple, Tetrapod, Tick, Tripod, Wave};
use crate::kinematics::stride::Stride;
use crate::robot::{commands::WalkCommand, config::RobotConfig, leg::PerLeg, state::Legs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaitSpeed {
    #[default]
    Normal,
    Slow,
}

impl GaitSpeed {
    pub fn toggled(self) -> Self {
        match self {
            GaitSpeed::Normal => GaitSpeed::Slow,
            GaitSpeed::Slow => GaitSpeed::Normal,
        }
    }
}

impl Display for GaitSpeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GaitSpeed::Normal => f.write_str("normal"),
            GaitSpeed::Slow => f.write_str("slow"),
        }
    }
}

/// State machine that owns the four gaits and the tick they share.
///
/// Each gait keeps its own phases so a paused gait resumes where it left off.
/// The tick is shared: it counts frames inside the current phase and is only
/// advanced while walking.
#[derive(Debug, Clone)]
pub struct GaitEngine {
    tripod: Tripod,
    wave: Wave,
    ripple: Ripple,
    tetrapod: Tetrapod,
    tick: u32,
    speed: GaitSpeed,
    config: RobotConfig,
}

impl GaitEngine {
    pub fn new(config: RobotConfig) -> Self {
        Self {
            tripod: Tripod::default(),
            wave: Wave::default(),
            ripple: Ripple::default(),
            tetrapod: Tetrapod::default(),
            tick: 0,
            speed: GaitSpeed::Normal,
            config,
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn speed(&self) -> GaitSpeed {
        self.speed
    }

    pub fn toggle_speed(&mut self) {
        self.speed = self.speed.toggled();
        info!("[GAIT] {} speed selected", self.speed);
    }

    /// Duration of one full gait cycle at the current speed.
    pub fn cycle_duration(&self) -> MillisDurationU32 {
        match self.speed {
            GaitSpeed::Normal => self.config.normal_cycle,
            GaitSpeed::Slow => self.config.slow_cycle,
        }
    }

    /// Frames spent in one phase of `gait`.
    pub fn ticks_per_phase(&self, gait: GaitType) -> u32 {
        let frames = self.cycle_duration().ticks() as f32 / self.config.frame_time.ticks() as f32;
        ((frames / gait.cases() as f32).round() as u32).max(1)
    }

    pub fn phases(&self, gait: GaitType) -> &PerLeg<u8> {
        match gait {
            GaitType::Tripod => self.tripod.phases(),
            GaitType::Wave => self.wave.phases(),
            GaitType::Ripple => self.ripple.phases(),
            GaitType::Tetrapod => self.tetrapod.phases(),
        }
    }

    fn gait_mut(&mut self, gait: GaitType) -> &mut dyn Gait {
        match gait {
            GaitType::Tripod => &mut self.tripod,
            GaitType::Wave => &mut self.wave,
            GaitType::Ripple => &mut self.ripple,
            GaitType::Tetrapod => &mut self.tetrapod,
        }
    }

    /// Advances `gait` by one frame.
    ///
    /// Nothing moves while the command sits inside the dead-band and no step
    /// is in progress. A step already under way always finishes, even after
    /// the sticks are released. Returns whether the legs were moved.
    pub fn advance(
        &mut self,
        gait: GaitType,
        command: &WalkCommand,
        legs: &mut Legs,
        step_height: f32,
    ) -> bool {
        if !command.is_active() && self.tick == 0 {
            return false;
        }

        let stride = Stride::new(command);
        let ticks = self.ticks_per_phase(gait);
        let tick = Tick {
            count: self.tick,
            ticks,
        };
        self.gait_mut(gait).advance(legs, &stride, step_height, tick);

        if tick.is_last() {
            self.tick = 0;
        } else {
            self.tick += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::config::home;
    use crate::robot::leg::Leg;

    const FORWARD: WalkCommand = WalkCommand::new(100.0, 0.0, 0.0);

    #[test]
    fn ticks_follow_cycle_duration() {
        let mut engine = GaitEngine::new(RobotConfig::default());
        assert_eq!(engine.ticks_per_phase(GaitType::Tripod), 54);
        assert_eq!(engine.ticks_per_phase(GaitType::Wave), 18);
        assert_eq!(engine.ticks_per_phase(GaitType::Ripple), 18);
        assert_eq!(engine.ticks_per_phase(GaitType::Tetrapod), 36);

        engine.toggle_speed();
        assert_eq!(engine.speed(), GaitSpeed::Slow);
        assert_eq!(engine.ticks_per_phase(GaitType::Tripod), 162);
    }

    #[test]
    fn idle_command_inside_deadband_does_nothing() {
        let mut engine = GaitEngine::new(RobotConfig::default());
        let mut legs = Legs::at_home();
        let moved = engine.advance(
            GaitType::Tripod,
            &WalkCommand::new(15.0, -15.0, 10.0),
            &mut legs,
            1.0,
        );
        assert!(!moved);
        assert_eq!(engine.tick(), 0);
        assert_eq!(legs, Legs::at_home());
    }

    #[test]
    fn step_in_progress_finishes_after_release() {
        let mut engine = GaitEngine::new(RobotConfig::default());
        let mut legs = Legs::at_home();
        assert!(engine.advance(GaitType::Tripod, &FORWARD, &mut legs, 1.0));
        assert_eq!(engine.tick(), 1);

        let released = WalkCommand::default();
        for _ in 1..54 {
            assert!(engine.advance(GaitType::Tripod, &released, &mut legs, 1.0));
        }
        assert_eq!(engine.tick(), 0);
        assert!(!engine.advance(GaitType::Tripod, &released, &mut legs, 1.0));
    }

    #[test]
    fn full_cycle_restores_phases_for_every_gait() {
        for gait in [
            GaitType::Tripod,
            GaitType::Wave,
            GaitType::Ripple,
            GaitType::Tetrapod,
        ] {
            let mut engine = GaitEngine::new(RobotConfig::default());
            let mut legs = Legs::at_home();
            let start = *engine.phases(gait);
            let frames = engine.ticks_per_phase(gait) * gait.cases();
            for _ in 0..frames {
                engine.advance(gait, &FORWARD, &mut legs, 1.0);
            }
            assert_eq!(*engine.phases(gait), start, "{gait}");
            assert_eq!(engine.tick(), 0);
        }
    }

    #[test]
    fn gaits_keep_their_own_phases() {
        let mut engine = GaitEngine::new(RobotConfig::default());
        let mut legs = Legs::at_home();
        for _ in 0..54 {
            engine.advance(GaitType::Tripod, &FORWARD, &mut legs, 1.0);
        }
        assert_eq!(engine.phases(GaitType::Tripod).0, [2, 1, 2, 1, 2, 1]);
        assert_eq!(engine.phases(GaitType::Wave).0, [1, 2, 3, 4, 5, 6]);
        // stance feet never leave the ground
        assert_eq!(legs[Leg::RightMiddle].current.z, home(Leg::RightMiddle).z);
    }
}
