//! The frame loop.
//!
//! [`Hexapod::step`] runs exactly one control frame: sample the gamepad,
//! arbitrate, run the producer of the active mode, then solve IK and write
//! every leg still under IK control. [`Hexapod::run`] repeats it at the
//! configured frame period until the shutdown signal fires.
use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker};
use heapless::Vec;
use log::{debug, info, warn};

use crate::control::{
    arbiter::Arbiter, body, calibration::CalibrationMode, one_leg::OneLegLift, RobotMode,
};
use crate::kinematics::{
    conversion::leg_ik,
    gait_engine::{GaitEngine, GaitSpeed},
    gaits::GaitType,
};
use crate::robot::{
    calibration::{Calibration, CalibrationStore},
    commands::{map_range, WalkCommand},
    config::RobotConfig,
    gamepad::{Axis, Gamepad},
    joint::HeadJoint,
    leg::{Leg, PerLeg},
    servo::{JointId, Servo, ServoBank},
    state::Legs,
};
use crate::{Error, MAX_JOINTS};

/// Outcome of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub mode: RobotMode,
    pub gait: GaitType,
    /// Joints whose actuator refused a command this frame.
    pub faults: Vec<JointId, MAX_JOINTS>,
}

pub struct Hexapod<S, G, C> {
    config: RobotConfig,
    servos: ServoBank<S>,
    gamepad: G,
    store: C,
    calibration: Calibration,
    arbiter: Arbiter,
    engine: GaitEngine,
    legs: Legs,
    one_leg: OneLegLift,
    calibration_mode: CalibrationMode,
    step_height: f32,
    reset_position: bool,
    frames: u32,
}

impl<S, G, C> Hexapod<S, G, C>
where
    S: Servo,
    G: Gamepad,
    C: CalibrationStore,
{
    /// Loads the calibration and starts in Idle with the default gait.
    ///
    /// Fails only when the stored calibration is malformed or the store is
    /// unusable.
    pub fn new(
        config: RobotConfig,
        servos: ServoBank<S>,
        gamepad: G,
        mut store: C,
    ) -> Result<Self, Error> {
        let calibration = store.load()?;
        info!("[HEXAPOD] calibration loaded: {calibration}");

        Ok(Self {
            engine: GaitEngine::new(config.clone()),
            config,
            servos,
            gamepad,
            store,
            calibration,
            arbiter: Arbiter::new(),
            legs: Legs::at_home(),
            one_leg: OneLegLift::new(),
            calibration_mode: CalibrationMode::new(),
            step_height: 1.0,
            reset_position: true,
            frames: 0,
        })
    }

    /// Runs one control frame.
    pub fn step(&mut self) -> FrameReport {
        self.gamepad.read_gamepad();

        let events = self.arbiter.process(&self.gamepad);
        if events.toggle_speed {
            self.engine.toggle_speed();
        }
        if events.clear_offsets {
            self.legs.clear_offsets();
            self.one_leg.rearm();
            self.step_height = 1.0;
            info!("[HEXAPOD] offsets cleared");
        }
        self.reset_position |= events.reset_position;

        let mode = self.arbiter.mode();
        if mode == RobotMode::Calibration {
            self.calibration_mode
                .process(&self.gamepad, &mut self.calibration, &mut self.store);
        }

        if self.reset_position {
            self.legs.reset_to_home();
            self.reset_position = false;
        }

        if mode != RobotMode::OneLegLift {
            self.one_leg.rearm();
        }

        match mode {
            RobotMode::Idle => {}
            RobotMode::Walk => {
                let command = WalkCommand::from_gamepad(&self.gamepad);
                self.engine.advance(
                    self.arbiter.gait(),
                    &command,
                    &mut self.legs,
                    self.step_height,
                );
                self.drive_head();
            }
            RobotMode::TranslateXyz => {
                if body::translate(&self.gamepad, &mut self.legs, events.capture_offsets) {
                    self.arbiter.set_mode(RobotMode::Idle);
                }
            }
            RobotMode::RotateYpr => {
                if body::rotate(&self.gamepad, &mut self.legs, events.capture_offsets) {
                    self.arbiter.set_mode(RobotMode::Idle);
                }
            }
            RobotMode::OneLegLift => {
                // settle a front leg on its target before its baseline is latched
                for leg in OneLegLift::LEGS {
                    if self.one_leg.is_ik_controlled(leg) {
                        self.solve(leg);
                    }
                }
                let capture = events.capture_offsets;
                if let Some(multiplier) = self.one_leg.run(&self.gamepad, &mut self.servos, capture)
                {
                    self.step_height = multiplier;
                }
            }
            RobotMode::Calibration => CalibrationMode::hold(&self.calibration, &mut self.servos),
        }

        if mode != RobotMode::Calibration {
            for leg in Leg::ALL {
                if self.one_leg.is_ik_controlled(leg) {
                    self.solve(leg);
                }
            }
        }

        if self.frames % 1000 == 0 {
            debug!(
                "[HEXAPOD] frame {}: {} mode, {} gait, tick {}",
                self.frames,
                self.arbiter.mode(),
                self.arbiter.gait(),
                self.engine.tick()
            );
        }
        self.frames = self.frames.wrapping_add(1);

        FrameReport {
            mode: self.arbiter.mode(),
            gait: self.arbiter.gait(),
            faults: self.servos.take_faults(),
        }
    }

    /// Steps at the frame period until `shutdown` is signalled, then disables
    /// every actuator.
    pub async fn run(&mut self, shutdown: &Signal<CriticalSectionRawMutex, ()>) {
        let period = Duration::from_millis(self.config.frame_time.ticks() as u64);
        let mut ticker = Ticker::every(period);
        info!("[HEXAPOD] control loop started");

        loop {
            match select(ticker.next(), shutdown.wait()).await {
                Either::First(()) => {
                    let report = self.step();
                    if !report.faults.is_empty() {
                        warn!("[HEXAPOD] {} joint(s) failed this frame", report.faults.len());
                    }
                }
                Either::Second(()) => break,
            }
        }

        self.shutdown();
    }

    /// Disables every actuator and stops the input source.
    pub fn shutdown(&mut self) {
        let failed = self.servos.disable_all();
        if failed > 0 {
            warn!("[HEXAPOD] {failed} joint(s) refused to disable");
        }
        self.gamepad.terminate();
        info!("[HEXAPOD] all actuators disabled");
    }

    fn solve(&mut self, leg: Leg) {
        let target = self.legs[leg].target();
        let mount = &self.config.mount_correction[leg];
        if let Some(angles) = leg_ik(leg, target, &self.calibration, mount) {
            self.servos.write_leg(leg, &angles);
        }
    }

    fn drive_head(&mut self) {
        let (rotate_min, rotate_max) = self.config.head_rotate_range;
        let (tilt_min, tilt_max) = self.config.head_tilt_range;
        let rotate = map_range(
            self.gamepad.analog(Axis::Lx) as f32,
            0.0,
            255.0,
            rotate_min as f32,
            rotate_max as f32,
        );
        let tilt = map_range(
            self.gamepad.analog(Axis::Ly) as f32,
            0.0,
            255.0,
            tilt_min as f32,
            tilt_max as f32,
        );
        self.servos.write_head(HeadJoint::Rotate, rotate as u8);
        self.servos.write_head(HeadJoint::Tilt, tilt as u8);
    }

    pub fn mode(&self) -> RobotMode {
        self.arbiter.mode()
    }

    pub fn gait(&self) -> GaitType {
        self.arbiter.gait()
    }

    pub fn speed(&self) -> GaitSpeed {
        self.engine.speed()
    }

    pub fn legs(&self) -> &Legs {
        &self.legs
    }

    pub fn phases(&self, gait: GaitType) -> &PerLeg<u8> {
        self.engine.phases(gait)
    }

    pub fn tick(&self) -> u32 {
        self.engine.tick()
    }

    pub fn ticks_per_phase(&self) -> u32 {
        self.engine.ticks_per_phase(self.arbiter.gait())
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn step_height(&self) -> f32 {
        self.step_height
    }

    pub fn servos(&self) -> &ServoBank<S> {
        &self.servos
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn is_ik_controlled(&self, leg: Leg) -> bool {
        self.one_leg.is_ik_controlled(leg)
    }
}
