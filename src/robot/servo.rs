//! Actuator abstraction and the servo bank driving all joints.
//!
//! Every joint is driven through the [`Servo`] trait so hardware channels, the
//! no-op [`DummyServo`] and test doubles can be swapped freely.
use core::fmt::Display;

use embedded_hal::pwm::{Error as _, ErrorKind, SetDutyCycle};
use fugit::HertzU32;
use heapless::Vec;
use log::{debug, error};

use crate::robot::config::{SERVO_ANGLE_RANGE, SERVO_MAX_PULSE_US, SERVO_MIN_PULSE_US};
use crate::robot::joint::{HeadJoint, Joint, JointAngles};
use crate::robot::leg::{Leg, PerLeg};
use crate::MAX_JOINTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ServoError {
    #[error("pwm driver error: {0:?}")]
    Pwm(ErrorKind),
}

/// One joint actuator.
pub trait Servo {
    /// Commands the joint to `angle` degrees.
    fn write(&mut self, angle: u8) -> Result<(), ServoError>;

    /// Last commanded angle.
    fn read(&self) -> u8;

    /// De-energizes the joint.
    fn disable(&mut self) -> Result<(), ServoError>;
}

/// Converts a solver angle to the integer servo command, truncating like the
/// servo protocol expects.
pub fn to_servo_angle(angle: f32) -> u8 {
    angle.clamp(0.0, SERVO_ANGLE_RANGE as f32) as u8
}

/// Hobby servo on a PWM channel.
#[derive(Debug)]
pub struct PwmServo<PWM> {
    pwm: PWM,
    angle: Option<u8>,
    max_duty: u32,
    frequency: HertzU32,
}

impl<PWM> PwmServo<PWM>
where
    PWM: SetDutyCycle,
{
    pub fn new(pwm: PWM, frequency: HertzU32) -> Self {
        let max_duty = pwm.max_duty_cycle() as u32;
        Self {
            pwm,
            angle: None,
            max_duty,
            frequency,
        }
    }

    /// Duty cycle that produces the pulse width for `angle`.
    pub fn duty_for(&self, angle: u8) -> u16 {
        let angle = (angle as u32).min(SERVO_ANGLE_RANGE);
        let pulse =
            SERVO_MIN_PULSE_US + angle * (SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US) / SERVO_ANGLE_RANGE;
        // THE WIDTH OF THE PULSE DRIVES THE ANGLE, NOT FREQ
        let period_us = 1_000_000 / self.frequency.raw();
        ((pulse * self.max_duty) / period_us).min(self.max_duty) as u16
    }

    pub fn into_inner(self) -> PWM {
        self.pwm
    }
}

impl<PWM> Servo for PwmServo<PWM>
where
    PWM: SetDutyCycle,
{
    fn write(&mut self, angle: u8) -> Result<(), ServoError> {
        let angle = angle.min(SERVO_ANGLE_RANGE as u8);

        //Avoid setting the same angle again
        if self.angle == Some(angle) {
            return Ok(());
        }
        let duty = self.duty_for(angle);
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|e| ServoError::Pwm(e.kind()))?;
        self.angle = Some(angle);
        Ok(())
    }

    fn read(&self) -> u8 {
        self.angle.unwrap_or(0)
    }

    fn disable(&mut self) -> Result<(), ServoError> {
        self.angle = None;
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|e| ServoError::Pwm(e.kind()))
    }
}

/// Stand-in servo that only remembers what it was told.
#[derive(Debug, Default, Clone)]
pub struct DummyServo {
    value: u8,
    enabled: bool,
}

impl DummyServo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Servo for DummyServo {
    fn write(&mut self, angle: u8) -> Result<(), ServoError> {
        if self.value != angle {
            debug!("servo write {angle}");
            self.value = angle;
        }
        self.enabled = true;
        Ok(())
    }

    fn read(&self) -> u8 {
        self.value
    }

    fn disable(&mut self) -> Result<(), ServoError> {
        self.enabled = false;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointId {
    Leg(Leg, Joint),
    Head(HeadJoint),
}

impl Display for JointId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            JointId::Leg(leg, joint) => write!(f, "{leg} {joint}"),
            JointId::Head(joint) => write!(f, "{joint}"),
        }
    }
}

/// All joint actuators of the robot: three per leg plus an optional head.
///
/// Write failures never abort a frame. They are logged and collected until
/// [`ServoBank::take_faults`] is called.
pub struct ServoBank<S> {
    legs: PerLeg<[S; 3]>,
    head: Option<[S; 2]>,
    faults: Vec<JointId, MAX_JOINTS>,
}

impl<S: Servo> ServoBank<S> {
    pub fn new(legs: [[S; 3]; Leg::COUNT]) -> Self {
        Self {
            legs: PerLeg(legs),
            head: None,
            faults: Vec::new(),
        }
    }

    pub fn from_fn(mut f: impl FnMut(Leg, Joint) -> S) -> Self {
        Self::new(core::array::from_fn(|i| {
            let leg = Leg::ALL[i];
            Joint::ALL.map(|joint| f(leg, joint))
        }))
    }

    /// Adds head servos, ordered `[tilt, rotate]`.
    pub fn with_head(mut self, head: [S; 2]) -> Self {
        self.head = Some(head);
        self
    }

    pub fn servo(&self, leg: Leg, joint: Joint) -> &S {
        &self.legs[leg][joint as usize]
    }

    pub fn head(&self, joint: HeadJoint) -> Option<&S> {
        self.head.as_ref().map(|head| &head[joint as usize])
    }

    pub fn read(&self, leg: Leg, joint: Joint) -> u8 {
        self.servo(leg, joint).read()
    }

    pub fn write(&mut self, leg: Leg, joint: Joint, angle: u8) {
        if let Err(e) = self.legs[leg][joint as usize].write(angle) {
            error!("{leg} {joint} error writing angle {angle}: {e}");
            self.record(JointId::Leg(leg, joint));
        }
    }

    pub fn write_leg(&mut self, leg: Leg, angles: &JointAngles) {
        for joint in Joint::ALL {
            self.write(leg, joint, to_servo_angle(angles.get(joint)));
        }
    }

    pub fn write_head(&mut self, joint: HeadJoint, angle: u8) {
        let Some(head) = self.head.as_mut() else {
            return;
        };
        if let Err(e) = head[joint as usize].write(angle) {
            error!("{joint} error writing angle {angle}: {e}");
            self.record(JointId::Head(joint));
        }
    }

    /// De-energizes every joint. Returns how many refused.
    pub fn disable_all(&mut self) -> usize {
        let mut failed = 0;
        for (leg, servos) in self.legs.iter_mut() {
            for (servo, joint) in servos.iter_mut().zip(Joint::ALL) {
                if let Err(e) = servo.disable() {
                    error!("{leg} {joint} failed to disable: {e}");
                    failed += 1;
                }
            }
        }
        if let Some(head) = self.head.as_mut() {
            for (servo, joint) in head.iter_mut().zip([HeadJoint::Tilt, HeadJoint::Rotate]) {
                if let Err(e) = servo.disable() {
                    error!("{joint} failed to disable: {e}");
                    failed += 1;
                }
            }
        }
        failed
    }

    pub fn take_faults(&mut self) -> Vec<JointId, MAX_JOINTS> {
        core::mem::take(&mut self.faults)
    }

    fn record(&mut self, joint: JointId) {
        if !self.faults.contains(&joint) {
            let _ = self.faults.push(joint);
        }
    }
}

impl ServoBank<DummyServo> {
    pub fn dummy() -> Self {
        Self::from_fn(|_, _| DummyServo::new())
    }
}
