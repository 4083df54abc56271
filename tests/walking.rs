//! Integration test: walking through the full frame loop.
//!
//! Drives a dummy-servo hexapod from a scripted gamepad and checks foot
//! trajectories, the dead-band and speed switching frame by frame.

mod common;

use approx::assert_abs_diff_eq;
use common::{robot, run_frames, set_axis, tap};
use hexapod::control::RobotMode;
use hexapod::kinematics::{gait_engine::GaitSpeed, gaits::GaitType};
use hexapod::robot::{
    config::home,
    gamepad::{Axis, Button, SharedGamepad},
    joint::Joint,
    leg::Leg,
};

/// RY = 27 maps to a forward command of about 100.
const FORWARD_RY: u8 = 27;

#[test]
fn tripod_cycle_lifts_and_plants_leg_zero() {
    let shared = SharedGamepad::new();
    let mut robot = robot(&shared);
    set_axis(&shared, Axis::Ry, FORWARD_RY);

    let report = tap(&shared, &mut robot, Button::Y);
    assert_eq!(report.mode, RobotMode::Walk);
    assert_eq!(report.gait, GaitType::Tripod);
    assert_eq!(robot.ticks_per_phase(), 54);

    // first walking frame is tick 0 of the swing
    let z_home = home(Leg::RightFront).z;
    assert_abs_diff_eq!(robot.legs()[Leg::RightFront].current.z, z_home, epsilon = 1e-4);
    assert_eq!(robot.phases(GaitType::Tripod)[Leg::RightFront], 1);

    let mut peak = f32::MIN;
    for _ in 1..53 {
        robot.step();
        peak = peak.max(robot.legs()[Leg::RightFront].current.z);
    }
    assert!(peak > z_home + 15.0, "foot never left the ground: {peak}");

    // tick 53 closes the swing just above the ground
    robot.step();
    assert_abs_diff_eq!(robot.legs()[Leg::RightFront].current.z, z_home, epsilon = 1.5);
    assert_eq!(robot.phases(GaitType::Tripod)[Leg::RightFront], 2);
    assert_eq!(robot.tick(), 0);

    for _ in 0..54 {
        robot.step();
        assert_abs_diff_eq!(robot.legs()[Leg::RightFront].current.z, z_home, epsilon = 1e-4);
    }
    assert_eq!(robot.phases(GaitType::Tripod)[Leg::RightFront], 1);
    assert_eq!(robot.tick(), 0);
}

#[test]
fn stance_legs_push_backwards_while_walking_forward() {
    let shared = SharedGamepad::new();
    let mut robot = robot(&shared);
    set_axis(&shared, Axis::Ry, FORWARD_RY);
    tap(&shared, &mut robot, Button::Y);

    let start = robot.legs()[Leg::RightMiddle].current.x;
    run_frames(&mut robot, 20);
    assert!(robot.legs()[Leg::RightMiddle].current.x < start);
}

#[test]
fn sticks_inside_deadband_keep_the_robot_still() {
    let shared = SharedGamepad::new();
    let mut robot = robot(&shared);
    set_axis(&shared, Axis::Ry, 120);
    tap(&shared, &mut robot, Button::Y);
    let legs = robot.legs().clone();
    let angles: Vec<u8> = Leg::ALL
        .iter()
        .flat_map(|leg| Joint::ALL.map(|joint| robot.servos().read(*leg, joint)))
        .collect();

    run_frames(&mut robot, 10);

    assert_eq!(robot.tick(), 0);
    assert_eq!(robot.legs(), &legs);
    for (leg, state) in robot.legs().iter() {
        assert_eq!(state.current, home(leg));
    }
    let after: Vec<u8> = Leg::ALL
        .iter()
        .flat_map(|leg| Joint::ALL.map(|joint| robot.servos().read(*leg, joint)))
        .collect();
    assert_eq!(after, angles);
}

#[test]
fn released_sticks_finish_the_current_phase() {
    let shared = SharedGamepad::new();
    let mut robot = robot(&shared);
    set_axis(&shared, Axis::Ry, FORWARD_RY);
    tap(&shared, &mut robot, Button::Y);
    run_frames(&mut robot, 9);
    assert_eq!(robot.tick(), 10);

    set_axis(&shared, Axis::Ry, 128);
    run_frames(&mut robot, 44);
    assert_eq!(robot.tick(), 0);
    assert_eq!(robot.phases(GaitType::Tripod)[Leg::RightFront], 2);

    run_frames(&mut robot, 5);
    assert_eq!(robot.tick(), 0);
}

#[test]
fn gait_switch_goes_idle_and_keeps_phases() {
    let shared = SharedGamepad::new();
    let mut robot = robot(&shared);
    set_axis(&shared, Axis::Ry, FORWARD_RY);
    tap(&shared, &mut robot, Button::Y);
    run_frames(&mut robot, 53);
    let tripod = *robot.phases(GaitType::Tripod);

    let report = tap(&shared, &mut robot, Button::PadLeft);
    assert_eq!(report.mode, RobotMode::Idle);
    assert_eq!(report.gait, GaitType::Wave);
    for (leg, state) in robot.legs().iter() {
        assert_eq!(state.current, home(leg));
    }

    tap(&shared, &mut robot, Button::Y);
    assert_eq!(robot.ticks_per_phase(), 18);
    assert_eq!(robot.phases(GaitType::Tripod), &tripod);
}

#[test]
fn start_toggles_slow_walking() {
    let shared = SharedGamepad::new();
    let mut robot = robot(&shared);
    tap(&shared, &mut robot, Button::Start);
    assert_eq!(robot.speed(), GaitSpeed::Slow);
    assert_eq!(robot.ticks_per_phase(), 162);

    robot.step();
    tap(&shared, &mut robot, Button::Start);
    assert_eq!(robot.speed(), GaitSpeed::Normal);
    assert_eq!(robot.ticks_per_phase(), 54);
}

#[test]
fn every_gait_closes_its_phase_cycle() {
    for (button, gait) in [
        (Button::PadDown, GaitType::Tripod),
        (Button::PadLeft, GaitType::Wave),
        (Button::PadUp, GaitType::Ripple),
        (Button::PadRight, GaitType::Tetrapod),
    ] {
        let shared = SharedGamepad::new();
        let mut robot = robot(&shared);
        tap(&shared, &mut robot, button);
        set_axis(&shared, Axis::Ry, FORWARD_RY);
        tap(&shared, &mut robot, Button::Y);
        let initial = *robot.phases(gait);

        let cycle = (robot.ticks_per_phase() * gait.cases()) as usize;
        run_frames(&mut robot, cycle - 1);

        assert_eq!(robot.tick(), 0, "{gait}");
        assert_eq!(robot.phases(gait), &initial, "{gait}");
    }
}
