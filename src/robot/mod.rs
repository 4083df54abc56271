//! Core robot types and configuration.
//!
//! This module defines the main types and constants for the hexapod, including:
//! - [`config`]: Physical and movement constants for the robot.
//! - [`leg`]: Leg enumeration and per-leg storage.
//! - [`joint`]: Joint enumeration and display helpers.
//! - [`state`]: Foot positions and the per-leg working/offset layers.
//! - [`calibration`]: Per-joint calibration and its persistence.
//! - [`gamepad`]: Operator input capability and snapshot handoff.
//! - [`commands`]: Walking command derived from the gamepad.
//! - [`servo`]: Actuator capability and the servo bank.
pub mod calibration;
pub mod commands;
pub mod config;
pub mod gamepad;
pub mod joint;
pub mod leg;
pub mod servo;
pub mod state;
