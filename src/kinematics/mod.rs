//! Kinematics algorithms for the hexapod.
//!
//! This module provides the mathematical routines for turning foot positions
//! into joint angles and for generating coordinated leg trajectories.
//!
//! - [`conversion`] handles inverse kinematics for one leg.
//! - [`stride`] turns a walking command into stride lengths and per-leg amplitudes.
//! - [`gaits`] holds the four gait state machines.
//! - [`gait_engine`] owns the gaits, the shared tick and the speed setting.
//!
//! Used by [`crate::Hexapod`] once per frame.
pub mod conversion;
pub mod gait_engine;
pub mod gaits;
pub mod stride;
