//! Asynchronous tasks for the host build.
//!
//! This module contains Embassy async tasks for the robot's runtime, including:
//! - [`motion_task`]: Runs the frame loop until shutdown, then reports the halt.
//! - [`input_task`]: Scripted operator publishing into the shared gamepad.
//!
//! Tasks are spawned from `main.rs` and communicate through static
//! [`SharedGamepad`](crate::robot::gamepad::SharedGamepad) and
//! [`Signal`](embassy_sync::signal::Signal) instances.
pub mod input_task;
pub mod motion_task;
