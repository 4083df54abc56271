//! Library root for the hexapod locomotion controller.
//!
//! Re-exports all main modules: [`kinematics`], [`robot`], [`control`] and, on
//! hosted builds, [`tasks`]. The [`Hexapod`] type ties them together into the
//! fixed-period frame loop. Used by the main binary and by the integration
//! tests.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod control;
pub mod error;
pub mod hexapod;
pub mod kinematics;
pub mod robot;
#[cfg(feature = "std")]
pub mod tasks;

pub use error::Error;
pub use hexapod::{FrameReport, Hexapod};

/// Maximum number of joint faults recorded in one frame (18 legs + 2 head).
pub const MAX_JOINTS: usize = 20;
