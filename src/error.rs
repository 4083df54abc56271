//! Crate-level error type.
//!
//! Only startup and persistence can fail in a way the caller sees. Actuator
//! faults are logged and reported per frame, unreachable IK targets are
//! silently skipped.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[cfg(feature = "std")]
    #[error("calibration file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "std")]
    #[error("malformed calibration file: {0}")]
    MalformedCalibration(#[from] serde_json::Error),
}
