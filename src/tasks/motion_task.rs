//! Frame loop task.
//!
//! Owns the [`Hexapod`] and steps it at the frame period. When the shutdown
//! signal fires the loop disables every actuator, and only then is `halted`
//! signalled so the process may exit.
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use log::info;

use crate::robot::{calibration::FileStore, gamepad::SnapshotGamepad, servo::DummyServo};
use crate::Hexapod;

/// Controller wired to no-op servos, the shared gamepad and a JSON
/// calibration file.
pub type HostHexapod = Hexapod<DummyServo, SnapshotGamepad<'static>, FileStore>;

#[embassy_executor::task]
pub async fn motion_task(
    mut hexapod: HostHexapod,
    shutdown: &'static Signal<CriticalSectionRawMutex, ()>,
    halted: &'static Signal<CriticalSectionRawMutex, ()>,
) {
    info!("[MOTION_TASK] started in {} mode", hexapod.mode());
    hexapod.run(shutdown).await;
    info!("[MOTION_TASK] halted");
    halted.signal(());
}
