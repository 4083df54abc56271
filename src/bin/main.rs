use std::env;

use anyhow::Context;
use embassy_executor::Spawner;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use hexapod::robot::{
    calibration::FileStore,
    config::RobotConfig,
    gamepad::{SharedGamepad, SnapshotGamepad},
    servo::{DummyServo, ServoBank},
};
use hexapod::tasks::{
    input_task::{input_task, DEMO_SCRIPT},
    motion_task::{motion_task, HostHexapod},
};
use hexapod::Hexapod;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

const DEFAULT_CALIBRATION: &str = "calibration.json";

static GAMEPAD: SharedGamepad = SharedGamepad::new();
static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();
static HALTED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

fn init_logger() {
    let level = env::var("HEXAPOD_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger already installed: {e}");
    }
}

fn boot() -> anyhow::Result<HostHexapod> {
    let path = env::var("HEXAPOD_CALIBRATION").unwrap_or_else(|_| DEFAULT_CALIBRATION.into());
    let servos = ServoBank::dummy().with_head([DummyServo::new(), DummyServo::new()]);

    let hexapod = Hexapod::new(
        RobotConfig::default(),
        servos,
        SnapshotGamepad::new(&GAMEPAD),
        FileStore::new(&path),
    )
    .with_context(|| format!("could not start with calibration {path}"))?;

    ctrlc::set_handler(|| SHUTDOWN.signal(())).context("could not install Ctrl-C handler")?;
    Ok(hexapod)
}

fn fail(e: anyhow::Error) -> ! {
    error!("{e:#}");
    std::process::exit(1)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    init_logger();

    let hexapod = boot().unwrap_or_else(|e| fail(e));
    info!("Hexapod initialized, Ctrl-C to stop");

    if let Err(e) = spawner.spawn(input_task(&GAMEPAD, DEMO_SCRIPT)) {
        fail(anyhow::anyhow!("could not spawn input task: {e:?}"));
    }
    if let Err(e) = spawner.spawn(motion_task(hexapod, &SHUTDOWN, &HALTED)) {
        fail(anyhow::anyhow!("could not spawn motion task: {e:?}"));
    }

    HALTED.wait().await;
    info!("Hexapod stopped");
    std::process::exit(0);
}
