//! Per-joint servo calibration and its persistence.
//!
//! The calibration is three arrays of six integer degree corrections (coxa,
//! femur, tibia). It is loaded once at startup and written back after every
//! single adjustment.
use core::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::robot::joint::Joint;
use crate::robot::leg::Leg;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Calibration {
    #[serde(rename = "COXA_CAL")]
    pub coxa: [i32; Leg::COUNT],
    #[serde(rename = "FEMUR_CAL")]
    pub femur: [i32; Leg::COUNT],
    #[serde(rename = "TIBIA_CAL")]
    pub tibia: [i32; Leg::COUNT],
}

impl Calibration {
    pub fn get(&self, joint: Joint, leg: Leg) -> i32 {
        self.array(joint)[leg.index()]
    }

    pub fn get_mut(&mut self, joint: Joint, leg: Leg) -> &mut i32 {
        let array = match joint {
            Joint::Coxa => &mut self.coxa,
            Joint::Femur => &mut self.femur,
            Joint::Tibia => &mut self.tibia,
        };
        &mut array[leg.index()]
    }

    pub fn array(&self, joint: Joint) -> &[i32; Leg::COUNT] {
        match joint {
            Joint::Coxa => &self.coxa,
            Joint::Femur => &self.femur,
            Joint::Tibia => &self.tibia,
        }
    }
}

impl Display for Calibration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "coxa: {:?}, femur: {:?}, tibia: {:?}",
            self.coxa, self.femur, self.tibia
        )
    }
}

/// Selected calibration entry: which array and which element of it.
///
/// Stepping past either end of an array moves into the neighbouring array,
/// and the arrays wrap around (tibia -> coxa, coxa -> tibia).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationCursor {
    array: usize,
    element: usize,
}

impl CalibrationCursor {
    pub const fn new() -> Self {
        Self {
            array: 0,
            element: 0,
        }
    }

    pub fn joint(&self) -> Joint {
        Joint::ALL[self.array]
    }

    pub fn leg(&self) -> Leg {
        Leg::ALL[self.element]
    }

    /// Moves one element forward (`true`) or backward.
    pub fn step(&mut self, forward: bool) {
        let arrays = Joint::ALL.len();
        if forward {
            if self.element + 1 >= Leg::COUNT {
                self.element = 0;
                self.array = (self.array + 1) % arrays;
            } else {
                self.element += 1;
            }
        } else if self.element == 0 {
            self.element = Leg::COUNT - 1;
            self.array = (self.array + arrays - 1) % arrays;
        } else {
            self.element -= 1;
        }
    }
}

impl Default for CalibrationCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistence backend for the calibration.
pub trait CalibrationStore {
    /// Loads the stored calibration. A missing store yields zeros and is
    /// initialised so the next load succeeds.
    fn load(&mut self) -> Result<Calibration, Error>;

    fn save(&mut self, calibration: &Calibration) -> Result<(), Error>;
}

/// Store kept in RAM, for tests and targets without a filesystem.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    saved: Option<Calibration>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(calibration: Calibration) -> Self {
        Self {
            saved: Some(calibration),
            saves: 0,
        }
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl CalibrationStore for MemoryStore {
    fn load(&mut self) -> Result<Calibration, Error> {
        match self.saved {
            Some(calibration) => Ok(calibration),
            None => {
                let calibration = Calibration::default();
                self.saved = Some(calibration);
                Ok(calibration)
            }
        }
    }

    fn save(&mut self, calibration: &Calibration) -> Result<(), Error> {
        self.saved = Some(*calibration);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use file::FileStore;

#[cfg(feature = "std")]
mod file {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use log::{error, info, warn};

    use super::{Calibration, CalibrationStore};
    use crate::Error;

    /// JSON calibration file, compatible with `{"COXA_CAL": [..], ...}`.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    impl CalibrationStore for FileStore {
        fn load(&mut self) -> Result<Calibration, Error> {
            let bytes = match fs::read(&self.path) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(
                        "Calibration file {} not found. Writing default values",
                        self.path.display()
                    );
                    let calibration = Calibration::default();
                    if let Err(e) = self.save(&calibration) {
                        error!("Could not write default calibration: {e}");
                    }
                    return Ok(calibration);
                }
                Err(e) => return Err(e.into()),
            };
            info!("Loading calibration from {}", self.path.display());
            Ok(serde_json::from_slice(&bytes)?)
        }

        fn save(&mut self, calibration: &Calibration) -> Result<(), Error> {
            let text = serde_json::to_string_pretty(calibration)?;
            fs::write(&self.path, text)?;
            Ok(())
        }
    }
}
