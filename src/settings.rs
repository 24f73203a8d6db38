//! Session configuration
//!
//! Loaded from a JSON file by the headless runner; every field has a default
//! so a partial file is fine.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::Viewport;

/// How `Session::advance_frame` turns wall-clock time into ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Timestep {
    /// One tick per rendered frame, whatever its length
    #[default]
    PerFrame,
    /// A fixed tick rate decoupled from the frame rate
    Fixed {
        hz: f32,
        /// Cap on ticks run for one frame
        max_substeps: u32,
    },
}

impl Timestep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timestep::PerFrame => "per-frame",
            Timestep::Fixed { .. } => "fixed",
        }
    }
}

/// Errors from loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings file is not valid JSON for `Settings`
    Parse(serde_json::Error),
    /// Parsed fine but a value is out of range
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "Failed to read settings: {}", err),
            SettingsError::Parse(err) => write!(f, "Failed to parse settings: {}", err),
            SettingsError::Invalid(reason) => write!(f, "Invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Parse(err) => Some(err),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Visible window in world units
    pub viewport: Viewport,
    /// Level generation seed. `None` means `DEFAULT_SEED` in the library;
    /// the runner picks one from the clock instead.
    pub seed: Option<u64>,
    pub starting_lives: u32,
    pub timestep: Timestep,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: None,
            starting_lives: STARTING_LIVES,
            timestep: Timestep::PerFrame,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        // Spawn, pipes and the floating band all hang off the bottom edge
        if !(self.viewport.height > 2.0 * FLOATING_BAND_MARGIN) {
            return Err(SettingsError::Invalid(format!(
                "viewport height must exceed {}, got {}",
                2.0 * FLOATING_BAND_MARGIN,
                self.viewport.height
            )));
        }
        if !(self.viewport.width > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "viewport width must be positive, got {}",
                self.viewport.width
            )));
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::Invalid(
                "starting_lives must be at least 1".to_string(),
            ));
        }
        if let Timestep::Fixed { hz, max_substeps } = self.timestep {
            if !(hz > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "tick rate must be positive, got {}",
                    hz
                )));
            }
            if max_substeps == 0 {
                return Err(SettingsError::Invalid(
                    "max_substeps must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}
