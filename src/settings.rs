use crate::scene::DEFAULT_LABEL_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;

const SETTINGS_SCHEMA_VERSION: u32 = 1;
pub const SETTINGS_FILE_NAME: &str = "dashboard.json";
const DEFAULT_GEOMETRY_CAPACITY: usize = 1000;
const MAX_GEOMETRY_CAPACITY: usize = 100_000;
// Room for at least one byte of text plus the terminator slot.
const MIN_LABEL_CAPACITY: usize = 2;
const MAX_LABEL_CAPACITY: usize = 1024;
const DEFAULT_GOAL: [f64; 2] = [1.0, 1.0];

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "settings io error: {error}"),
            Self::Parse(error) => write!(f, "settings parse error: {error}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Parse(error) => Some(error),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
    pub schema_version: u32,
    /// Primitive slots the host scene offers the overlay each frame.
    pub geometry_capacity: usize,
    pub label_capacity: usize,
    /// Fixed goal RNG seed; `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
    pub diagnostics: bool,
    pub initial_goal_x: f64,
    pub initial_goal_y: f64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            geometry_capacity: DEFAULT_GEOMETRY_CAPACITY,
            label_capacity: DEFAULT_LABEL_CAPACITY,
            rng_seed: None,
            diagnostics: true,
            initial_goal_x: DEFAULT_GOAL[0],
            initial_goal_y: DEFAULT_GOAL[1],
        }
    }
}

impl DashboardSettings {
    pub fn sanitized(mut self) -> Self {
        self.schema_version = SETTINGS_SCHEMA_VERSION;
        self.geometry_capacity = self.geometry_capacity.min(MAX_GEOMETRY_CAPACITY);
        self.label_capacity = self
            .label_capacity
            .clamp(MIN_LABEL_CAPACITY, MAX_LABEL_CAPACITY);
        let bound = crate::goal::GOAL_BOUNDS;
        self.initial_goal_x = sanitize_goal(self.initial_goal_x, DEFAULT_GOAL[0], bound);
        self.initial_goal_y = sanitize_goal(self.initial_goal_y, DEFAULT_GOAL[1], bound);
        self
    }
}

fn sanitize_goal(value: f64, fallback: f64, bound: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-bound, bound)
    } else {
        fallback
    }
}

/// Reads and sanitizes settings. A missing file is not an error and yields `None`.
pub fn load_settings(path: &Path) -> Result<Option<DashboardSettings>, SettingsError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    let settings = serde_json::from_str::<DashboardSettings>(&raw)?;
    Ok(Some(settings.sanitized()))
}

pub fn save_settings(path: &Path, settings: &DashboardSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = serde_json::to_vec_pretty(settings)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
