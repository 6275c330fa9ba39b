use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::ephemeris::SpaEphemeris;
use crate::error::{Result, TrackerError};
use crate::tracker::DEFAULT_STEP_MINUTES;
use crate::types::{GeoLocation, PanelDimensions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name used to interpret dates.
    pub timezone: String,
    pub interval_minutes: i32,
    pub tracker_step_minutes: i32,
    pub observer_elevation_m: f64,
    pub refraction: bool,
    pub panel: PanelDimensions,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latitude: -0.2105367,
            longitude: -78.491614,
            timezone: "America/Guayaquil".to_string(),
            interval_minutes: 10,
            tracker_step_minutes: DEFAULT_STEP_MINUTES,
            observer_elevation_m: 0.0,
            refraction: true,
            panel: PanelDimensions::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn location(&self) -> Result<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| TrackerError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn ephemeris(&self) -> SpaEphemeris {
        SpaEphemeris {
            observer_elevation_m: self.observer_elevation_m,
            refraction: self.refraction,
        }
    }
}
