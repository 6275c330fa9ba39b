//! Sun position providers.
//!
//! The engine only depends on [`SolarEphemeris`]. [`SpaEphemeris`] wraps the
//! NREL Solar Position Algorithm from `solar-positioning`.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use solar_positioning::{spa, time::DeltaT, RefractionCorrection};

use crate::error::Result;
use crate::types::{GeoLocation, SolarPosition};

pub trait SolarEphemeris {
    /// Raw `(azimuth, elevation)` in degrees for `location` at `time`.
    fn azimuth_elevation<Tz: TimeZone>(
        &self,
        location: &GeoLocation,
        time: &DateTime<Tz>,
    ) -> Result<(f64, f64)>;

    /// Validated position; out-of-range output is reported as unavailable.
    fn solar_position<Tz: TimeZone>(
        &self,
        location: &GeoLocation,
        time: &DateTime<Tz>,
    ) -> Result<SolarPosition> {
        let (azimuth, elevation) = self.azimuth_elevation(location, time)?;
        SolarPosition::new(azimuth, elevation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaEphemeris {
    pub observer_elevation_m: f64,
    pub refraction: bool,
}

impl Default for SpaEphemeris {
    fn default() -> Self {
        Self {
            observer_elevation_m: 0.0,
            refraction: true,
        }
    }
}

impl SolarEphemeris for SpaEphemeris {
    fn azimuth_elevation<Tz: TimeZone>(
        &self,
        location: &GeoLocation,
        time: &DateTime<Tz>,
    ) -> Result<(f64, f64)> {
        let utc = time.with_timezone(&Utc);
        let delta_t = DeltaT::estimate_from_date(utc.year(), utc.month())?;
        let refraction = if self.refraction {
            Some(RefractionCorrection::standard())
        } else {
            None
        };
        let pos = spa::solar_position(
            utc,
            location.latitude,
            location.longitude,
            self.observer_elevation_m,
            delta_t,
            refraction,
        )?;
        Ok((pos.azimuth(), pos.elevation_angle()))
    }
}
