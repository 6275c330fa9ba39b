use chrono::{DateTime, FixedOffset};
use nalgebra::{Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Unit vector in the local East/North/Up frame (x = east, y = north, z = up).
pub type OrientationVector = Unit<Vector3<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = TrackerError;

    fn try_from(raw: RawGeoLocation) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(TrackerError::invalid_parameter(
                "latitude",
                format!("{latitude} is not within [-90, 90] degrees"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(TrackerError::invalid_parameter(
                "longitude",
                format!("{longitude} is not within [-180, 180] degrees"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Apparent sun position in degrees.
///
/// Azimuth is measured clockwise from north in `[0, 360)`, elevation above the
/// horizon in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    azimuth: f64,
    elevation: f64,
}

impl SolarPosition {
    pub fn new(azimuth: f64, elevation: f64) -> Result<Self> {
        if !azimuth.is_finite() || !(0.0..360.0).contains(&azimuth) {
            return Err(TrackerError::EphemerisUnavailable(format!(
                "azimuth {azimuth} outside [0, 360)"
            )));
        }
        if !elevation.is_finite() || !(-90.0..=90.0).contains(&elevation) {
            return Err(TrackerError::EphemerisUnavailable(format!(
                "elevation {elevation} outside [-90, 90]"
            )));
        }
        Ok(Self { azimuth, elevation })
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn azimuth_rad(&self) -> f64 {
        self.azimuth.to_radians()
    }

    pub fn elevation_rad(&self) -> f64 {
        self.elevation.to_radians()
    }

    /// Strictly above the horizon; elevation exactly zero counts as down.
    pub fn is_sun_up(&self) -> bool {
        self.elevation > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlPolicy {
    /// Tilt `φ` and rotation `β` derived from the sun direction.
    GeometricTiltRotation,
    /// Azimuth and elevation relabelled as roll and pitch.
    DirectPassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TiltRotation {
    pub tilt_rad: f64,
    pub rotation_rad: f64,
    /// Set when an inverse-trig argument was pulled back into `[-1, 1]`.
    pub clamped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollPitch {
    pub roll_rad: f64,
    pub pitch_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ControlAngles {
    TiltRotation(TiltRotation),
    RollPitch(RollPitch),
}

impl ControlAngles {
    pub fn policy(&self) -> ControlPolicy {
        match self {
            Self::TiltRotation(_) => ControlPolicy::GeometricTiltRotation,
            Self::RollPitch(_) => ControlPolicy::DirectPassThrough,
        }
    }
}

/// Four vertices of a planar rectangle; consecutive vertices share an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelPolygon {
    pub vertices: [Point3<f64>; 4],
}

impl PanelPolygon {
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / 4.0)
    }

    pub fn edge_lengths(&self) -> [f64; 4] {
        let v = &self.vertices;
        [
            (v[1] - v[0]).norm(),
            (v[2] - v[1]).norm(),
            (v[3] - v[2]).norm(),
            (v[0] - v[3]).norm(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelDimensions {
    pub center: Point3<f64>,
    pub width: f64,
    pub height: f64,
}

impl Default for PanelDimensions {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            width: 0.5,
            height: 0.3,
        }
    }
}

/// One index of a [`DaySimulation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySample {
    pub time: DateTime<FixedOffset>,
    pub elevation: f64,
    pub azimuth: f64,
    pub roll: f64,
    pub pitch: f64,
}

/// Five index-aligned series covering one calendar day. All angles in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DaySimulation {
    times: Vec<DateTime<FixedOffset>>,
    elevations: Vec<f64>,
    azimuths: Vec<f64>,
    rolls: Vec<f64>,
    pitches: Vec<f64>,
}

impl DaySimulation {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            elevations: Vec::with_capacity(capacity),
            azimuths: Vec::with_capacity(capacity),
            rolls: Vec::with_capacity(capacity),
            pitches: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, sample: DaySample) {
        self.times.push(sample.time);
        self.elevations.push(sample.elevation);
        self.azimuths.push(sample.azimuth);
        self.rolls.push(sample.roll);
        self.pitches.push(sample.pitch);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[DateTime<FixedOffset>] {
        &self.times
    }

    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    pub fn azimuths(&self) -> &[f64] {
        &self.azimuths
    }

    pub fn rolls(&self) -> &[f64] {
        &self.rolls
    }

    pub fn pitches(&self) -> &[f64] {
        &self.pitches
    }

    pub fn get(&self, index: usize) -> Option<DaySample> {
        Some(DaySample {
            time: *self.times.get(index)?,
            elevation: self.elevations[index],
            azimuth: self.azimuths[index],
            roll: self.rolls[index],
            pitch: self.pitches[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = DaySample> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Index and sample with the highest elevation; the earliest wins ties.
    pub fn peak_elevation(&self) -> Option<(usize, DaySample)> {
        let mut best: Option<usize> = None;
        for (i, &e) in self.elevations.iter().enumerate() {
            match best {
                Some(b) if self.elevations[b] >= e => {}
                _ => best = Some(i),
            }
        }
        let i = best?;
        Some((i, self.get(i)?))
    }
}

/// A single emitted step of a tracker run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackerFrame {
    pub time: DateTime<FixedOffset>,
    pub position: SolarPosition,
    pub angles: TiltRotation,
    pub sun_vector: OrientationVector,
    pub panel_normal: OrientationVector,
    pub panel: PanelPolygon,
}
