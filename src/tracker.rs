//! Step-by-step panel tracking for 3D playback.
//!
//! A run starts at some instant and advances by a fixed step until a clock
//! time later that same day. The caller pulls frames from [`TrackerRun`] at
//! whatever pace it likes; each step while the sun is down is skipped.

use chrono::{DateTime, Duration, NaiveTime, Offset, TimeZone};
use tracing::{debug, trace};

use crate::angles::{panel_normal, sun_vector, tilt_rotation};
use crate::ephemeris::SolarEphemeris;
use crate::error::{Result, TrackerError};
use crate::geometry::build_rectangle;
use crate::simulation::{local_instant, step_duration};
use crate::types::{GeoLocation, PanelDimensions, TrackerFrame};

pub const DEFAULT_STEP_MINUTES: i32 = 60;

/// `hour:minute:00` on the calendar date of `start`, in its timezone.
pub fn run_end<Tz: TimeZone>(start: &DateTime<Tz>, hour: u32, minute: u32) -> Result<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        TrackerError::invalid_parameter("end", format!("{hour:02}:{minute:02} is not a clock time"))
    })?;
    local_instant(start, time, true)
}

/// Frame for `time`, or `None` when the sun is not above the horizon.
pub fn track_step<E, Tz>(
    ephemeris: &E,
    location: &GeoLocation,
    time: &DateTime<Tz>,
    panel: &PanelDimensions,
) -> Result<Option<TrackerFrame>>
where
    E: SolarEphemeris,
    Tz: TimeZone,
{
    let position = ephemeris.solar_position(location, time)?;
    if !position.is_sun_up() {
        return Ok(None);
    }

    let angles = tilt_rotation(&position)?;
    let normal = panel_normal(&angles);
    let polygon = build_rectangle(panel.center, panel.width, panel.height, normal.into_inner())?;

    Ok(Some(TrackerFrame {
        time: time.with_timezone(&time.offset().fix()),
        position,
        angles,
        sun_vector: sun_vector(&position),
        panel_normal: normal,
        panel: polygon,
    }))
}

pub struct TrackerRun<'a, E, Tz: TimeZone> {
    ephemeris: &'a E,
    location: GeoLocation,
    panel: PanelDimensions,
    next: Option<DateTime<Tz>>,
    end: DateTime<Tz>,
    step: Duration,
}

impl<'a, E, Tz> TrackerRun<'a, E, Tz>
where
    E: SolarEphemeris,
    Tz: TimeZone,
{
    pub fn new(
        ephemeris: &'a E,
        location: GeoLocation,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        step_minutes: i32,
        panel: PanelDimensions,
    ) -> Result<Self> {
        let step = step_duration("step_minutes", step_minutes)?;
        debug!(?start, ?end, step_minutes, "tracker run");
        Ok(Self {
            ephemeris,
            location,
            panel,
            next: Some(start),
            end,
            step,
        })
    }
}

impl<E, Tz> Iterator for TrackerRun<'_, E, Tz>
where
    E: SolarEphemeris,
    Tz: TimeZone,
{
    type Item = Result<TrackerFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next.take()?;
            if current > self.end {
                return None;
            }
            self.next = current.clone().checked_add_signed(self.step);

            match track_step(self.ephemeris, &self.location, &current, &self.panel) {
                Ok(Some(frame)) => return Some(Ok(frame)),
                Ok(None) => trace!(time = %current.naive_local(), "sun down, step skipped"),
                Err(err) => {
                    self.next = None;
                    return Some(Err(err));
                }
            }
        }
    }
}
