use chrono::{DateTime, Duration, NaiveTime, Offset, TimeZone};
use tracing::{debug, trace};

use crate::angles::roll_pitch;
use crate::ephemeris::SolarEphemeris;
use crate::error::{Result, TrackerError};
use crate::types::{DaySample, DaySimulation, GeoLocation};

pub fn step_duration(name: &'static str, minutes: i32) -> Result<Duration> {
    if minutes <= 0 {
        return Err(TrackerError::invalid_parameter(
            name,
            format!("{minutes} must be a positive number of minutes"),
        ));
    }
    Duration::try_minutes(i64::from(minutes))
        .ok_or_else(|| TrackerError::invalid_parameter(name, "step is out of range"))
}

/// `time` on `day`'s calendar date, in `day`'s timezone.
///
/// A clock time skipped by a transition resolves to the nearest existing
/// second on the same date: forward for the earliest bound, backward for the
/// latest.
pub(crate) fn local_instant<Tz: TimeZone>(
    day: &DateTime<Tz>,
    time: NaiveTime,
    earliest: bool,
) -> Result<DateTime<Tz>> {
    let date = day.date_naive();
    let tz = day.timezone();
    let requested = date.and_time(time);
    let step = if earliest {
        Duration::seconds(1)
    } else {
        Duration::seconds(-1)
    };

    let mut local = requested;
    loop {
        let resolved = tz.from_local_datetime(&local);
        let instant = if earliest {
            resolved.earliest()
        } else {
            resolved.latest()
        };
        if let Some(instant) = instant {
            if local != requested {
                debug!(%requested, resolved = %local, "local time skipped by a clock change");
            }
            return Ok(instant);
        }
        local = match local.checked_add_signed(step) {
            Some(next) if next.date() == date => next,
            _ => {
                return Err(TrackerError::invalid_parameter(
                    "day",
                    format!("{requested} has no existing local time on {date} in this timezone"),
                ))
            }
        };
    }
}

/// First and last second of `day`'s calendar date, in `day`'s timezone.
pub fn day_window<Tz: TimeZone>(day: &DateTime<Tz>) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let start = local_instant(day, NaiveTime::MIN, true)?;
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| TrackerError::invalid_parameter("day", "invalid end of day"))?;
    let end = local_instant(day, last_second, false)?;
    Ok((start, end))
}

/// Number of steps of `step` from `start` that do not pass `end`.
pub fn sample_count<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>, step: Duration) -> usize {
    let span = end.clone().signed_duration_since(start.clone());
    if span < Duration::zero() || step <= Duration::zero() {
        return 0;
    }
    match (span.num_milliseconds(), step.num_milliseconds()) {
        (_, 0) => 0,
        (s, d) => (s / d) as usize + 1,
    }
}

/// Ephemeris lookup followed by the pass-through conversion for one instant.
pub fn simulate_step<E, Tz>(
    ephemeris: &E,
    location: &GeoLocation,
    time: &DateTime<Tz>,
) -> Result<DaySample>
where
    E: SolarEphemeris,
    Tz: TimeZone,
{
    let pos = ephemeris.solar_position(location, time)?;
    let rp = roll_pitch(&pos);
    let sample = DaySample {
        time: time.with_timezone(&time.offset().fix()),
        elevation: pos.elevation(),
        azimuth: pos.azimuth(),
        roll: rp.roll_rad.to_degrees(),
        pitch: rp.pitch_deg,
    };
    trace!(time = %sample.time, elevation = sample.elevation, azimuth = sample.azimuth, "day step");
    Ok(sample)
}

pub fn simulate_day<E, Tz>(
    ephemeris: &E,
    location: &GeoLocation,
    day: &DateTime<Tz>,
    interval_minutes: i32,
) -> Result<DaySimulation>
where
    E: SolarEphemeris,
    Tz: TimeZone,
{
    let step = step_duration("interval_minutes", interval_minutes)?;
    let (start, end) = day_window(day)?;
    let expected = sample_count(&start, &end, step);
    debug!(
        latitude = location.latitude,
        longitude = location.longitude,
        interval_minutes,
        expected,
        "simulating day"
    );

    let mut result = DaySimulation::with_capacity(expected);
    let mut current = start;
    while current <= end {
        result.push(simulate_step(ephemeris, location, &current)?);
        current = match current.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }

    debug!(samples = result.len(), "day simulation complete");
    Ok(result)
}
