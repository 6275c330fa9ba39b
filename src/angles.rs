use nalgebra::{Unit, Vector3};
use tracing::warn;

use crate::error::{Result, TrackerError};
use crate::types::{
    ControlAngles, ControlPolicy, OrientationVector, RollPitch, SolarPosition, TiltRotation,
};

/// How far past ±1 an inverse-trig argument may drift before it is an error.
pub const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Below this `|cos φ|` the rotation ratio `sin θ / cos φ` is undefined.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Brings `value` into `[-1, 1]` for `function`, returning whether it had to move.
///
/// Values beyond [`DOMAIN_TOLERANCE`] or non-finite values are rejected.
pub fn clamp_unit(function: &'static str, value: f64) -> Result<(f64, bool)> {
    if !value.is_finite() {
        return Err(TrackerError::angle_domain(
            function,
            format!("argument {value} is not finite"),
        ));
    }
    if value.abs() <= 1.0 {
        return Ok((value, false));
    }
    if value.abs() > 1.0 + DOMAIN_TOLERANCE {
        return Err(TrackerError::angle_domain(
            function,
            format!("argument {value} lies outside [-1, 1]"),
        ));
    }
    let clamped = value.clamp(-1.0, 1.0);
    warn!(function, value, clamped, "clamped inverse-trig argument");
    Ok((clamped, true))
}

/// Policy A: tilt `φ = asin(-cos θ cos α)`, rotation `β = acos(sin θ / cos φ)`.
///
/// Only meaningful for a sun above the horizon; callers gate on
/// [`SolarPosition::is_sun_up`].
pub fn tilt_rotation(pos: &SolarPosition) -> Result<TiltRotation> {
    let theta = pos.elevation_rad();
    let alpha = pos.azimuth_rad();

    let (tilt_arg, tilt_clamped) = clamp_unit("arcsin", -theta.cos() * alpha.cos())?;
    let tilt = tilt_arg.asin();

    let cos_tilt = tilt.cos();
    if cos_tilt.abs() < DEGENERATE_EPSILON {
        return Err(TrackerError::angle_domain(
            "arccos",
            format!(
                "cos(tilt) = {cos_tilt:e} at elevation {}°, azimuth {}°",
                pos.elevation(),
                pos.azimuth()
            ),
        ));
    }
    let (rot_arg, rot_clamped) = clamp_unit("arccos", theta.sin() / cos_tilt)?;

    Ok(TiltRotation {
        tilt_rad: tilt,
        rotation_rad: rot_arg.acos(),
        clamped: tilt_clamped || rot_clamped,
    })
}

/// Policy B: azimuth as roll in radians, elevation as pitch in degrees.
pub fn roll_pitch(pos: &SolarPosition) -> RollPitch {
    RollPitch {
        roll_rad: pos.azimuth_rad(),
        pitch_deg: pos.elevation(),
    }
}

pub fn control_angles(policy: ControlPolicy, pos: &SolarPosition) -> Result<ControlAngles> {
    match policy {
        ControlPolicy::GeometricTiltRotation => tilt_rotation(pos).map(ControlAngles::TiltRotation),
        ControlPolicy::DirectPassThrough => Ok(ControlAngles::RollPitch(roll_pitch(pos))),
    }
}

pub fn sun_vector(pos: &SolarPosition) -> OrientationVector {
    let theta = pos.elevation_rad();
    let alpha = pos.azimuth_rad();
    Unit::new_normalize(Vector3::new(
        alpha.sin() * theta.cos(),
        alpha.cos() * theta.cos(),
        theta.sin(),
    ))
}

/// Panel face normal `(cos φ sin β, -sin φ, cos φ)`, rescaled to unit length.
pub fn panel_normal(angles: &TiltRotation) -> OrientationVector {
    let (phi, beta) = (angles.tilt_rad, angles.rotation_rad);
    Unit::new_normalize(Vector3::new(phi.cos() * beta.sin(), -phi.sin(), phi.cos()))
}
