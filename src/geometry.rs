use nalgebra::{Point3, Vector3};

use crate::error::{Result, TrackerError};
use crate::types::PanelPolygon;

/// Below this length a cross product is treated as zero.
const PARALLEL_EPSILON: f64 = 1e-9;

pub fn reference_up() -> Vector3<f64> {
    Vector3::y()
}

/// Rectangle of `width` x `height` centred on `center`, lying in the plane
/// perpendicular to `normal`.
///
/// `normal` is normalized first, so any non-zero length is accepted. The width
/// edge runs along `up x normal` with `up = (0, 1, 0)`; a normal parallel to
/// `up` leaves that direction undefined and is rejected.
pub fn build_rectangle(
    center: Point3<f64>,
    width: f64,
    height: f64,
    normal: Vector3<f64>,
) -> Result<PanelPolygon> {
    check_extent("width", width)?;
    check_extent("height", height)?;

    let degenerate = || TrackerError::DegenerateGeometry {
        normal: [normal.x, normal.y, normal.z],
    };
    if !normal.iter().all(|c| c.is_finite()) {
        return Err(degenerate());
    }
    let n = normal
        .try_normalize(PARALLEL_EPSILON)
        .ok_or_else(degenerate)?;

    let u = reference_up()
        .cross(&n)
        .try_normalize(PARALLEL_EPSILON)
        .ok_or_else(degenerate)?
        * (width / 2.0);
    let v = n
        .cross(&u)
        .try_normalize(PARALLEL_EPSILON)
        .ok_or_else(degenerate)?
        * (height / 2.0);

    Ok(PanelPolygon {
        vertices: [
            center - u - v,
            center + u - v,
            center + u + v,
            center - u + v,
        ],
    })
}

fn check_extent(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TrackerError::invalid_parameter(
            name,
            format!("{value} must be a positive finite length"),
        ))
    }
}
