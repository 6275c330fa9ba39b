pub mod angles;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod geometry;
pub mod simulation;
pub mod tracker;
pub mod types;

pub use angles::{
    clamp_unit, control_angles, panel_normal, roll_pitch, sun_vector, tilt_rotation,
    DEGENERATE_EPSILON, DOMAIN_TOLERANCE,
};

pub use config::SimulationConfig;

pub use ephemeris::{SolarEphemeris, SpaEphemeris};

pub use error::{Result, TrackerError};

pub use geometry::{build_rectangle, reference_up};

pub use simulation::{day_window, sample_count, simulate_day, simulate_step, step_duration};

pub use tracker::{run_end, track_step, TrackerRun, DEFAULT_STEP_MINUTES};

pub use types::{
    ControlAngles, ControlPolicy, DaySample, DaySimulation, GeoLocation, OrientationVector,
    PanelDimensions, PanelPolygon, RollPitch, SolarPosition, TiltRotation, TrackerFrame,
};
