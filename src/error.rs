use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// An inverse trigonometric argument fell outside `[-1, 1]` beyond
    /// tolerance, or a ratio's denominator vanished.
    #[error("invalid angle domain in {function}: {reason}")]
    InvalidAngleDomain {
        function: &'static str,
        reason: String,
    },

    /// The panel normal is parallel to the reference up axis, or has no length.
    #[error("degenerate panel geometry for normal {normal:?}")]
    DegenerateGeometry { normal: [f64; 3] },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn angle_domain(function: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAngleDomain {
            function,
            reason: reason.into(),
        }
    }
}

impl From<solar_positioning::Error> for TrackerError {
    fn from(err: solar_positioning::Error) -> Self {
        Self::EphemerisUnavailable(err.to_string())
    }
}
