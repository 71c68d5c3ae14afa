//! Raw sensor event shapes as the platform delivers them.
//!
//! Fields are optional because a platform may deliver a partially-populated
//! event (e.g. mid-calibration); the adapters drop such samples whole.

/// Tilt event: front-back (`beta`) and left-right (`gamma`) in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationEvent {
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

/// Linear acceleration in device units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Acceleration {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Angular rate around the device's three axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationRate {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

/// Motion event carrying acceleration and rotation rate together.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionEvent {
    pub acceleration: Option<Acceleration>,
    pub rotation_rate: Option<RotationRate>,
}

impl OrientationEvent {
    #[must_use]
    pub fn new(beta: f64, gamma: f64) -> Self {
        Self {
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }
}

impl MotionEvent {
    #[must_use]
    pub fn new(accel: (f64, f64), rate: (f64, f64, f64)) -> Self {
        Self {
            acceleration: Some(Acceleration {
                x: Some(accel.0),
                y: Some(accel.1),
            }),
            rotation_rate: Some(RotationRate {
                alpha: Some(rate.0),
                beta: Some(rate.1),
                gamma: Some(rate.2),
            }),
        }
    }
}
