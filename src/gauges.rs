//! Composite 2D gauge widgets built from scene primitives.
//!
//! Dials are stateless; bar gauges own the phase of their alert animation so
//! two overlays never share a timer.

mod bar;
mod color;
mod dial;

pub use self::bar::{
    BarOutcome, FuelGauge, TemperatureGauge, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C,
};
pub use self::color::{temperature_rgb, FuelBand};
pub use self::dial::{
    draw_speedometer, draw_tachometer, needle_angle, rpm_warning_ratio, SPEED_DIAL_MAX_KMH,
    TACHOMETER_MAX_RPM, TACHOMETER_WARNING_RPM,
};
