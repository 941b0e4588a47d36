use glam::DVec2;
use std::fmt;

pub const MPS_TO_KMH: f64 = 3.6;
pub const IDLE_RPM: f64 = 800.0;
pub const MAX_RPM: f64 = 8000.0;
pub const RPM_PER_KMH: f64 = 40.0;
pub const FUEL_PER_STEP: f64 = 0.001;
pub const FULL_TANK_PERCENT: f64 = 100.0;
pub const BASE_TEMPERATURE_C: f64 = 60.0;
pub const MAX_TEMPERATURE_C: f64 = 120.0;

/// Diagnostics fire when simulated time sits within this window past a whole unit.
const DIAGNOSTIC_WINDOW: f64 = 0.01;

/// Planar kinematic sample of the vehicle body for one simulation step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct KinematicSample {
    pub time: f64,
    pub position: DVec2,
    pub velocity: DVec2,
}

/// Synthetic dashboard readouts derived from the vehicle's motion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TelemetryState {
    pub speed_kmh: f64,
    pub engine_rpm: f64,
    pub fuel_percent: f64,
    pub temperature_c: f64,
}

impl Default for TelemetryState {
    fn default() -> Self {
        Self {
            speed_kmh: 0.0,
            engine_rpm: IDLE_RPM,
            fuel_percent: FULL_TANK_PERCENT,
            temperature_c: BASE_TEMPERATURE_C,
        }
    }
}

impl TelemetryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes every readout from one kinematic sample. No smoothing.
    pub fn update(&mut self, sample: &KinematicSample) {
        let velocity = if sample.velocity.is_finite() {
            sample.velocity
        } else {
            DVec2::ZERO
        };
        self.speed_kmh = velocity.length() * MPS_TO_KMH;
        self.engine_rpm = engine_rpm_for_speed(self.speed_kmh);

        self.fuel_percent -= FUEL_PER_STEP;
        if self.fuel_percent < 0.0 {
            self.fuel_percent = FULL_TANK_PERCENT;
        }

        self.temperature_c = temperature_for_rpm(self.engine_rpm);
    }

    pub fn diagnostic_due(time: f64) -> bool {
        time.rem_euclid(1.0) < DIAGNOSTIC_WINDOW
    }
}

/// Stand-in engine map: linear in speed, held between idle and redline.
pub fn engine_rpm_for_speed(speed_kmh: f64) -> f64 {
    (speed_kmh * RPM_PER_KMH + IDLE_RPM).clamp(IDLE_RPM, MAX_RPM)
}

pub fn temperature_for_rpm(rpm: f64) -> f64 {
    (BASE_TEMPERATURE_C + (rpm / MAX_RPM) * 60.0).clamp(BASE_TEMPERATURE_C, MAX_TEMPERATURE_C)
}

impl fmt::Display for TelemetryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dashboard - Speed: {:.1} km/h, RPM: {:.0}, Fuel: {:.1}%, Temp: {:.1}°C",
            self.speed_kmh, self.engine_rpm, self.fuel_percent, self.temperature_c
        )
    }
}
