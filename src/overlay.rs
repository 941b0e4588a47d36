//! Per-frame composition of the dashboard cluster and the goal markers.
//!
//! Everything is placed at fixed world coordinates; the cluster does not follow
//! the camera.

use crate::gauges::{draw_speedometer, draw_tachometer, FuelGauge, TemperatureGauge};
use crate::goal::GoalState;
use crate::scene::{draw_label, draw_sphere, GeometryBuffer};
use crate::telemetry::TelemetryState;
use glam::{DVec3, Vec2, Vec3, Vec4};

const TITLE: &str = "CAR DASHBOARD";
const TITLE_POSITION: Vec3 = Vec3::new(0.0, 2.5, 0.5);
const TITLE_SIZE: f32 = 0.25;
const TITLE_RGB: Vec3 = Vec3::new(0.0, 0.5, 1.0);

const DIAL_RADIUS: f32 = 0.8;
const SPEEDOMETER_CENTER: Vec2 = Vec2::new(-2.5, 1.0);
const TACHOMETER_CENTER: Vec2 = Vec2::new(2.5, 1.0);

const BAR_WIDTH: f32 = 1.5;
const BAR_HEIGHT: f32 = 0.4;
const FUEL_CENTER: Vec2 = Vec2::new(-2.5, -0.5);
const TEMPERATURE_CENTER: Vec2 = Vec2::new(2.5, -0.5);

const GOAL_MARKER_RADIUS: f32 = 0.15;
const GOAL_MARKER_HEIGHT: f32 = 0.2;
const GOAL_MARKER_RGBA: Vec4 = Vec4::new(1.0, 0.0, 0.0, 0.8);

const MARKER_LABEL_SIZE: f32 = 0.1;
const VEHICLE_LABEL_LIFT: f64 = 2.0;
const VEHICLE_LABEL_RGB: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const GOAL_LABEL_HEIGHT: f32 = 0.5;
const GOAL_LABEL_RGB: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Counts from one `OverlayOrchestrator::render` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayReport {
    pub appended: usize,
    pub dropped: usize,
    /// The buffer had no capacity at all, so nothing was attempted.
    pub skipped: bool,
}

#[derive(Clone, Debug, Default)]
pub struct OverlayOrchestrator {
    fuel_gauge: FuelGauge,
    temperature_gauge: TemperatureGauge,
}

impl OverlayOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fuel_gauge(&self) -> &FuelGauge {
        &self.fuel_gauge
    }

    pub fn temperature_gauge(&self) -> &TemperatureGauge {
        &self.temperature_gauge
    }

    /// Appends one frame of overlay geometry. `vehicle` is the resolved world
    /// position of the vehicle body; its label is left out when it is `None`.
    pub fn render(
        &mut self,
        telemetry: &TelemetryState,
        goal: &GoalState,
        vehicle: Option<DVec3>,
        buffer: &mut GeometryBuffer,
    ) -> OverlayReport {
        if buffer.capacity() == 0 {
            return OverlayReport {
                skipped: true,
                ..Default::default()
            };
        }
        let len_before = buffer.len();
        let dropped_before = buffer.dropped();

        draw_label(
            buffer,
            TITLE_POSITION.x,
            TITLE_POSITION.y,
            TITLE_POSITION.z,
            TITLE,
            TITLE_SIZE,
            TITLE_RGB,
        );

        draw_speedometer(buffer, telemetry.speed_kmh, SPEEDOMETER_CENTER, DIAL_RADIUS);
        draw_tachometer(buffer, telemetry.engine_rpm, TACHOMETER_CENTER, DIAL_RADIUS);
        self.fuel_gauge.draw(
            buffer,
            telemetry.fuel_percent,
            FUEL_CENTER,
            BAR_WIDTH,
            BAR_HEIGHT,
        );
        self.temperature_gauge.draw(
            buffer,
            telemetry.temperature_c,
            TEMPERATURE_CENTER,
            BAR_WIDTH,
            BAR_HEIGHT,
        );

        let goal_xy = goal.planar().as_vec2();
        draw_sphere(
            buffer,
            goal_xy.extend(GOAL_MARKER_HEIGHT),
            GOAL_MARKER_RADIUS,
            GOAL_MARKER_RGBA,
        );

        if let Some(vehicle) = vehicle {
            let anchor = (vehicle + DVec3::Z * VEHICLE_LABEL_LIFT).as_vec3();
            draw_label(
                buffer,
                anchor.x,
                anchor.y,
                anchor.z,
                &format!("Car: ({:.2}, {:.2})", vehicle.x, vehicle.y),
                MARKER_LABEL_SIZE,
                VEHICLE_LABEL_RGB,
            );
        }

        draw_label(
            buffer,
            goal_xy.x,
            goal_xy.y,
            GOAL_LABEL_HEIGHT,
            &format!("Goal: ({:.2}, {:.2})", goal.position.x, goal.position.y),
            MARKER_LABEL_SIZE,
            GOAL_LABEL_RGB,
        );

        let report = OverlayReport {
            appended: buffer.len() - len_before,
            dropped: buffer.dropped() - dropped_before,
            skipped: false,
        };
        if report.dropped > 0 {
            log::warn!(
                "overlay frame dropped {} primitives (capacity {})",
                report.dropped,
                buffer.capacity()
            );
        }
        report
    }
}
