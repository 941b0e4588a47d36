//! Stand-in for the physics host: a point-mass car that steers toward the goal.

use glam::{DVec2, DVec3};
use simple_car_dashboard::goal::GoalState;
use simple_car_dashboard::task::{BodyLookup, VEHICLE_BODY};
use simple_car_dashboard::telemetry::KinematicSample;

const CRUISE_SPEED: f64 = 1.5;
const RESPONSE: f64 = 2.0;
const BODY_HEIGHT: f64 = 0.1;

#[derive(Clone, Debug, Default)]
pub struct PointMassHost {
    time: f64,
    position: DVec2,
    velocity: DVec2,
    ctrl: [f64; 2],
}

impl PointMassHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one explicit Euler step of `dt` seconds, accelerating toward
    /// a cruise-speed velocity aimed at the goal.
    pub fn step(&mut self, goal: &GoalState, dt: f64) -> KinematicSample {
        let to_goal = goal.planar() - self.position;
        let desired = to_goal.normalize_or_zero() * CRUISE_SPEED;
        let acceleration = (desired - self.velocity) * RESPONSE;

        let heading = self.velocity.normalize_or(DVec2::X);
        self.ctrl = [
            acceleration.dot(heading).clamp(-1.0, 1.0),
            heading.perp_dot(acceleration).clamp(-1.0, 1.0),
        ];

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
        self.time += dt;

        KinematicSample {
            time: self.time,
            position: self.position,
            velocity: self.velocity,
        }
    }

    pub fn ctrl(&self) -> [f64; 2] {
        self.ctrl
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }
}

impl BodyLookup for PointMassHost {
    fn body_position(&self, name: &str) -> Option<DVec3> {
        (name == VEHICLE_BODY).then(|| self.position.extend(BODY_HEIGHT))
    }
}
