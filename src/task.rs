//! The simple-car task: a goal-seeking vehicle whose synthetic dashboard is
//! drawn into the host scene every frame.
//!
//! A host drives the task in two phases per tick. [`SimpleCarTask::transition`]
//! runs after the physics step and is the only place state changes;
//! [`SimpleCarTask::modify_scene`] reads that state and appends overlay
//! geometry.

use crate::goal::{GoalState, GoalTransition, GoalTransitionController};
use crate::overlay::{OverlayOrchestrator, OverlayReport};
use crate::scene::GeometryBuffer;
use crate::telemetry::{KinematicSample, TelemetryState};
use glam::{DVec2, DVec3};
use rand::Rng;


pub const TASK_NAME: &str = "SimpleCar";
/// Body the vehicle label is attached to.
pub const VEHICLE_BODY: &str = "car";
pub const RESIDUAL_LEN: usize = 4;

/// Resolves named bodies of the host model to world positions.
pub trait BodyLookup {
    fn body_position(&self, name: &str) -> Option<DVec3>;
}

/// Planner cost terms: planar offset from the goal, then the two controls
/// (forward, turn).
pub fn residual(position: DVec2, goal: &GoalState, ctrl: [f64; 2]) -> [f64; RESIDUAL_LEN] {
    let offset = position - goal.planar();
    [offset.x, offset.y, ctrl[0], ctrl[1]]
}

pub struct SimpleCarTask<R: Rng> {
    telemetry: TelemetryState,
    goal: GoalState,
    controller: GoalTransitionController<R>,
    overlay: OverlayOrchestrator,
    diagnostics: bool,
}

impl<R: Rng> SimpleCarTask<R> {
    pub fn new(rng: R, initial_goal: DVec3) -> Self {
        Self {
            telemetry: TelemetryState::default(),
            goal: GoalState::new(initial_goal),
            controller: GoalTransitionController::new(rng),
            overlay: OverlayOrchestrator::new(),
            diagnostics: true,
        }
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn name(&self) -> &'static str {
        TASK_NAME
    }

    pub fn telemetry(&self) -> &TelemetryState {
        &self.telemetry
    }

    pub fn goal(&self) -> &GoalState {
        &self.goal
    }

    pub fn relocations(&self) -> u64 {
        self.controller.relocations()
    }

    pub fn residual(&self, position: DVec2, ctrl: [f64; 2]) -> [f64; RESIDUAL_LEN] {
        residual(position, &self.goal, ctrl)
    }

    /// Update phase: retargets the goal if it was reached, then refreshes the
    /// telemetry from the sample.
    pub fn transition(&mut self, sample: &KinematicSample) -> GoalTransition {
        let transition = self.controller.step(sample.position, &mut self.goal);
        self.telemetry.update(sample);
        if self.diagnostics && TelemetryState::diagnostic_due(sample.time) {
            log::info!("{}", self.telemetry);
        }
        transition
    }

    /// Render phase.
    pub fn modify_scene(
        &mut self,
        bodies: &impl BodyLookup,
        buffer: &mut GeometryBuffer,
    ) -> OverlayReport {
        let vehicle = bodies.body_position(VEHICLE_BODY);
        self.overlay.render(&self.telemetry, &self.goal, vehicle, buffer)
    }
}
