use glam::{DVec2, DVec3};
use rand::Rng;

/// Half-width of the square the goal is redrawn in.
pub const GOAL_BOUNDS: f64 = 2.0;
pub const REACHED_TOLERANCE: f64 = 0.2;
/// Height the goal sits at after a relocation.
pub const GOAL_ELEVATION: f64 = 0.01;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GoalState {
    pub position: DVec3,
}

impl GoalState {
    pub fn new(position: DVec3) -> Self {
        Self { position }
    }

    pub fn planar(&self) -> DVec2 {
        self.position.truncate()
    }

    pub fn reached_by(&self, vehicle_xy: DVec2) -> bool {
        vehicle_xy.distance(self.planar()) < REACHED_TOLERANCE
    }
}

impl Default for GoalState {
    fn default() -> Self {
        Self::new(DVec3::new(0.0, 0.0, GOAL_ELEVATION))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GoalTransition {
    Seeking,
    Retargeted { from: DVec3, to: DVec3 },
}

impl GoalTransition {
    pub fn is_retargeted(&self) -> bool {
        matches!(self, Self::Retargeted { .. })
    }
}

/// Moves the goal somewhere new each time the vehicle gets close enough to it.
pub struct GoalTransitionController<R: Rng> {
    rng: R,
    relocations: u64,
}

impl<R: Rng> GoalTransitionController<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            relocations: 0,
        }
    }

    pub fn relocations(&self) -> u64 {
        self.relocations
    }

    pub fn step(&mut self, vehicle_xy: DVec2, goal: &mut GoalState) -> GoalTransition {
        if !goal.reached_by(vehicle_xy) {
            return GoalTransition::Seeking;
        }

        let from = goal.position;
        let to = DVec3::new(
            self.rng.random_range(-GOAL_BOUNDS..=GOAL_BOUNDS),
            self.rng.random_range(-GOAL_BOUNDS..=GOAL_BOUNDS),
            GOAL_ELEVATION,
        );
        goal.position = to;
        self.relocations += 1;
        log::debug!(
            "goal reached at ({:.2}, {:.2}); relocated to ({:.2}, {:.2})",
            from.x,
            from.y,
            to.x,
            to.y
        );
        GoalTransition::Retargeted { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller(seed: u64) -> GoalTransitionController<StdRng> {
        GoalTransitionController::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn nearby_goal_is_relocated_inside_bounds() {
        let mut controller = controller(7);
        let mut goal = GoalState::new(DVec3::new(0.1, 0.1, 0.5));

        let transition = controller.step(DVec2::ZERO, &mut goal);
        assert!(transition.is_retargeted());
        assert!(goal.position.x.abs() <= GOAL_BOUNDS);
        assert!(goal.position.y.abs() <= GOAL_BOUNDS);
        assert_eq!(goal.position.z, GOAL_ELEVATION);
        assert_eq!(controller.relocations(), 1);
    }

    #[test]
    fn distant_goal_is_left_alone() {
        let mut controller = controller(7);
        let start = DVec3::new(1.0, 1.0, 0.3);
        let mut goal = GoalState::new(start);

        let transition = controller.step(DVec2::ZERO, &mut goal);
        assert_eq!(transition, GoalTransition::Seeking);
        assert_eq!(goal.position, start);
        assert_eq!(controller.relocations(), 0);
    }

    #[test]
    fn tolerance_is_strict() {
        let goal = GoalState::new(DVec3::new(REACHED_TOLERANCE, 0.0, 0.0));
        assert!(!goal.reached_by(DVec2::ZERO));
        assert!(goal.reached_by(DVec2::new(0.01, 0.0)));
    }

    #[test]
    fn only_the_planar_distance_matters() {
        let goal = GoalState::new(DVec3::new(0.0, 0.0, 50.0));
        assert!(goal.reached_by(DVec2::new(0.05, -0.05)));
    }

    #[test]
    fn same_seed_relocates_identically() {
        let mut first = GoalState::new(DVec3::new(0.1, 0.1, 0.0));
        let mut second = first;
        let mut a = controller(42);
        let mut b = controller(42);

        for _ in 0..5 {
            let vehicle = first.planar();
            a.step(vehicle, &mut first);
            b.step(vehicle, &mut second);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn relocations_cover_the_whole_square() {
        let mut controller = controller(3);
        let mut goal = GoalState::default();
        let mut quadrants = [false; 4];
        for _ in 0..200 {
            let vehicle = goal.planar();
            controller.step(vehicle, &mut goal);
            let index = (goal.position.x >= 0.0) as usize + 2 * (goal.position.y >= 0.0) as usize;
            quadrants[index] = true;
        }
        assert!(quadrants.iter().all(|&hit| hit));
        assert_eq!(controller.relocations(), 200);
    }
}
