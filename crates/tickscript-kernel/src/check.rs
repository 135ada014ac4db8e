//! The `check` tool: position/angle assertions that trigger script replay.
//!
//! On the tick before a `check` invocation is scheduled, the executor hands
//! the coordinator the current player state. If the state is outside the
//! asserted tolerance the coordinator requests a replay of the script from
//! the start, up to a bounded number of times per script run; past the
//! budget it reports exhaustion and the executor carries on.

use tickscript_types::{PlayerState, Position, ViewAngles};

use crate::matcher::{ArgValue, ToolMatch};

/// Default distance tolerance for position checks, in world units.
pub const DEFAULT_POS_EPSILON: f32 = 0.5;
/// Default per-axis tolerance for angle checks, in degrees.
pub const DEFAULT_ANG_EPSILON: f32 = 0.2;

/// What a single `check` invocation asserts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckTarget {
    /// Asserted position, if `pos` was given.
    pub position: Option<Position>,
    /// Asserted view angles, if `ang` was given.
    pub angles: Option<ViewAngles>,
    /// Maximum Euclidean distance from the asserted position.
    pub pos_epsilon: f32,
    /// Maximum per-axis angular difference from the asserted angles.
    pub ang_epsilon: f32,
}

impl Default for CheckTarget {
    fn default() -> Self {
        Self {
            position: None,
            angles: None,
            pos_epsilon: DEFAULT_POS_EPSILON,
            ang_epsilon: DEFAULT_ANG_EPSILON,
        }
    }
}

impl CheckTarget {
    /// Build a target from a matched `check` invocation.
    ///
    /// The grammar guarantees each keyword's parameter count, so this never
    /// fails; keywords that weren't given fall back to defaults.
    pub fn from_match(matched: &ToolMatch) -> Self {
        let number = |params: &[ArgValue], i: usize| {
            params.get(i).and_then(ArgValue::as_number).unwrap_or_default() as f32
        };

        let mut target = CheckTarget::default();
        if let Some(params) = matched.keyword_params("pos") {
            target.position =
                Some(Position::new(number(params, 0), number(params, 1), number(params, 2)));
        }
        if let Some(params) = matched.keyword_params("ang") {
            target.angles = Some(ViewAngles::new(number(params, 0), number(params, 1)));
        }
        if let Some(params) = matched.keyword_params("posepsilon") {
            target.pos_epsilon = number(params, 0);
        }
        if let Some(params) = matched.keyword_params("angepsilon") {
            target.ang_epsilon = number(params, 0);
        }
        target
    }

    /// Whether the player state is within tolerance of this target.
    ///
    /// Position uses Euclidean distance; angles compare per axis with
    /// wrap-around (179.9 and -179.9 degrees are 0.2 apart).
    pub fn is_met(&self, player: &PlayerState) -> bool {
        if let Some(position) = &self.position {
            if player.position.distance_to(position) > self.pos_epsilon {
                return false;
            }
        }
        if let Some(angles) = &self.angles {
            if angle_delta(player.angles.pitch, angles.pitch) > self.ang_epsilon
                || angle_delta(player.angles.yaw, angles.yaw) > self.ang_epsilon
            {
                return false;
            }
        }
        true
    }
}

/// Absolute angular difference in degrees, accounting for wrap-around.
fn angle_delta(a: f32, b: f32) -> f32 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

/// Outcome of evaluating a `check` against the current player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Within tolerance; execution continues.
    Pass,
    /// Outside tolerance; the executor should replay the script.
    ReplayRequested,
    /// Outside tolerance, but the replay budget is spent; the executor
    /// should continue anyway.
    ReplayBudgetExhausted,
}

/// Tunables for the check coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConfig {
    /// Maximum replays across the lifetime of one script run.
    pub max_replays: u32,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { max_replays: 15 }
    }
}

/// Tracks the replay budget for one script run and evaluates checks.
#[derive(Debug, Default)]
pub struct CheckCoordinator {
    config: CheckConfig,
    replays_used: u32,
}

impl CheckCoordinator {
    pub fn new(config: CheckConfig) -> Self {
        Self { config, replays_used: 0 }
    }

    /// Evaluate a check target against the current player state.
    ///
    /// Each `ReplayRequested` outcome consumes one replay from the budget;
    /// once it is spent, failing checks report exhaustion instead.
    pub fn evaluate(&mut self, target: &CheckTarget, player: &PlayerState) -> CheckOutcome {
        if target.is_met(player) {
            return CheckOutcome::Pass;
        }
        if self.replays_used < self.config.max_replays {
            self.replays_used += 1;
            tracing::debug!(
                replays_used = self.replays_used,
                max = self.config.max_replays,
                "check failed, requesting replay"
            );
            CheckOutcome::ReplayRequested
        } else {
            tracing::warn!(max = self.config.max_replays, "check failed, replay budget exhausted");
            CheckOutcome::ReplayBudgetExhausted
        }
    }

    /// Replays consumed so far this run.
    pub fn replays_used(&self) -> u32 {
        self.replays_used
    }

    /// Start a fresh script run with a full budget.
    pub fn reset(&mut self) {
        self.replays_used = 0;
    }
}
