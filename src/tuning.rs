//! Data-driven game balance
//!
//! Every duration is in simulation ticks (see [`crate::consts::TICKS_PER_SECOND`]).
//! Missing JSON fields fall back to the classic values.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HEARTS, TICKS_PER_SECOND};
use crate::error::ConfigError;
use crate::sim::GHOST_COUNT;

/// What an activation step does to its ghost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationAction {
    /// Start moving horizontally in a random direction
    Drift,
    /// Switch from wandering to chasing the player
    Chase,
}

/// One entry of the staggered ghost release schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationStep {
    /// Active ticks since the ghosts were (re)built
    pub after_ticks: u32,
    /// Ghost index (0 = Blinky .. 3 = Clyde)
    pub ghost: usize,
    pub action: ActivationAction,
}

impl ActivationStep {
    const fn at_second(second: u32, ghost: usize, action: ActivationAction) -> Self {
        Self {
            after_ticks: second * TICKS_PER_SECOND,
            ghost,
            action,
        }
    }
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player speed (pixels per tick)
    pub player_speed: f32,
    /// Ghost speed (pixels per tick)
    pub ghost_speed: f32,
    /// "Ready" banner duration at round start
    pub ready_ticks: u32,
    /// Freeze after the player is caught
    pub hit_pause_ticks: u32,
    /// "Ready" banner duration after a respawn
    pub respawn_ready_ticks: u32,
    /// Scared window length, counted only while the round is active
    pub scared_ticks: u32,
    pub pellet_points: u32,
    pub ghost_points: u32,
    pub starting_hearts: u8,
    /// Mouth aperture change per tick (radians)
    pub mouth_rate: f32,
    /// Probability that a drifting ghost starts moving right
    pub drift_right_chance: f64,
    /// Ghost release schedule
    pub activation: Vec<ActivationStep>,
}

impl Default for Tuning {
    fn default() -> Self {
        use ActivationAction::{Chase, Drift};
        Self {
            player_speed: 3.0,
            ghost_speed: 2.0,
            ready_ticks: 258, // 4.3 s
            hit_pause_ticks: 2 * TICKS_PER_SECOND,
            respawn_ready_ticks: 2 * TICKS_PER_SECOND,
            scared_ticks: 8 * TICKS_PER_SECOND,
            pellet_points: 10,
            ghost_points: 100,
            starting_hearts: MAX_HEARTS,
            mouth_rate: 0.12,
            drift_right_chance: 0.4,
            activation: vec![
                ActivationStep::at_second(9, 1, Drift),
                ActivationStep::at_second(12, 0, Chase),
                ActivationStep::at_second(17, 2, Drift),
                ActivationStep::at_second(20, 1, Chase),
                ActivationStep::at_second(25, 3, Drift),
                ActivationStep::at_second(30, 2, Chase),
                ActivationStep::at_second(30, 3, Chase),
            ],
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.player_speed.is_finite() && self.player_speed > 0.0) {
            return Err(invalid("player_speed", "must be a positive number"));
        }
        if !(self.ghost_speed.is_finite() && self.ghost_speed > 0.0) {
            return Err(invalid("ghost_speed", "must be a positive number"));
        }
        for (field, ticks) in [
            ("ready_ticks", self.ready_ticks),
            ("hit_pause_ticks", self.hit_pause_ticks),
            ("respawn_ready_ticks", self.respawn_ready_ticks),
            ("scared_ticks", self.scared_ticks),
        ] {
            if ticks == 0 {
                return Err(invalid(field, "must be at least one tick"));
            }
        }
        if self.starting_hearts == 0 || self.starting_hearts > MAX_HEARTS {
            return Err(invalid(
                "starting_hearts",
                format!("must be within 1..={MAX_HEARTS}"),
            ));
        }
        if !(0.0..=1.0).contains(&self.drift_right_chance) {
            return Err(invalid("drift_right_chance", "must be within 0..=1"));
        }
        if let Some(step) = self.activation.iter().find(|s| s.ghost >= GHOST_COUNT) {
            return Err(invalid(
                "activation",
                format!("ghost index {} out of range", step.ghost),
            ));
        }
        Ok(())
    }
}
