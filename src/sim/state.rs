//! Round state and the simulation context
//!
//! [`GameState`] owns everything that changes during play. Phase changes go
//! through its methods so every transition is reported as a [`GameEvent`]
//! for the audio and HUD collaborators.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::direction::Direction;
use super::entity::{Ghost, GhostName, Player};
use super::maze::Maze;
use super::timers::{Fired, TimerEvent, TimerGate, TimerQueue};
use crate::tuning::{ActivationAction, Tuning};

/// Why the round is frozen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseCause {
    /// Pause toggle
    User,
    /// Freeze after the player was caught
    Hit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Banner shown, nothing moves yet
    Ready,
    /// Normal play
    Active,
    Paused(PauseCause),
    /// Terminal until a new round is started
    Ended(Outcome),
}

impl GamePhase {
    pub fn is_active(self) -> bool {
        self == GamePhase::Active
    }

    /// Directional input is only latched while the round is live
    pub fn accepts_intent(self) -> bool {
        matches!(self, GamePhase::Ready | GamePhase::Active)
    }

    pub fn is_ended(self) -> bool {
        matches!(self, GamePhase::Ended(_))
    }
}

/// Round bookkeeping visible to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: GamePhase,
    pub hearts: u8,
    pub score: u32,
    /// Scared window running
    pub scared: bool,
    /// Bumped on every new round; timers from older rounds are ignored
    pub generation: u32,
}

/// Something observable happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { generation: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
    PelletEaten { position: Vec2 },
    PowerUpEaten { position: Vec2 },
    GhostEaten { ghost: GhostName },
    PlayerHit { hearts_remaining: u8 },
    ScoreChanged(u32),
    ScaredStarted,
    ScaredEnded,
    Paused,
    Resumed,
    RoundEnded(Outcome),
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub maze: Maze,
    pub player: Player,
    /// Ordered Blinky, Pinky, Inky, Clyde
    pub ghosts: Vec<Ghost>,
    pub round: RoundState,
    pub timers: TimerQueue,
    /// Last accepted direction; persists until replaced
    pub intent: Option<Direction>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game with classic balance and start the first round
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a game with custom balance and start the first round
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::spawn(tuning.player_speed, tuning.mouth_rate);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            maze: Maze::classic(),
            player,
            ghosts: Vec::new(),
            round: RoundState {
                phase: GamePhase::Ready,
                hearts: tuning.starting_hearts,
                score: 0,
                scared: false,
                generation: 0,
            },
            tuning,
            timers: TimerQueue::new(),
            intent: None,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.new_round();
        state
    }

    /// Reset everything for a fresh round and show the ready banner
    pub fn new_round(&mut self) {
        self.round.generation = self.round.generation.wrapping_add(1);
        self.timers.clear();
        self.maze = Maze::classic();
        self.player = Player::spawn(self.tuning.player_speed, self.tuning.mouth_rate);
        self.intent = None;
        self.round.hearts = self.tuning.starting_hearts;
        self.round.score = 0;
        self.round.scared = false;
        self.rebuild_ghosts();

        self.events.push(GameEvent::RoundStarted {
            generation: self.round.generation,
        });
        self.events.push(GameEvent::ScoreChanged(0));
        self.set_phase(GamePhase::Ready);
        self.schedule(TimerEvent::ReadyElapsed, self.tuning.ready_ticks, TimerGate::Always);

        log::info!(
            "Round {} started ({} pellets)",
            self.round.generation,
            self.maze.pellets.len()
        );
    }

    /// Random horizontal heading for a ghost leaving its spot
    pub fn drift_velocity(&mut self) -> Vec2 {
        let dir = if self.rng.random_bool(self.tuning.drift_right_chance) {
            Direction::Right
        } else {
            Direction::Left
        };
        dir.velocity(self.tuning.ghost_speed)
    }

    /// Put all ghosts back on their spawn tiles and restart the release schedule
    pub fn rebuild_ghosts(&mut self) {
        let speed = self.tuning.ghost_speed;
        let mut ghosts = Vec::with_capacity(super::GHOST_COUNT);
        for name in GhostName::iter() {
            let velocity = if name.starts_drifting() {
                self.drift_velocity()
            } else {
                Vec2::ZERO
            };
            ghosts.push(Ghost::new(name, speed, velocity));
        }
        self.ghosts = ghosts;

        self.timers
            .cancel_where(|e| matches!(e, TimerEvent::Activation(_)));
        for (index, step) in self.tuning.activation.iter().enumerate() {
            self.timers.schedule(
                TimerEvent::Activation(index),
                step.after_ticks,
                TimerGate::WhileActive,
                self.round.generation,
            );
        }
    }

    fn schedule(&mut self, event: TimerEvent, ticks: u32, gate: TimerGate) {
        self.timers
            .schedule(event, ticks, gate, self.round.generation);
    }

    /// Move to `to`, reporting the change
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.round.phase;
        if from == to {
            return;
        }
        self.round.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
        log::debug!("Phase {:?} -> {:?}", from, to);
    }

    /// Pause toggle; only meaningful while playing or user-paused
    pub fn toggle_pause(&mut self) {
        match self.round.phase {
            GamePhase::Active => {
                self.set_phase(GamePhase::Paused(PauseCause::User));
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused(PauseCause::User) => {
                self.set_phase(GamePhase::Active);
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.round.score = self.round.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged(self.round.score));
    }

    /// Scare every ghost and (re)start the single scared countdown
    pub fn start_scared_window(&mut self) {
        self.timers.cancel(TimerEvent::ScaredExpired);
        self.schedule(
            TimerEvent::ScaredExpired,
            self.tuning.scared_ticks,
            TimerGate::WhileActive,
        );
        for ghost in &mut self.ghosts {
            ghost.scared = true;
        }
        if !self.round.scared {
            self.round.scared = true;
            self.events.push(GameEvent::ScaredStarted);
        }
    }

    /// Un-scare every ghost and drop the countdown
    pub fn end_scared_window(&mut self) {
        self.timers.cancel(TimerEvent::ScaredExpired);
        for ghost in &mut self.ghosts {
            ghost.scared = false;
        }
        if self.round.scared {
            self.round.scared = false;
            self.events.push(GameEvent::ScaredEnded);
        }
    }

    /// Score a scared ghost and send it home
    pub fn eat_ghost(&mut self, index: usize) {
        let velocity = self.drift_velocity();
        let Some(ghost) = self.ghosts.get_mut(index) else {
            return;
        };
        ghost.return_home(velocity);
        let name = ghost.name;
        self.events.push(GameEvent::GhostEaten { ghost: name });
        self.add_score(self.tuning.ghost_points);
        log::debug!("{} eaten", name);
    }

    /// The player touched a ghost that was not scared
    pub fn hit_player(&mut self) {
        self.round.hearts = self.round.hearts.saturating_sub(1);
        self.events.push(GameEvent::PlayerHit {
            hearts_remaining: self.round.hearts,
        });

        if self.round.hearts == 0 {
            self.end_round(Outcome::Lost);
            return;
        }

        log::info!("Player caught, {} hearts left", self.round.hearts);
        self.set_phase(GamePhase::Paused(PauseCause::Hit));
        self.schedule(
            TimerEvent::HitPauseElapsed,
            self.tuning.hit_pause_ticks,
            TimerGate::Always,
        );
    }

    /// Reposition everyone after a hit and show the ready banner again
    pub fn respawn(&mut self) {
        self.player.respawn(self.tuning.player_speed);
        self.intent = None;
        self.end_scared_window();
        self.rebuild_ghosts();
        self.set_phase(GamePhase::Ready);
        self.schedule(
            TimerEvent::ReadyElapsed,
            self.tuning.respawn_ready_ticks,
            TimerGate::Always,
        );
    }

    /// Finish the round; overrides any hit or scared sequence in flight
    pub fn end_round(&mut self, outcome: Outcome) {
        self.timers.clear();
        self.end_scared_window();
        self.set_phase(GamePhase::Ended(outcome));
        self.events.push(GameEvent::RoundEnded(outcome));
        log::info!(
            "Round {} ended: {:?} with {} points",
            self.round.generation,
            outcome,
            self.round.score
        );
    }

    /// Count down timers for this tick and apply the ones that ran out
    pub fn run_timers(&mut self) {
        let fired = self.timers.advance(self.round.phase.is_active());
        for timer in fired {
            self.dispatch(timer);
        }
    }

    fn dispatch(&mut self, timer: Fired) {
        if timer.generation != self.round.generation {
            log::debug!(
                "Dropping {:?} from round {} (now {})",
                timer.event,
                timer.generation,
                self.round.generation
            );
            return;
        }

        let phase = self.round.phase;
        match timer.event {
            TimerEvent::ReadyElapsed if phase == GamePhase::Ready => {
                self.set_phase(GamePhase::Active);
            }
            TimerEvent::HitPauseElapsed if phase == GamePhase::Paused(PauseCause::Hit) => {
                self.respawn();
            }
            TimerEvent::ScaredExpired if self.round.scared => {
                log::debug!("Scared window over");
                self.end_scared_window();
            }
            TimerEvent::Activation(index) if !phase.is_ended() => self.activate(index),
            event => log::debug!("Dropping {:?} in phase {:?}", event, phase),
        }
    }

    fn activate(&mut self, index: usize) {
        let Some(step) = self.tuning.activation.get(index).copied() else {
            return;
        };
        match step.action {
            ActivationAction::Drift => {
                let velocity = self.drift_velocity();
                if let Some(ghost) = self.ghosts.get_mut(step.ghost) {
                    ghost.velocity = velocity;
                    log::debug!("{} released", ghost.name);
                }
            }
            ActivationAction::Chase => {
                if let Some(ghost) = self.ghosts.get_mut(step.ghost) {
                    ghost.chase = true;
                    log::debug!("{} starts chasing", ghost.name);
                }
            }
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICKS_PER_SECOND;

    fn active_state() -> GameState {
        let mut state = GameState::new(42);
        state.set_phase(GamePhase::Active);
        state.timers.cancel(TimerEvent::ReadyElapsed);
        state.drain_events();
        state
    }

    #[test]
    fn test_new_round_defaults() {
        let state = GameState::new(42);
        assert_eq!(state.round.phase, GamePhase::Ready);
        assert_eq!(state.round.hearts, 3);
        assert_eq!(state.round.score, 0);
        assert_eq!(state.round.generation, 1);
        assert_eq!(state.ghosts.len(), 4);
        assert_eq!(state.maze.pellets.len(), 160);
        assert_eq!(state.timers.remaining(TimerEvent::ReadyElapsed), Some(258));

        // Only Blinky moves, horizontally at ghost speed
        assert_eq!(state.ghosts[0].velocity.length(), 2.0);
        assert_eq!(state.ghosts[0].velocity.y, 0.0);
        assert!(state.ghosts[1..].iter().all(|g| g.velocity == Vec2::ZERO));
    }

    #[test]
    fn test_same_seed_same_drift() {
        let a = GameState::new(7);
        let b = GameState::new(7);
        assert_eq!(a.ghosts[0].velocity, b.ghosts[0].velocity);
    }

    #[test]
    fn test_ready_elapses_into_active() {
        let mut state = GameState::new(1);
        for _ in 0..257 {
            state.run_timers();
        }
        assert_eq!(state.round.phase, GamePhase::Ready);
        state.run_timers();
        assert_eq!(state.round.phase, GamePhase::Active);
    }

    #[test]
    fn test_pause_toggle_only_from_active() {
        let mut state = GameState::new(1);
        state.toggle_pause();
        assert_eq!(state.round.phase, GamePhase::Ready);

        let mut state = active_state();
        state.toggle_pause();
        assert_eq!(state.round.phase, GamePhase::Paused(PauseCause::User));
        state.toggle_pause();
        assert_eq!(state.round.phase, GamePhase::Active);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Paused));
        assert!(events.contains(&GameEvent::Resumed));
    }

    #[test]
    fn test_hit_then_respawn() {
        let mut state = active_state();
        state.player.position = Vec2::new(45.0, 45.0);
        state.start_scared_window();
        state.hit_player();
        assert_eq!(state.round.hearts, 2);
        assert_eq!(state.round.phase, GamePhase::Paused(PauseCause::Hit));

        for _ in 0..120 {
            state.run_timers();
        }
        assert_eq!(state.round.phase, GamePhase::Ready);
        assert_eq!(state.player.position, Vec2::new(285.0, 495.0));
        assert!(!state.round.scared);
        assert!(state.ghosts.iter().all(|g| !g.scared && !g.chase));
        assert_eq!(state.timers.remaining(TimerEvent::ReadyElapsed), Some(120));
    }

    #[test]
    fn test_last_heart_loses() {
        let mut state = active_state();
        state.round.hearts = 1;
        state.start_scared_window();
        state.hit_player();
        assert_eq!(state.round.hearts, 0);
        assert_eq!(state.round.phase, GamePhase::Ended(Outcome::Lost));
        assert!(state.ghosts.iter().all(|g| !g.scared));
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_scared_window_restarts() {
        let mut state = active_state();
        state.start_scared_window();
        for _ in 0..100 {
            state.run_timers();
        }
        state.start_scared_window();
        assert_eq!(state.timers.remaining(TimerEvent::ScaredExpired), Some(480));
        let started = state
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::ScaredStarted)
            .count();
        assert_eq!(started, 1);
    }

    #[test]
    fn test_eat_ghost_scores_and_returns_home() {
        let mut state = active_state();
        state.ghosts[2].chase = true;
        state.start_scared_window();
        state.ghosts[2].position = Vec2::new(45.0, 45.0);
        state.eat_ghost(2);

        let ghost = &state.ghosts[2];
        assert_eq!(ghost.position, Vec2::new(285.0, 315.0));
        assert!(!ghost.scared);
        assert!(ghost.chase);
        assert_eq!(ghost.velocity.length(), 2.0);
        assert_eq!(state.round.score, 100);
        assert!(state.ghosts[0].scared);
    }

    #[test]
    fn test_stale_timer_dropped() {
        let mut state = active_state();
        state.timers.schedule(
            TimerEvent::HitPauseElapsed,
            1,
            TimerGate::Always,
            state.round.generation - 1,
        );
        state.set_phase(GamePhase::Paused(PauseCause::Hit));
        state.run_timers();
        assert_eq!(state.round.phase, GamePhase::Paused(PauseCause::Hit));
    }

    #[test]
    fn test_activation_schedule() {
        let mut state = active_state();
        for _ in 0..(9 * TICKS_PER_SECOND) {
            state.run_timers();
        }
        assert_eq!(state.ghosts[1].velocity.length(), 2.0);
        assert!(!state.ghosts[0].chase);

        for _ in 0..(3 * TICKS_PER_SECOND) {
            state.run_timers();
        }
        assert!(state.ghosts[0].chase);

        for _ in 0..(18 * TICKS_PER_SECOND) {
            state.run_timers();
        }
        assert!(state.ghosts.iter().skip(1).all(|g| g.velocity != Vec2::ZERO));
        assert!(state.ghosts[0].chase && state.ghosts[1].chase);
        assert!(state.ghosts[2].chase && state.ghosts[3].chase);
        assert!(state.timers.is_empty());
    }

    #[test]
    fn test_activation_waits_while_paused() {
        let mut state = active_state();
        state.toggle_pause();
        for _ in 0..(20 * TICKS_PER_SECOND) {
            state.run_timers();
        }
        assert!(state.ghosts.iter().all(|g| !g.chase));
        assert_eq!(state.ghosts[1].velocity, Vec2::ZERO);
    }
}
