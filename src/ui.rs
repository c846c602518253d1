//! HUD model
//!
//! Observes simulation events and keeps what the overlay shows: score,
//! hearts and the current banner. Never feeds back into the simulation.

use serde::Serialize;

use crate::consts::MAX_HEARTS;
use crate::sim::{GameEvent, GamePhase, Outcome, PauseCause};

/// Centered overlay text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Banner {
    #[default]
    None,
    Ready,
    Won,
    Lost,
}

impl Banner {
    pub fn text(self) -> Option<&'static str> {
        match self {
            Banner::None => None,
            Banner::Ready => Some("READY!"),
            Banner::Won => Some("YOU WIN!"),
            Banner::Lost => Some("GAME OVER"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub hearts: u8,
    pub banner: Banner,
    /// Pause menu visible
    pub paused: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            hearts: MAX_HEARTS,
            banner: Banner::Ready,
            paused: false,
        }
    }
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::RoundStarted { .. } => *self = Self::default(),
            GameEvent::ScoreChanged(score) => self.score = score,
            GameEvent::PlayerHit { hearts_remaining } => self.hearts = hearts_remaining,
            GameEvent::PhaseChanged { to, .. } => {
                self.paused = to == GamePhase::Paused(PauseCause::User);
                match to {
                    GamePhase::Ready => self.banner = Banner::Ready,
                    GamePhase::Active => self.banner = Banner::None,
                    _ => {}
                }
            }
            GameEvent::RoundEnded(Outcome::Won) => {
                self.banner = Banner::Won;
                self.hearts = MAX_HEARTS;
            }
            GameEvent::RoundEnded(Outcome::Lost) => self.banner = Banner::Lost,
            _ => {}
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// One-line status, e.g. for logs
    pub fn status_line(&self) -> String {
        let hearts = "♥".repeat(self.hearts as usize);
        match self.banner.text() {
            Some(banner) => format!("SCORE {:>5}  {:<3}  {}", self.score, hearts, banner),
            None => format!("SCORE {:>5}  {}", self.score, hearts),
        }
    }
}
