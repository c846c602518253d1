//! Audio cues driven by simulation events
//!
//! The simulation never touches audio. [`AudioDirector`] folds each
//! [`GameEvent`] into one-shot effects and the two looping cues, and hands
//! them to an [`AudioSink`] backend.

use strum_macros::Display;

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, Outcome, PauseCause};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SoundEffect {
    /// New round
    GameStart,
    /// Pellet eaten (alternates with `ChompB`)
    ChompA,
    ChompB,
    /// Scared ghost eaten
    EatGhost,
    /// Player caught
    Death,
    /// Pause or resume
    PauseToggle,
    /// Maze cleared
    Win,
}

/// Continuous background cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoopCue {
    /// While paused by the player
    PauseBeat,
    /// While the scared window runs
    Scared,
}

/// Audio backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn start_loop(&mut self, cue: LoopCue, volume: f32);
    fn stop_loop(&mut self, cue: LoopCue);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} @ {:.2}", effect, volume);
    }

    fn start_loop(&mut self, cue: LoopCue, volume: f32) {
        log::debug!("loop {} started @ {:.2}", cue, volume);
    }

    fn stop_loop(&mut self, cue: LoopCue) {
        log::debug!("loop {} stopped", cue);
    }
}

/// Maps game events onto sounds
#[derive(Debug)]
pub struct AudioDirector<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    loop_volume: f32,
    muted: bool,
    /// Next pellet plays the second chomp
    chomp_flip: bool,
    phase: GamePhase,
    scared: bool,
    pause_loop: bool,
    scared_loop: bool,
}

impl<S: AudioSink> AudioDirector<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            loop_volume: 0.7,
            muted: false,
            chomp_flip: false,
            phase: GamePhase::Ready,
            scared: false,
            pause_loop: false,
            scared_loop: false,
        }
    }

    pub fn with_settings(sink: S, settings: &Settings) -> Self {
        let mut director = Self::new(sink);
        director.set_master_volume(settings.master_volume);
        director.set_sfx_volume(settings.sfx_volume);
        director.set_loop_volume(settings.loop_volume);
        director.set_muted(settings.muted);
        director
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_loop_volume(&mut self, vol: f32) {
        self.loop_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn sfx_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn loop_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.loop_volume
        }
    }

    fn play(&mut self, effect: SoundEffect) {
        let vol = self.sfx_level();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// React to one simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::RoundStarted { .. } => {
                self.chomp_flip = false;
                self.play(SoundEffect::GameStart);
            }
            GameEvent::PelletEaten { .. } => {
                let effect = if self.chomp_flip {
                    SoundEffect::ChompB
                } else {
                    SoundEffect::ChompA
                };
                self.chomp_flip = !self.chomp_flip;
                self.play(effect);
            }
            GameEvent::GhostEaten { .. } => self.play(SoundEffect::EatGhost),
            GameEvent::PlayerHit { .. } => self.play(SoundEffect::Death),
            GameEvent::Paused | GameEvent::Resumed => self.play(SoundEffect::PauseToggle),
            GameEvent::RoundEnded(Outcome::Won) => self.play(SoundEffect::Win),
            GameEvent::ScaredStarted => self.scared = true,
            GameEvent::ScaredEnded => self.scared = false,
            GameEvent::PhaseChanged { to, .. } => self.phase = to,
            GameEvent::RoundEnded(Outcome::Lost)
            | GameEvent::PowerUpEaten { .. }
            | GameEvent::ScoreChanged(_) => {}
        }
        self.sync_loops();
    }

    pub fn handle_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    fn sync_loops(&mut self) {
        let want_pause = self.phase == GamePhase::Paused(PauseCause::User);
        let want_scared = self.scared && matches!(self.phase, GamePhase::Ready | GamePhase::Active);

        if want_pause != self.pause_loop {
            self.pause_loop = want_pause;
            self.toggle_loop(LoopCue::PauseBeat, want_pause);
        }
        if want_scared != self.scared_loop {
            self.scared_loop = want_scared;
            self.toggle_loop(LoopCue::Scared, want_scared);
        }
    }

    fn toggle_loop(&mut self, cue: LoopCue, on: bool) {
        if on {
            let vol = self.loop_level();
            self.sink.start_loop(cue, vol);
        } else {
            self.sink.stop_loop(cue);
        }
    }
}
