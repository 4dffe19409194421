//! The game loop: entities, timers, scoring and the run lifecycle.
//!
//! The host drives two clocks into the engine.  `tick` is one simulation
//! step, called once per render interval.  `advance` lets wall-clock time
//! pass for the engine's own timers (fireball spawns, wing flaps and the
//! automatic restart after a crash), each of which is dispatched to an
//! explicit method here.

use std::io;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::{Audio, Sound};
use crate::config::{GameConfig, FIREBALL_POOL};
use crate::entities::{Dragon, FireBall};
use crate::error::ConfigError;
use crate::surface::{DrawMode, Surface, TextStyle};
use crate::timer::{Timer, WaitAndRun};

/// Vertical position of the HUD lines.
const SCORE_Y: i32 = 100;
const BEST_Y: i32 = 180;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    /// Crashed; frozen until the restart timer fires.
    RestartPending,
}

pub struct GameEngine<A: Audio> {
    config: GameConfig,
    width: i32,
    height: i32,
    rng: StdRng,
    dragon: Dragon,
    fireballs: [FireBall; FIREBALL_POOL],
    distance: u32,
    max_distance: u32,
    started: bool,
    paused: bool,
    spawn_timer: Timer,
    animation_timer: Timer,
    restart_timer: WaitAndRun,
    audio: A,
}

impl<A: Audio> GameEngine<A> {
    pub fn new(config: GameConfig, width: i32, height: i32, audio: A) -> Result<Self, ConfigError> {
        config.validate(width, height)?;

        let dragon = Dragon::new(
            config.dragon_width,
            config.dragon_height,
            config.dragon_frames,
            config.dragon_limits(height),
        );
        let fireballs = std::array::from_fn(|_| {
            FireBall::new(config.fireball_width, config.fireball_height, config.fireball_speed)
        });

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            spawn_timer: Timer::new(config.spawn_interval),
            animation_timer: Timer::new(config.animation_interval),
            restart_timer: WaitAndRun::new(config.restart_delay),
            config,
            width,
            height,
            dragon,
            fireballs,
            distance: 0,
            max_distance: 0,
            started: false,
            paused: false,
            audio,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn dragon(&self) -> &Dragon {
        &self.dragon
    }

    pub fn dragon_mut(&mut self) -> &mut Dragon {
        &mut self.dragon
    }

    pub fn fireballs(&self) -> &[FireBall; FIREBALL_POOL] {
        &self.fireballs
    }

    pub fn fireballs_mut(&mut self) -> &mut [FireBall; FIREBALL_POOL] {
        &mut self.fireballs
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn max_distance(&self) -> u32 {
        self.max_distance
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_restart_pending(&self) -> bool {
        self.restart_timer.is_running()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn spawn_timer(&self) -> &Timer {
        &self.spawn_timer
    }

    pub fn animation_timer(&self) -> &Timer {
        &self.animation_timer
    }

    pub fn restart_timer(&self) -> &WaitAndRun {
        &self.restart_timer
    }

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::NotStarted
        } else if self.paused {
            Phase::Paused
        } else if self.is_restart_pending() {
            Phase::RestartPending
        } else {
            Phase::Running
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn set_dragon_speed(&mut self, vx: i32, vy: i32) {
        self.dragon.set_speed(vx, vy);
    }

    // ── Simulation ───────────────────────────────────────────────────────────

    /// One simulation step.  Frozen while a restart is pending.
    pub fn tick(&mut self) {
        if self.is_restart_pending() {
            return;
        }
        self.distance += 1;
        self.dragon.tick();

        let mut crashed = false;
        for fireball in &mut self.fireballs {
            fireball.tick();
            if fireball.intersects(&self.dragon) {
                crashed = true;
                break;
            }
        }
        if crashed {
            self.crash();
        }
    }

    /// Let `dt` of wall-clock time pass for the spawn, animation and restart
    /// timers and carry out whatever they fire.
    pub fn advance(&mut self, dt: Duration) {
        for _ in 0..self.spawn_timer.advance(dt) {
            self.spawn_fireball();
        }
        for _ in 0..self.animation_timer.advance(dt) {
            self.dragon.next_frame();
        }
        if self.restart_timer.advance(dt) {
            self.start_game();
        }
    }

    /// Launch a fireball from the right edge into the first free slot.
    /// A full pool drops the attempt.
    pub fn spawn_fireball(&mut self) -> Option<usize> {
        let Some(slot) = self.fireballs.iter().position(|f| !f.is_alive()) else {
            tracing::debug!("fireball pool full, spawn dropped");
            return None;
        };
        let y = self.rng.gen_range(0..self.height);
        self.fireballs[slot].spawn(self.width, y);
        tracing::debug!(slot, y, "fireball spawned");
        Some(slot)
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    pub fn start_game(&mut self) {
        self.restart_timer.stop();
        self.distance = 0;
        self.started = true;
        self.paused = false;
        self.animation_timer.start();
        self.spawn_timer.start();
        self.audio.play(Sound::Background);
        self.dragon.spawn(self.config.start_x, self.height / 2);
        tracing::info!(best = self.max_distance, "game started");
    }

    /// Collision: blow up, clear the sky, and schedule the next run.
    pub fn crash(&mut self) {
        tracing::info!(distance = self.distance, "dragon crashed");
        self.audio.play(Sound::Blast);
        for fireball in &mut self.fireballs {
            fireball.kill();
        }
        self.stop_game();
        self.restart_timer.start();
    }

    pub fn stop_game(&mut self) {
        self.max_distance = self.max_distance.max(self.distance);
        self.audio.stop(Sound::Background);
        self.animation_timer.stop();
        self.spawn_timer.stop();
        tracing::info!(
            distance = self.distance,
            best = self.max_distance,
            "game stopped"
        );
    }

    pub fn pause_game(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.restart_timer.pause();
        self.audio.pause(Sound::Background);
        self.animation_timer.pause();
        self.spawn_timer.pause();
        tracing::info!("game paused");
    }

    pub fn resume_game(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.spawn_timer.resume();
        self.animation_timer.resume();
        self.audio.resume(Sound::Background);
        self.restart_timer.resume();
        tracing::info!("game resumed");
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    pub fn draw<S: Surface>(&self, surface: &mut S, mode: DrawMode) -> io::Result<()> {
        self.dragon.draw(surface, mode)?;
        for fireball in &self.fireballs {
            fireball.draw(surface, mode)?;
        }
        let hud_x = self.width - self.config.hud_inset;
        surface.draw_text(&self.distance.to_string(), hud_x, SCORE_Y, TextStyle::Score)?;
        surface.draw_text(
            &format!("max: {}", self.max_distance),
            hud_x,
            BEST_Y,
            TextStyle::Best,
        )?;
        Ok(())
    }
}
