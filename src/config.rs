//! Game tuning.  `Default` carries the values the game ships with.

use std::time::Duration;

use crate::entities::Bounds;
use crate::error::ConfigError;

/// Seed that makes every session fly through the same level.
pub const DEFAULT_SEED: u64 = 400;

/// Slots in the fireball pool.
pub const FIREBALL_POOL: usize = 8;

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// One simulation tick per render interval.
    pub render_interval: Duration,
    /// How often a fireball spawn is attempted.
    pub spawn_interval: Duration,
    /// Dragon wing-flap frame duration.
    pub animation_interval: Duration,
    /// Frozen time between a crash and the next run.
    pub restart_delay: Duration,
    pub seed: u64,

    pub dragon_width: i32,
    pub dragon_height: i32,
    pub dragon_frames: usize,
    /// Dragon box limits: left, top, right, and distance of the bottom limit
    /// from the playfield's bottom edge.
    pub limit_left: i32,
    pub limit_top: i32,
    pub limit_right: i32,
    pub limit_bottom_margin: i32,
    pub start_x: i32,

    pub fireball_width: i32,
    pub fireball_height: i32,
    pub fireball_speed: i32,

    /// Velocity, in pixels per tick, produced by a swipe across the whole
    /// playfield.
    pub swipe_scale: f32,
    /// HUD text sits this far left of the right edge.
    pub hud_inset: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            render_interval: Duration::from_millis(10),
            spawn_interval: Duration::from_millis(700),
            animation_interval: Duration::from_millis(250),
            restart_delay: Duration::from_millis(1000),
            seed: DEFAULT_SEED,

            dragon_width: 160,
            dragon_height: 80,
            dragon_frames: 4,
            limit_left: 160,
            limit_top: 50,
            limit_right: 240,
            limit_bottom_margin: 400,
            start_x: 200,

            fireball_width: 80,
            fireball_height: 40,
            fireball_speed: 8,

            swipe_scale: 40.0,
            hud_inset: 400,
        }
    }
}

impl GameConfig {
    /// Where the dragon may fly on a playfield `height` pixels tall.  When
    /// the playfield is too short for the margin the bottom limit collapses
    /// onto the top one.
    pub fn dragon_limits(&self, height: i32) -> Bounds {
        let bottom = (height - self.limit_bottom_margin).max(self.limit_top);
        Bounds::new(self.limit_left, self.limit_top, self.limit_right, bottom)
    }

    pub fn validate(&self, width: i32, height: i32) -> Result<(), ConfigError> {
        let intervals = [
            ("render", self.render_interval),
            ("spawn", self.spawn_interval),
            ("animation", self.animation_interval),
            ("restart", self.restart_delay),
        ];
        for (timer, interval) in intervals {
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval { timer });
            }
        }
        if width <= 0 || height <= 0 {
            return Err(ConfigError::EmptyPlayfield { width, height });
        }
        let sprites = [
            ("dragon", self.dragon_width, self.dragon_height),
            ("fireball", self.fireball_width, self.fireball_height),
        ];
        for (sprite, w, h) in sprites {
            if w <= 0 || h <= 0 {
                return Err(ConfigError::BadSpriteSize { sprite, width: w, height: h });
            }
        }
        if self.fireball_speed <= 0 {
            return Err(ConfigError::ZeroFireballSpeed);
        }
        if self.dragon_frames == 0 {
            return Err(ConfigError::ZeroFrameCount);
        }
        if self.limit_left > self.limit_right {
            return Err(ConfigError::InvertedLimits {
                min: self.limit_left,
                max: self.limit_right,
            });
        }
        Ok(())
    }
}
