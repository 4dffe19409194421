//! Game entities: the dragon and the fireballs it dodges.
//!
//! All positions are the top-left corner of the entity's box, in playfield
//! pixels.  Nothing here is thread-safe; entities are only touched from the
//! simulation turn.

use std::io;

use crate::surface::{DrawMode, SpriteId, Surface};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Inclusive rectangle of legal top-left positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Component-wise clamp.  Written as max-then-min so an inverted
    /// rectangle pins to the max edge instead of panicking.
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.max(self.min_x).min(self.max_x),
            y.max(self.min_y).min(self.max_y),
        )
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Axis-aligned overlap of two boxes given as (x, y, w, h).  Boxes that only
/// share an edge do not overlap.
pub fn boxes_overlap(a: (i32, i32, i32, i32), b: (i32, i32, i32, i32)) -> bool {
    let (ax, ay, aw, ah) = a;
    let (bx, by, bw, bh) = b;
    ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
}

// ── Dragon ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Dragon {
    pub x: i32,
    pub y: i32,
    /// Pixels per tick.
    pub vx: i32,
    pub vy: i32,
    pub width: i32,
    pub height: i32,
    frame: usize,
    frame_count: usize,
    limits: Bounds,
}

impl Dragon {
    pub fn new(width: i32, height: i32, frame_count: usize, limits: Bounds) -> Self {
        Self {
            x: limits.min_x,
            y: limits.min_y,
            vx: 0,
            vy: 0,
            width,
            height,
            frame: 0,
            frame_count: frame_count.max(1),
            limits,
        }
    }

    pub fn limits(&self) -> Bounds {
        self.limits
    }

    pub fn set_limits(&mut self, limits: Bounds) {
        self.limits = limits;
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Place the dragon and bring it to a standstill.
    pub fn spawn(&mut self, x: i32, y: i32) {
        let (x, y) = self.limits.clamp(x, y);
        self.x = x;
        self.y = y;
        self.vx = 0;
        self.vy = 0;
    }

    pub fn set_speed(&mut self, vx: i32, vy: i32) {
        self.vx = vx;
        self.vy = vy;
    }

    /// Move by one tick of velocity, then pull back inside the limits.
    /// Velocity survives the clamp, so the dragon slides along a wall.
    pub fn tick(&mut self) {
        let (x, y) = self
            .limits
            .clamp(self.x.saturating_add(self.vx), self.y.saturating_add(self.vy));
        self.x = x;
        self.y = y;
    }

    pub fn next_frame(&mut self) {
        self.frame = (self.frame + 1) % self.frame_count;
    }

    pub fn hitbox(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.width, self.height)
    }

    pub fn intersects(&self, fireball: &FireBall) -> bool {
        fireball.is_alive() && boxes_overlap(self.hitbox(), fireball.hitbox())
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, mode: DrawMode) -> io::Result<()> {
        match mode {
            DrawMode::Sprite => surface.draw_sprite(SpriteId::Dragon, self.frame, self.x, self.y),
            DrawMode::Rectangle => surface.draw_rect(self.x, self.y, self.width, self.height),
        }
    }
}

// ── Fireball ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FireBall {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Pixels travelled leftward per tick.
    speed: i32,
    alive: bool,
}

impl FireBall {
    pub fn new(width: i32, height: i32, speed: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            speed,
            alive: false,
        }
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn spawn(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.alive = true;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn tick(&mut self) {
        if !self.alive {
            return;
        }
        self.x -= self.speed;
        if self.x < 0 {
            self.alive = false;
        }
    }

    pub fn hitbox(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.width, self.height)
    }

    pub fn intersects(&self, dragon: &Dragon) -> bool {
        self.alive && boxes_overlap(self.hitbox(), dragon.hitbox())
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, mode: DrawMode) -> io::Result<()> {
        if !self.alive {
            return Ok(());
        }
        match mode {
            DrawMode::Sprite => surface.draw_sprite(SpriteId::FireBall, 0, self.x, self.y),
            DrawMode::Rectangle => surface.draw_rect(self.x, self.y, self.width, self.height),
        }
    }
}
