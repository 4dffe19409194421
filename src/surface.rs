//! Drawing seam between the game and whatever paints it.
//!
//! Coordinates are playfield pixels.  Implementations clip anything that
//! falls outside their canvas instead of failing.

use std::io;

/// Which picture a sprite draw refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteId {
    Dragon,
    FireBall,
}

/// How entities are painted: textured, or as plain boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    #[default]
    Sprite,
    Rectangle,
}

impl DrawMode {
    pub fn toggled(self) -> Self {
        match self {
            DrawMode::Sprite => DrawMode::Rectangle,
            DrawMode::Rectangle => DrawMode::Sprite,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// Current run distance.
    Score,
    /// Best distance across runs.
    Best,
}

pub trait Surface {
    fn draw_sprite(&mut self, sprite: SpriteId, frame: usize, x: i32, y: i32) -> io::Result<()>;
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) -> io::Result<()>;
}
