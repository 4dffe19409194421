//! Terminal rendering: a `Surface` that paints playfield pixels onto
//! character cells.
//!
//! One cell covers `CELL_W` x `CELL_H` pixels.  Anything that lands outside
//! the terminal is clipped; the game never learns that a sprite was cut.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use dragon_flight::surface::{SpriteId, Surface, TextStyle};
use dragon_flight::Phase;

/// Playfield pixels per terminal column / row.
pub const CELL_W: i32 = 20;
pub const CELL_H: i32 = 40;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_DRAGON: Color = Color::Green;
const C_FIREBALL: Color = Color::Red;
const C_BOX: Color = Color::White;
const C_SCORE: Color = Color::Yellow;
const C_BEST: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;
const C_OVERLAY: Color = Color::Red;

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Four wing-beat frames, 8 x 2 cells, facing right.
const DRAGON_FRAMES: [[&str; 2]; 4] = [
    ["   /\\   ", "~~=(≈≈)>"],
    ["   --   ", "~~=(≈≈)>"],
    ["   \\/   ", "~~=(≈≈)>"],
    ["   --   ", "~~=(≈≈)>"],
];

/// 4 x 1 cells, flying left.
const FIREBALL: &str = "●≈≈~";

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: i32,
    rows: i32,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols: cols as i32,
            rows: rows as i32,
        }
    }

    pub fn begin_frame(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Overlays, the controls hint, then flush.
    pub fn end_frame(&mut self, phase: Phase) -> std::io::Result<()> {
        match phase {
            Phase::Paused => self.draw_banner("PAUSED", C_HINT)?,
            Phase::RestartPending => self.draw_banner("*** CRASH ***", C_OVERLAY)?,
            Phase::NotStarted | Phase::Running => {}
        }

        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.put_str(1, self.rows - 1, "Drag mouse : Steer   P : Pause   R : Boxes   Q : Quit")?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, (self.rows - 1).max(0) as u16))?;
        self.out.flush()
    }

    fn draw_banner(&mut self, text: &str, color: Color) -> std::io::Result<()> {
        let col = self.cols / 2 - text.chars().count() as i32 / 2;
        self.out.queue(style::SetForegroundColor(color))?;
        self.put_str(col, self.rows / 2, text)
    }

    /// Print `text` starting at (col, row), dropping whatever falls off
    /// the terminal.
    fn put_str(&mut self, col: i32, row: i32, text: &str) -> std::io::Result<()> {
        if row < 0 || row >= self.rows {
            return Ok(());
        }
        let skip = (-col).max(0) as usize;
        let start = col.max(0);
        let room = (self.cols - start).max(0) as usize;
        let visible: String = text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(start as u16, row as u16))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }
}

fn to_cell(x: i32, y: i32) -> (i32, i32) {
    (x.div_euclid(CELL_W), y.div_euclid(CELL_H))
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn draw_sprite(&mut self, sprite: SpriteId, frame: usize, x: i32, y: i32) -> std::io::Result<()> {
        let (col, row) = to_cell(x, y);
        match sprite {
            SpriteId::Dragon => {
                let rows = DRAGON_FRAMES[frame % DRAGON_FRAMES.len()];
                self.out.queue(style::SetForegroundColor(C_DRAGON))?;
                for (i, line) in rows.iter().enumerate() {
                    self.put_str(col, row + i as i32, line)?;
                }
            }
            SpriteId::FireBall => {
                self.out.queue(style::SetForegroundColor(C_FIREBALL))?;
                self.put_str(col, row, FIREBALL)?;
            }
        }
        Ok(())
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> std::io::Result<()> {
        let (col, row) = to_cell(x, y);
        // Round up so a box never vanishes between cells.
        let cells_w = ((w + CELL_W - 1) / CELL_W).max(1);
        let cells_h = ((h + CELL_H - 1) / CELL_H).max(1);
        let line = "█".repeat(cells_w as usize);
        self.out.queue(style::SetForegroundColor(C_BOX))?;
        for r in row..row + cells_h {
            self.put_str(col, r, &line)?;
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, text_style: TextStyle) -> std::io::Result<()> {
        let (col, row) = to_cell(x, y);
        let color = match text_style {
            TextStyle::Score => C_SCORE,
            TextStyle::Best => C_BEST,
        };
        self.out.queue(style::SetForegroundColor(color))?;
        self.put_str(col, row, text)
    }
}
