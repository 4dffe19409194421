//! Swipe steering.
//!
//! A press marks the origin; every move after it sets the dragon's velocity
//! from the offset to the origin, scaled by the playfield size.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Touch {
    Press { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release,
}

#[derive(Clone, Debug)]
pub struct SwipeTracker {
    origin: Option<(f32, f32)>,
    /// Velocity produced by a swipe spanning the whole playfield.
    scale: f32,
}

impl SwipeTracker {
    pub fn new(scale: f32) -> Self {
        Self { origin: None, scale }
    }

    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    /// Feed one event.  Returns the new dragon velocity when the event
    /// changes it.  Points outside the playfield are pulled onto its edge.
    pub fn handle(&mut self, touch: Touch, width: i32, height: i32) -> Option<(i32, i32)> {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        match touch {
            Touch::Press { x, y } => {
                self.origin = Some((x.clamp(0.0, w), y.clamp(0.0, h)));
                None
            }
            Touch::Move { x, y } => {
                let (ox, oy) = self.origin?;
                let dx = (x.clamp(0.0, w) - ox) / w;
                let dy = (y.clamp(0.0, h) - oy) / h;
                // `as` truncates toward zero, so tiny drags give no speed.
                Some(((self.scale * dx) as i32, (self.scale * dy) as i32))
            }
            Touch::Release => {
                self.origin = None;
                None
            }
        }
    }
}
