//! Host-facing adapter.
//!
//! `GameView` owns exactly one engine together with the render timer that
//! drives its ticks.  Hosts feed it elapsed time and pointer events and ask
//! it to draw; everything else stays inside the engine.

use std::io;
use std::time::Duration;

use crate::audio::Audio;
use crate::engine::GameEngine;
use crate::input::{SwipeTracker, Touch};
use crate::surface::{DrawMode, Surface};
use crate::timer::Timer;

pub struct GameView<A: Audio> {
    engine: GameEngine<A>,
    render_timer: Timer,
    swipe: SwipeTracker,
    draw_mode: DrawMode,
}

impl<A: Audio> GameView<A> {
    pub fn new(engine: GameEngine<A>) -> Self {
        let render_timer = Timer::new(engine.config().render_interval);
        let swipe = SwipeTracker::new(engine.config().swipe_scale);
        Self {
            engine,
            render_timer,
            swipe,
            draw_mode: DrawMode::default(),
        }
    }

    pub fn engine(&self) -> &GameEngine<A> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<A> {
        &mut self.engine
    }

    pub fn into_engine(self) -> GameEngine<A> {
        self.engine
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
    }

    pub fn toggle_draw_mode(&mut self) {
        self.draw_mode = self.draw_mode.toggled();
    }

    pub fn is_rendering(&self) -> bool {
        self.render_timer.is_running()
    }

    /// First run: start the game and the render clock.
    pub fn start(&mut self) {
        self.engine.start_game();
        self.render_timer.start();
    }

    pub fn pause(&mut self) {
        self.engine.pause_game();
        self.render_timer.stop();
    }

    pub fn resume(&mut self) {
        self.engine.resume_game();
        self.render_timer.start();
    }

    pub fn toggle_pause(&mut self) {
        if self.engine.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Let `dt` pass.  Returns the number of simulation ticks run; the host
    /// should redraw when it is non-zero.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.engine.advance(dt);
        let ticks = self.render_timer.advance(dt);
        for _ in 0..ticks {
            self.engine.tick();
        }
        ticks
    }

    pub fn on_touch(&mut self, touch: Touch) {
        let (w, h) = (self.engine.width(), self.engine.height());
        if let Some((vx, vy)) = self.swipe.handle(touch, w, h) {
            self.engine.set_dragon_speed(vx, vy);
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> io::Result<()> {
        self.engine.draw(surface, self.draw_mode)
    }
}
