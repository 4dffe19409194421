use std::io;
use std::time::Duration;

use dragon_flight::audio::{Mixer, Playback, Sound};
use dragon_flight::config::FIREBALL_POOL;
use dragon_flight::surface::{DrawMode, SpriteId, Surface, TextStyle};
use dragon_flight::{ConfigError, GameConfig, GameEngine, Phase};

const W: i32 = 1600;
const H: i32 = 960;

fn make_engine() -> GameEngine<Mixer> {
    GameEngine::new(GameConfig::default(), W, H, Mixer::new()).unwrap()
}

fn started() -> GameEngine<Mixer> {
    let mut e = make_engine();
    e.start_game();
    e
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Put a fireball one tick away from hitting the dragon.
fn aim_at_dragon(e: &mut GameEngine<Mixer>) {
    let (x, y, w) = {
        let d = e.dragon();
        (d.x, d.y, d.width)
    };
    e.fireballs_mut()[0].spawn(x + w + 4, y);
}

fn alive_count(e: &GameEngine<Mixer>) -> usize {
    e.fireballs().iter().filter(|f| f.is_alive()).count()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_engine_is_not_started() {
    let e = make_engine();
    assert_eq!(e.phase(), Phase::NotStarted);
    assert_eq!(e.distance(), 0);
    assert_eq!(e.max_distance(), 0);
    assert_eq!(alive_count(&e), 0);
    assert_eq!((e.width(), e.height()), (W, H));
}

#[test]
fn new_rejects_empty_playfield() {
    let err = GameEngine::new(GameConfig::default(), 0, H, Mixer::new()).err();
    assert_eq!(err, Some(ConfigError::EmptyPlayfield { width: 0, height: H }));
}

// ── start_game ────────────────────────────────────────────────────────────────

#[test]
fn start_places_dragon_and_starts_everything() {
    let e = started();
    assert_eq!(e.phase(), Phase::Running);
    assert_eq!((e.dragon().x, e.dragon().y), (200, H / 2));
    assert!(e.spawn_timer().is_running());
    assert!(e.animation_timer().is_running());
    assert_eq!(e.audio().state(Sound::Background), Playback::Playing);
}

#[test]
fn start_resets_distance_and_velocity() {
    let mut e = started();
    e.set_dragon_speed(5, 5);
    for _ in 0..10 {
        e.tick();
    }
    e.start_game();
    assert_eq!(e.distance(), 0);
    assert_eq!((e.dragon().vx, e.dragon().vy), (0, 0));
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn quiet_ticks_add_one_distance_each() {
    let mut e = started();
    for n in 1..=50 {
        e.tick();
        assert_eq!(e.distance(), n);
    }
    assert_eq!(e.phase(), Phase::Running);
}

#[test]
fn ticks_move_dragon_and_fireballs() {
    let mut e = started();
    e.set_dragon_speed(0, -10);
    e.fireballs_mut()[2].spawn(W, 0);
    e.tick();
    assert_eq!(e.dragon().y, H / 2 - 10);
    assert_eq!(e.fireballs()[2].x, W - 8);
}

#[test]
fn passing_fireballs_never_crash() {
    let mut e = started();
    // Far below the dragon's lowest reachable row
    e.fireballs_mut()[0].spawn(W, H - 40);
    for n in 1..=300 {
        e.tick();
        assert_eq!(e.distance(), n);
    }
    assert!(!e.fireballs()[0].is_alive()); // flew off the left edge
    assert_eq!(e.phase(), Phase::Running);
}

#[test]
fn collision_crashes() {
    let mut e = started();
    aim_at_dragon(&mut e);
    e.tick();
    assert_eq!(e.phase(), Phase::RestartPending);
    assert_eq!(e.max_distance(), 1);
}

// ── crash ─────────────────────────────────────────────────────────────────────

#[test]
fn crash_kills_every_fireball() {
    let mut e = started();
    for _ in 0..FIREBALL_POOL {
        e.spawn_fireball();
    }
    assert_eq!(alive_count(&e), FIREBALL_POOL);
    e.crash();
    assert_eq!(alive_count(&e), 0);
}

#[test]
fn crash_stops_run_and_plays_blast() {
    let mut e = started();
    e.crash();
    assert!(!e.spawn_timer().is_running());
    assert!(!e.animation_timer().is_running());
    assert_eq!(e.audio().state(Sound::Background), Playback::Stopped);
    assert_eq!(e.audio().state(Sound::Blast), Playback::Playing);
    assert!(e.is_restart_pending());
}

#[test]
fn ticks_are_frozen_until_restart() {
    let mut e = started();
    for _ in 0..7 {
        e.tick();
    }
    e.crash();
    let (x, y) = (e.dragon().x, e.dragon().y);
    for _ in 0..100 {
        e.tick();
    }
    assert_eq!(e.distance(), 7);
    assert_eq!((e.dragon().x, e.dragon().y), (x, y));

    e.advance(ms(999));
    assert!(e.is_restart_pending());
    e.tick();
    assert_eq!(e.distance(), 7);

    e.advance(ms(1));
    assert_eq!(e.phase(), Phase::Running);
    assert_eq!(e.distance(), 0);
    e.tick();
    assert_eq!(e.distance(), 1);
}

#[test]
fn restart_restarts_timers_and_music() {
    let mut e = started();
    e.crash();
    e.advance(ms(1000));
    assert!(e.spawn_timer().is_running());
    assert!(e.animation_timer().is_running());
    assert_eq!(e.audio().state(Sound::Background), Playback::Playing);
}

// ── stop_game / max distance ──────────────────────────────────────────────────

#[test]
fn max_distance_keeps_the_best_run() {
    let mut e = started();
    for _ in 0..5 {
        e.tick();
    }
    e.stop_game();
    assert_eq!(e.max_distance(), 5);

    e.start_game();
    for _ in 0..3 {
        e.tick();
    }
    e.stop_game();
    assert_eq!(e.distance(), 3); // stop does not reset distance
    assert_eq!(e.max_distance(), 5);
}

#[test]
fn max_distance_never_decreases() {
    let mut e = make_engine();
    let mut best = 0;
    for run in [4, 9, 2, 9, 12, 0, 1] {
        e.start_game();
        for _ in 0..run {
            e.tick();
        }
        e.stop_game();
        assert!(e.max_distance() >= best);
        best = e.max_distance();
    }
    assert_eq!(best, 12);
}

// ── Spawn pool ────────────────────────────────────────────────────────────────

#[test]
fn spawn_fills_slot_zero_first() {
    let mut e = started();
    assert_eq!(e.spawn_fireball(), Some(0));
    let f = &e.fireballs()[0];
    assert!(f.is_alive());
    assert_eq!(f.x, W);
    assert!((0..H).contains(&f.y));
    assert_eq!(alive_count(&e), 1);
}

#[test]
fn spawn_reuses_the_only_dead_slot() {
    let mut e = started();
    for _ in 0..FIREBALL_POOL {
        e.spawn_fireball();
    }
    e.fireballs_mut()[3].kill();
    let before: Vec<(i32, i32)> = e.fireballs().iter().map(|f| (f.x, f.y)).collect();

    assert_eq!(e.spawn_fireball(), Some(3));
    for (i, f) in e.fireballs().iter().enumerate() {
        assert!(f.is_alive());
        if i != 3 {
            assert_eq!((f.x, f.y), before[i]);
        }
    }
}

#[test]
fn spawn_into_full_pool_is_dropped() {
    let mut e = started();
    for _ in 0..FIREBALL_POOL {
        e.spawn_fireball();
    }
    assert_eq!(e.spawn_fireball(), None);
    assert_eq!(alive_count(&e), FIREBALL_POOL);
}

// ── Determinism ───────────────────────────────────────────────────────────────

fn spawn_heights(seed: u64, n: usize) -> Vec<i32> {
    let config = GameConfig { seed, ..GameConfig::default() };
    let mut e = GameEngine::new(config, W, H, Mixer::new()).unwrap();
    e.start_game();
    (0..n)
        .map(|_| {
            let slot = e.spawn_fireball().unwrap();
            let y = e.fireballs()[slot].y;
            e.fireballs_mut()[slot].kill();
            y
        })
        .collect()
}

#[test]
fn same_seed_same_level() {
    assert_eq!(spawn_heights(400, 32), spawn_heights(400, 32));
}

#[test]
fn different_seed_different_level() {
    assert_ne!(spawn_heights(400, 32), spawn_heights(401, 32));
}

#[test]
fn same_seed_same_timer_driven_level() {
    let run = || {
        let mut e = started();
        let mut seen = Vec::new();
        for _ in 0..20 {
            e.advance(ms(700));
            seen.extend(e.fireballs().iter().filter(|f| f.is_alive()).map(|f| f.y));
            for f in e.fireballs_mut().iter_mut() {
                f.kill();
            }
        }
        seen
    };
    let first = run();
    assert_eq!(first.len(), 20);
    assert_eq!(first, run());
}

// ── Engine timers ─────────────────────────────────────────────────────────────

#[test]
fn spawn_timer_spawns_every_700ms() {
    let mut e = started();
    e.advance(ms(699));
    assert_eq!(alive_count(&e), 0);
    e.advance(ms(1));
    assert_eq!(alive_count(&e), 1);
    e.advance(ms(1400));
    assert_eq!(alive_count(&e), 3);
}

#[test]
fn animation_timer_flaps_wings() {
    let mut e = started();
    e.advance(ms(250));
    assert_eq!(e.dragon().frame(), 1);
    e.advance(ms(750));
    assert_eq!(e.dragon().frame(), 0); // 4 frames, wrapped
}

#[test]
fn timers_are_idle_before_start() {
    let mut e = make_engine();
    e.advance(ms(10_000));
    assert_eq!(alive_count(&e), 0);
    assert_eq!(e.dragon().frame(), 0);
}

// ── Pause / resume ────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_timers_and_music() {
    let mut e = started();
    e.pause_game();
    assert_eq!(e.phase(), Phase::Paused);
    assert_eq!(e.audio().state(Sound::Background), Playback::Paused);
    e.advance(ms(10_000));
    assert_eq!(alive_count(&e), 0);
    assert_eq!(e.dragon().frame(), 0);

    e.resume_game();
    assert_eq!(e.phase(), Phase::Running);
    assert_eq!(e.audio().state(Sound::Background), Playback::Playing);
}

#[test]
fn pause_resume_keeps_spawn_phase() {
    let mut e = started();
    e.advance(ms(300));
    e.pause_game();
    e.advance(ms(5_000));
    e.resume_game();
    e.advance(ms(399));
    assert_eq!(alive_count(&e), 0);
    e.advance(ms(1));
    assert_eq!(alive_count(&e), 1);
}

#[test]
fn pause_and_resume_are_idempotent() {
    let mut e = started();
    e.pause_game();
    e.pause_game();
    e.resume_game();
    assert!(!e.is_paused());
    e.resume_game();
    assert!(!e.is_paused());
    assert_eq!(e.audio().state(Sound::Background), Playback::Playing);
}

#[test]
fn pause_holds_pending_restart() {
    let mut e = started();
    e.crash();
    e.advance(ms(400));
    e.pause_game();
    assert_eq!(e.phase(), Phase::Paused);
    e.advance(ms(10_000));
    assert!(e.is_restart_pending());

    e.resume_game();
    assert_eq!(e.phase(), Phase::RestartPending);
    e.advance(ms(599));
    assert!(e.is_restart_pending());
    e.advance(ms(1));
    assert_eq!(e.phase(), Phase::Running);
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Call {
    Sprite(SpriteId, usize, i32, i32),
    Rect(i32, i32, i32, i32),
    Text(String, i32, i32, TextStyle),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Surface for Recorder {
    fn draw_sprite(&mut self, sprite: SpriteId, frame: usize, x: i32, y: i32) -> io::Result<()> {
        self.calls.push(Call::Sprite(sprite, frame, x, y));
        Ok(())
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> io::Result<()> {
        self.calls.push(Call::Rect(x, y, w, h));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) -> io::Result<()> {
        self.calls.push(Call::Text(text.to_string(), x, y, style));
        Ok(())
    }
}

#[test]
fn draw_sprites_skip_dead_fireballs() {
    let mut e = started();
    e.fireballs_mut()[1].spawn(900, 20);
    let mut r = Recorder::default();
    e.draw(&mut r, DrawMode::Sprite).unwrap();
    assert_eq!(
        r.calls,
        vec![
            Call::Sprite(SpriteId::Dragon, 0, 200, H / 2),
            Call::Sprite(SpriteId::FireBall, 0, 900, 20),
            Call::Text("0".to_string(), W - 400, 100, TextStyle::Score),
            Call::Text("max: 0".to_string(), W - 400, 180, TextStyle::Best),
        ]
    );
}

#[test]
fn draw_rectangles_use_entity_boxes() {
    let mut e = started();
    e.fireballs_mut()[0].spawn(900, 20);
    let mut r = Recorder::default();
    e.draw(&mut r, DrawMode::Rectangle).unwrap();
    assert_eq!(r.calls[0], Call::Rect(200, H / 2, 160, 80));
    assert_eq!(r.calls[1], Call::Rect(900, 20, 80, 40));
}
