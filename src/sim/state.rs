//! Game state and core simulation types
//!
//! Everything gameplay mutates lives here; the renderer only reads it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first flap, ready overlay visible
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// The player's bird. `x` never changes; all motion is vertical.
#[derive(Debug, Clone)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    /// Tilt in radians; banking while alive, free spin while dead
    pub rot: f32,
    pub alive: bool,
    /// Render opacity; decays toward 0 after death
    pub alpha: f32,
    pub w: f32,
    pub h: f32,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: BIRD_X,
            y: CANVAS_H / 2.0,
            vy: 0.0,
            rot: 0.0,
            alive: true,
            alpha: 1.0,
            w: BIRD_W,
            h: BIRD_H,
        }
    }

    /// Bounding box used for every collision test
    pub fn rect(&self) -> Rect {
        Rect::new(self.x - self.w / 2.0, self.y - self.h / 2.0, self.w, self.h)
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// A vertically-gapped obstacle pair
#[derive(Debug, Clone)]
pub struct Pipe {
    pub x: f32,
    pub w: f32,
    /// Height of the top segment
    pub top_h: f32,
    /// Start of the bottom segment; always `top_h + PIPE_GAP`
    pub bottom_y: f32,
    /// Whether this pipe has already contributed to the score
    pub counted: bool,
}

impl Pipe {
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.w
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.w, self.top_h)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.bottom_y,
            self.w,
            CANVAS_H - self.bottom_y - GROUND_HEIGHT,
        )
    }
}

/// A death-burst particle. Ages in milliseconds, independent of game phase.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub life: f32,
    pub size: f32,
    /// Index into the renderer's particle palette
    pub color: u32,
}

/// A decorative background star. Positions are fixed for the whole session;
/// only the rendered alpha blinks, driven by the global clock.
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub blink_freq: f32,
}

/// Side effect of a tick, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A run began; the ready overlay should hide
    Started,
    /// The bird passed a pipe
    Scored { total: u32 },
    /// The bird died; the game-over transition is now pending
    Died,
    /// The delayed game-over transition fired
    GameOver { score: u32 },
}

/// Complete game session state
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub bird: Bird,
    /// Active pipes in spawn order
    pub pipes: Vec<Pipe>,
    pub particles: Vec<Particle>,
    /// Generated once per session, never reset
    pub stars: Vec<Star>,
    /// Ticks accumulated toward the next pipe spawn
    pub spawn_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Wall-clock deadline for the pending game-over transition
    pub gameover_at: Option<f64>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(seed: u64) -> Self {
        // Stars draw from a decorrelated stream so the starfield never
        // perturbs gameplay rolls.
        let mut star_rng = Pcg32::seed_from_u64(seed.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    star_rng.random_range(0.0..CANVAS_W),
                    star_rng.random_range(0.0..CANVAS_H - GROUND_HEIGHT - STAR_FIELD_MARGIN),
                ),
                size: star_rng.random_range(STAR_MIN_SIZE..=STAR_MAX_SIZE) as f32,
                alpha: 0.45 + star_rng.random_range(0.0..0.6),
                blink_freq: 0.002 + star_rng.random_range(0.0..0.008),
            })
            .collect();

        Self {
            seed,
            phase: GamePhase::Ready,
            score: 0,
            bird: Bird::new(),
            pipes: Vec::new(),
            particles: Vec::new(),
            stars,
            spawn_timer: 0.0,
            time_ticks: 0,
            gameover_at: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reinitialize every run-scoped entity and return to `Ready`.
    ///
    /// Stars and the RNG stream are session-scoped and left alone. Clearing
    /// `gameover_at` here is what keeps the delayed transition idempotent:
    /// a pending deadline from a previous run can never fire into a new one.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Ready;
        self.score = 0;
        self.bird = Bird::new();
        self.pipes.clear();
        self.particles.clear();
        self.spawn_timer = 0.0;
        self.gameover_at = None;
    }

    /// Hand the accumulated events to the host
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.bird.alive);
        assert_eq!(state.bird.y, CANVAS_H / 2.0);
        assert_eq!(state.bird.alpha, 1.0);
    }

    #[test]
    fn test_stars_within_field() {
        let state = GameState::new(42);
        for star in &state.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x < CANVAS_W);
            assert!(star.pos.y < CANVAS_H - GROUND_HEIGHT - STAR_FIELD_MARGIN);
            assert!(star.size >= STAR_MIN_SIZE as f32 && star.size <= STAR_MAX_SIZE as f32);
            assert!(star.blink_freq >= 0.002 && star.blink_freq <= 0.010);
        }
    }

    #[test]
    fn test_stars_deterministic_per_seed() {
        let a = GameState::new(123);
        let b = GameState::new(123);
        for (x, y) in a.stars.iter().zip(&b.stars) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.size, y.size);
        }
    }

    #[test]
    fn test_take_events_drains() {
        let mut state = GameState::new(1);
        state.events.push(GameEvent::Started);
        let drained = state.take_events();
        assert_eq!(drained, vec![GameEvent::Started]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_pipe_rects_span_gap() {
        let pipe = Pipe {
            x: 100.0,
            w: PIPE_WIDTH,
            top_h: 200.0,
            bottom_y: 200.0 + PIPE_GAP,
            counted: false,
        };
        assert_eq!(pipe.top_rect().h, 200.0);
        assert_eq!(pipe.bottom_rect().y, 350.0);
        assert_eq!(pipe.bottom_rect().h, CANVAS_H - 350.0 - GROUND_HEIGHT);
        assert_eq!(pipe.trailing_edge(), 100.0 + PIPE_WIDTH);
    }
}
