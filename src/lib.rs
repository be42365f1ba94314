//! Pixel Flapper - a canvas-rendered obstacle-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `leaderboard`: LocalStorage-backed users and scores
//! - `settings`: Persisted display preferences

pub mod leaderboard;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use leaderboard::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size. Hosts embedding the game must honor these for
    /// correct layout.
    pub const CANVAS_W: f32 = 480.0;
    pub const CANVAS_H: f32 = 800.0;
    /// Ground band at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 40.0;

    /// Nominal frame interval; `dt` is the ratio of actual elapsed time to this
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum time-scale factor per frame. Caps the simulation step after tab
    /// suspension or slow frames so the bird cannot tunnel through obstacles.
    pub const MAX_TIME_SCALE: f32 = 4.0;

    /// Bird geometry (x is fixed; only y moves)
    pub const BIRD_X: f32 = 80.0;
    pub const BIRD_W: f32 = 48.0;
    pub const BIRD_H: f32 = 36.0;

    /// Vertical acceleration per tick²
    pub const GRAVITY: f32 = 0.45;
    /// Velocity set (not added) by a flap
    pub const FLAP_IMPULSE: f32 = -7.8;
    /// Gentler impulse applied when a run starts
    pub const START_IMPULSE: f32 = -6.0;

    /// Banking tilt: `clamp(vy / BANK_DIVISOR, -1, 1) * BANK_SCALE` radians
    pub const BANK_DIVISOR: f32 = 10.0;
    pub const BANK_SCALE: f32 = 0.6;
    /// Dead bird: spin rate and opacity fade per tick
    pub const DEAD_SPIN: f32 = 0.02;
    pub const DEAD_FADE: f32 = 0.01;
    /// Kick applied at the moment of death
    pub const DEATH_KICK_VY: f32 = -2.0;
    pub const DEATH_TILT: f32 = 0.6;

    /// Pipe geometry and motion
    pub const PIPE_WIDTH: f32 = 68.0;
    pub const PIPE_GAP: f32 = 150.0;
    pub const PIPE_SPEED: f32 = 2.8;
    /// Ticks between spawns
    pub const PIPE_SPAWN_INTERVAL: f32 = 90.0;
    /// Pipes spawn this far past the right edge
    pub const PIPE_SPAWN_LEAD: f32 = 20.0;
    /// Smallest allowed top segment
    pub const PIPE_MIN_TOP: f32 = 70.0;
    /// The bottom segment must clear the ground by at least this much
    pub const PIPE_BOTTOM_CLEARANCE: f32 = 120.0;
    /// Pipes are culled once fully this far left of the canvas
    pub const PIPE_CULL_MARGIN: f32 = 50.0;

    /// Wall-clock delay between the death event and the game-over overlay,
    /// leaving the death burst a beat to play out. Deliberately not scaled
    /// by `dt`.
    pub const GAME_OVER_DELAY_MS: f64 = 220.0;

    /// Death burst sizes by trigger
    pub const GROUND_HIT_BURST: u32 = 26;
    pub const PIPE_HIT_BURST: u32 = 28;

    /// Particle tuning (ages are in milliseconds)
    pub const MAX_PARTICLES: usize = 256;
    pub const PARTICLE_GRAVITY: f32 = 0.12;
    pub const PARTICLE_DRAG_X: f32 = 0.99;
    pub const PARTICLE_DRAG_Y: f32 = 0.995;
    pub const PARTICLE_STEP_SCALE: f32 = 1.2;
    pub const PARTICLE_MIN_SPEED: f32 = 1.2;
    pub const PARTICLE_SPEED_RANGE: f32 = 3.0;
    pub const PARTICLE_LIFT: f32 = 1.0;
    pub const PARTICLE_MIN_LIFE: f32 = 600.0;
    pub const PARTICLE_LIFE_RANGE: f32 = 400.0;

    /// Decorative starfield
    pub const STAR_COUNT: usize = 140;
    pub const STAR_MIN_SIZE: u32 = 1;
    pub const STAR_MAX_SIZE: u32 = 3;
    /// Stars keep clear of the ground band by this margin
    pub const STAR_FIELD_MARGIN: f32 = 40.0;
}
