//! Variable-timestep simulation tick
//!
//! Advances the game by one frame's worth of time. `dt` is the time-scale
//! factor (1.0 = one nominal 60Hz frame), already clamped by the host.
//! `now_ms` is the host's wall clock and is used only to arm and fire the
//! delayed game-over transition; everything else scales with `dt`.

use glam::Vec2;
use rand::Rng;

use super::collision::bird_hits_pipe;
use super::particles;
use super::state::{GameEvent, GamePhase, GameState, Pipe};
use crate::consts::*;

/// Input commands for a single tick. All flags are one-shot; the host clears
/// them after each processed frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap (space / click / touch). Also starts a run from `Ready`.
    pub flap: bool,
    /// Explicit start action (ready overlay button)
    pub start: bool,
    /// Full reset composed with an immediate start (retry button, `R` key)
    pub retry: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now_ms: f64) {
    if input.retry {
        state.reset();
        begin_run(state);
        return;
    }

    match state.phase {
        GamePhase::Ready => {
            if input.start || input.flap {
                begin_run(state);
            }
            // Leftovers from a previous run keep aging
            particles::update(&mut state.particles, dt);
            return;
        }
        GamePhase::GameOver => {
            // Reduced path: the death burst plays out, nothing else moves
            particles::update(&mut state.particles, dt);
            return;
        }
        GamePhase::Playing => {}
    }

    // Pending delayed transition. `reset()` clears the deadline, so a retry
    // that lands inside the delay window can never be interrupted by it.
    if let Some(at) = state.gameover_at {
        if now_ms >= at {
            state.gameover_at = None;
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver { score: state.score });
            particles::update(&mut state.particles, dt);
            return;
        }
    }

    state.time_ticks += 1;

    // Flap impulse sets velocity outright; dead birds don't flap
    if input.flap && state.bird.alive {
        state.bird.vy = FLAP_IMPULSE;
    }

    // Integrate the bird
    state.bird.vy += GRAVITY * dt;
    state.bird.y += state.bird.vy * dt;
    if state.bird.alive {
        state.bird.rot = (state.bird.vy / BANK_DIVISOR).clamp(-1.0, 1.0) * BANK_SCALE;
    } else {
        state.bird.rot += DEAD_SPIN * dt;
        state.bird.alpha = (state.bird.alpha - DEAD_FADE * dt).max(0.0);
    }

    // Obstacle generator
    state.spawn_timer += dt;
    if state.spawn_timer >= PIPE_SPAWN_INTERVAL {
        state.spawn_timer = 0.0;
        spawn_pipe(state);
    }

    // Move pipes, score the newly passed, cull the long gone
    let bird_x = state.bird.x;
    let mut passed = 0u32;
    for pipe in &mut state.pipes {
        pipe.x -= PIPE_SPEED * dt;
        if !pipe.counted && pipe.trailing_edge() < bird_x {
            pipe.counted = true;
            passed += 1;
        }
    }
    for _ in 0..passed {
        state.score += 1;
        state.events.push(GameEvent::Scored {
            total: state.score,
        });
    }
    state
        .pipes
        .retain(|p| p.trailing_edge() >= -PIPE_CULL_MARGIN);

    // Ground: clamp to rest on the band; lethal on first contact
    let ground_y = CANVAS_H - GROUND_HEIGHT;
    if state.bird.y + state.bird.h / 2.0 >= ground_y {
        state.bird.y = ground_y - state.bird.h / 2.0;
        if state.bird.alive {
            kill_bird(state, GROUND_HIT_BURST, now_ms);
        }
    }

    // Ceiling: clamp and zero velocity; never lethal
    if state.bird.y - state.bird.h / 2.0 <= 0.0 {
        state.bird.y = state.bird.h / 2.0;
        state.bird.vy = 0.0;
    }

    // Pipe collision, one-shot via the alive flag
    if state.bird.alive && state.pipes.iter().any(|p| bird_hits_pipe(&state.bird, p)) {
        kill_bird(state, PIPE_HIT_BURST, now_ms);
    }

    particles::update(&mut state.particles, dt);
}

/// Begin a run. Assumes run-scoped state is fresh (`Ready` after `reset`).
fn begin_run(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.score = 0;
    state.pipes.clear();
    state.spawn_timer = 0.0;
    state.bird.y = CANVAS_H / 2.0;
    state.bird.vy = START_IMPULSE;
    state.events.push(GameEvent::Started);
}

/// Spawn one pipe pair at the right edge. The top height is drawn uniformly
/// from the range that keeps both segments in playable bounds.
fn spawn_pipe(state: &mut GameState) {
    let max_top = CANVAS_H - GROUND_HEIGHT - PIPE_GAP - PIPE_BOTTOM_CLEARANCE;
    let span = (max_top - PIPE_MIN_TOP).max(0.0);
    let top_h = (PIPE_MIN_TOP + state.rng.random::<f32>() * span).floor();
    state.pipes.push(Pipe {
        x: CANVAS_W + PIPE_SPAWN_LEAD,
        w: PIPE_WIDTH,
        top_h,
        bottom_y: top_h + PIPE_GAP,
        counted: false,
    });
}

/// One-time death handling: burst, kick, pending game-over deadline
fn kill_bird(state: &mut GameState, burst: u32, now_ms: f64) {
    if !state.bird.alive {
        return;
    }
    state.bird.alive = false;
    let origin = Vec2::new(state.bird.x, state.bird.y);
    particles::spawn_burst(&mut state.particles, &mut state.rng, origin, burst);
    state.bird.vy = DEATH_KICK_VY;
    state.bird.rot = DEATH_TILT;
    state.gameover_at = Some(now_ms + GAME_OVER_DELAY_MS);
    state.events.push(GameEvent::Died);
}
