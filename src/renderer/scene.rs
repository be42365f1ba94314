//! Frame construction
//!
//! Pure translation of a `GameState` into vertex lists; the wgpu layer only
//! uploads and draws. A frame is split into three layers so the textured
//! bird quad can slot between the two particle passes.

use glam::Vec2;

use super::shapes;
use super::vertex::{SpriteVertex, Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Readiness of the externally-loaded bird sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteStatus {
    Loading,
    Ready,
    Failed,
}

/// Cell size of the game-over title text
const TITLE_PX: f32 = 7.0;
/// Cell size of the final-score line
const SCORE_PX: f32 = 3.0;

/// One frame's draw lists, in paint order
#[derive(Debug, Default)]
pub struct Frame {
    /// Background through the first particle pass
    pub below: Vec<Vertex>,
    /// Textured bird quad, when the sprite is usable
    pub sprite: Vec<SpriteVertex>,
    /// Fallback bird, second particle pass, and the game-over overlay
    pub above: Vec<Vertex>,
}

/// Build the display list for one frame. `time_ms` drives the starfield
/// blink and nothing else.
pub fn build_frame(
    state: &GameState,
    time_ms: f64,
    sprite: SpriteStatus,
    settings: &Settings,
) -> Frame {
    let mut frame = Frame::default();

    frame
        .below
        .extend_from_slice(&shapes::rect(0.0, 0.0, CANVAS_W, CANVAS_H, colors::BACKGROUND));

    if settings.effective_starfield() {
        for star in &state.stars {
            let tw = 0.6 + 0.4 * (time_ms * f64::from(star.blink_freq)).sin() as f32;
            let alpha = (star.alpha * tw).clamp(0.15, 1.0);
            frame
                .below
                .extend(shapes::plus_star(star.pos, star.size, [1.0, 1.0, 1.0, alpha]));
        }
    }

    for pipe in &state.pipes {
        let top = pipe.top_rect();
        let bottom = pipe.bottom_rect();
        frame
            .below
            .extend_from_slice(&shapes::rect(top.x, top.y, top.w, top.h, colors::PIPE));
        frame.below.extend_from_slice(&shapes::rect(
            bottom.x,
            bottom.y,
            bottom.w,
            bottom.h,
            colors::PIPE,
        ));
    }

    frame.below.extend_from_slice(&shapes::rect(
        0.0,
        CANVAS_H - GROUND_HEIGHT,
        CANVAS_W,
        GROUND_HEIGHT,
        colors::GROUND,
    ));

    // Particles paint twice, bracketing the bird, for a layered splash
    if settings.particles {
        push_particles(&mut frame.below, state);
    }

    // Bird: the sprite when it has loaded; otherwise a solid stand-in, but
    // only while playing so no placeholder box lingers on the ready or
    // game-over screens
    let bird = &state.bird;
    match sprite {
        SpriteStatus::Ready => {
            frame.sprite = sprite_quad(
                Vec2::new(bird.x, bird.y),
                bird.w,
                bird.h,
                bird.rot,
                bird.alpha,
            );
        }
        SpriteStatus::Loading | SpriteStatus::Failed => {
            if state.phase == GamePhase::Playing {
                let mut color = colors::BIRD_FALLBACK;
                color[3] *= bird.alpha;
                frame.above.extend_from_slice(&shapes::rotated_rect(
                    Vec2::new(bird.x, bird.y),
                    bird.w,
                    bird.h,
                    bird.rot,
                    color,
                ));
            }
        }
    }

    if settings.particles {
        push_particles(&mut frame.above, state);
    }

    if state.phase == GamePhase::GameOver {
        frame
            .above
            .extend_from_slice(&shapes::rect(0.0, 0.0, CANVAS_W, CANVAS_H, colors::SCRIM));
        frame.above.extend(shapes::pixel_text(
            "GAME OVER",
            Vec2::new(CANVAS_W / 2.0, CANVAS_H / 2.0 - 30.0),
            TITLE_PX,
            colors::TITLE_TEXT,
        ));
        let line = format!("FINAL SCORE: {}", state.score);
        frame.above.extend(shapes::pixel_text(
            &line,
            Vec2::new(CANVAS_W / 2.0, CANVAS_H / 2.0 + 26.0),
            SCORE_PX,
            colors::SCORE_TEXT,
        ));
    }

    frame
}

/// Append every live particle, fading and shrinking toward end of life
fn push_particles(out: &mut Vec<Vertex>, state: &GameState) {
    for p in &state.particles {
        let life_ratio = (1.0 - p.age / p.life).max(0.0);
        let size = (p.size * life_ratio).floor().max(1.0);
        let mut color = colors::PARTICLE_SHADES[p.color as usize % colors::PARTICLE_SHADES.len()];
        color[3] = life_ratio;
        out.extend_from_slice(&shapes::rect(
            (p.pos.x - size / 2.0).round(),
            (p.pos.y - size / 2.0).round(),
            size,
            size,
            color,
        ));
    }
}

/// Rotated, tinted quad with full texture coverage
fn sprite_quad(center: Vec2, w: f32, h: f32, rot: f32, alpha: f32) -> Vec<SpriteVertex> {
    let (sin, cos) = rot.sin_cos();
    let spin = |dx: f32, dy: f32| {
        Vec2::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    };
    let tint = [1.0, 1.0, 1.0, alpha];
    let tl = spin(-w / 2.0, -h / 2.0);
    let tr = spin(w / 2.0, -h / 2.0);
    let bl = spin(-w / 2.0, h / 2.0);
    let br = spin(w / 2.0, h / 2.0);
    vec![
        SpriteVertex::new(tl.x, tl.y, 0.0, 0.0, tint),
        SpriteVertex::new(bl.x, bl.y, 0.0, 1.0, tint),
        SpriteVertex::new(tr.x, tr.y, 1.0, 0.0, tint),
        SpriteVertex::new(tr.x, tr.y, 1.0, 0.0, tint),
        SpriteVertex::new(bl.x, bl.y, 0.0, 1.0, tint),
        SpriteVertex::new(br.x, br.y, 1.0, 1.0, tint),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};

    fn playing_state() -> GameState {
        let mut state = GameState::new(3);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            1.0,
            0.0,
        );
        state
    }

    #[test]
    fn test_background_painted_first() {
        let state = GameState::new(1);
        let frame = build_frame(&state, 0.0, SpriteStatus::Loading, &Settings::default());
        assert_eq!(frame.below[0].color, colors::BACKGROUND);
        assert_eq!(frame.below[0].position, [0.0, 0.0]);
    }

    #[test]
    fn test_no_fallback_bird_when_ready_screen() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Ready);
        let frame = build_frame(&state, 0.0, SpriteStatus::Loading, &Settings::default());
        assert!(frame.sprite.is_empty());
        assert!(frame.above.is_empty());
    }

    #[test]
    fn test_fallback_bird_only_while_playing() {
        let state = playing_state();
        let frame = build_frame(&state, 0.0, SpriteStatus::Failed, &Settings::default());
        assert!(frame.sprite.is_empty());
        assert_eq!(frame.above.len(), 6);
        let c = frame.above[0].color;
        assert_eq!([c[0], c[1], c[2]], [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_sprite_quad_when_loaded() {
        let state = playing_state();
        let frame = build_frame(&state, 0.0, SpriteStatus::Ready, &Settings::default());
        assert_eq!(frame.sprite.len(), 6);
        assert!(frame.above.is_empty());
        // Sprite also shows on the ready screen
        let ready = GameState::new(1);
        let frame = build_frame(&ready, 0.0, SpriteStatus::Ready, &Settings::default());
        assert_eq!(frame.sprite.len(), 6);
    }

    #[test]
    fn test_game_over_overlay_present() {
        let mut state = playing_state();
        state.phase = GamePhase::GameOver;
        state.score = 12;
        let frame = build_frame(&state, 0.0, SpriteStatus::Failed, &Settings::default());
        // Scrim covers the whole canvas
        let scrim = frame
            .above
            .iter()
            .find(|v| v.color == colors::SCRIM)
            .expect("scrim vertex");
        assert_eq!(scrim.position, [0.0, 0.0]);
        // Both text blocks rendered
        assert!(frame.above.iter().any(|v| v.color == colors::TITLE_TEXT));
        assert!(frame.above.iter().any(|v| v.color == colors::SCORE_TEXT));
        // And no fallback bird on the game-over screen
        assert!(!frame.above.iter().any(|v| v.color[2] == 0.0 && v.color[0] == 1.0 && v.color[1] == 1.0));
    }

    #[test]
    fn test_star_alpha_clamped() {
        let state = GameState::new(8);
        let frame = build_frame(&state, 123_456.0, SpriteStatus::Loading, &Settings::default());
        for v in &frame.below {
            if v.color[0] == 1.0 && v.color[1] == 1.0 && v.color[2] == 1.0 {
                assert!(v.color[3] >= 0.15 && v.color[3] <= 1.0);
            }
        }
    }

    #[test]
    fn test_starfield_can_be_disabled() {
        let state = GameState::new(8);
        let mut settings = Settings::default();
        settings.starfield = false;
        let with = build_frame(&state, 0.0, SpriteStatus::Loading, &Settings::default());
        let without = build_frame(&state, 0.0, SpriteStatus::Loading, &settings);
        assert!(without.below.len() < with.below.len());
    }

    #[test]
    fn test_particles_bracket_the_bird() {
        let mut state = playing_state();
        state.particles.push(crate::sim::Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            age: 0.0,
            life: 1000.0,
            size: 3.0,
            color: 0,
        });
        let frame = build_frame(&state, 0.0, SpriteStatus::Failed, &Settings::default());
        let shade = colors::PARTICLE_SHADES[0];
        let in_below = frame
            .below
            .iter()
            .any(|v| v.color[..3] == shade[..3]);
        let in_above = frame
            .above
            .iter()
            .any(|v| v.color[..3] == shade[..3]);
        assert!(in_below && in_above);
    }
}
