//! Axis-aligned collision tests
//!
//! Every solid thing in the game is a rectangle: the bird's bounding box,
//! each pipe's top and bottom segments, the ground line. Overlap uses
//! inclusive edges, so resting contact counts as a hit.

use super::state::{Bird, Pipe};

/// An axis-aligned rectangle, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive-edge overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x + self.w < other.x
            || self.x > other.x + other.w
            || self.y + self.h < other.y
            || self.y > other.y + other.h)
    }
}

/// Whether the bird's bounding box intersects either segment of a pipe
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let b = bird.rect();
    b.overlaps(&pipe.top_rect()) || b.overlaps(&pipe.bottom_rect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn pipe_at(x: f32, top_h: f32) -> Pipe {
        Pipe {
            x,
            w: PIPE_WIDTH,
            top_h,
            bottom_y: top_h + PIPE_GAP,
            counted: false,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_count() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_bird_through_gap_misses() {
        let mut bird = Bird::new();
        let pipe = pipe_at(bird.x - PIPE_WIDTH / 2.0, 200.0);
        // Center of the gap
        bird.y = 200.0 + PIPE_GAP / 2.0;
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bird_hits_top_segment() {
        let mut bird = Bird::new();
        let pipe = pipe_at(bird.x - PIPE_WIDTH / 2.0, 400.0);
        bird.y = 100.0;
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bird_hits_bottom_segment() {
        let mut bird = Bird::new();
        let pipe = pipe_at(bird.x - PIPE_WIDTH / 2.0, 100.0);
        bird.y = CANVAS_H - GROUND_HEIGHT - 50.0;
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bird_clear_of_distant_pipe() {
        let bird = Bird::new();
        let pipe = pipe_at(bird.x + 200.0, 100.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }
}
