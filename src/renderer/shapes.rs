//! Shape tessellation for 2D primitives
//!
//! Everything the game draws is built from triangles on the CPU: axis-aligned
//! rects, the rotated bird quad, plus-shaped star glyphs, and a 5x7 pixel
//! font for the game-over text.

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering an axis-aligned rectangle, top-left origin
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(x, y, color),
        Vertex::new(x, y + h, color),
        Vertex::new(x + w, y, color),
        Vertex::new(x + w, y, color),
        Vertex::new(x, y + h, color),
        Vertex::new(x + w, y + h, color),
    ]
}

/// Rectangle centered on `center`, rotated by `rot` radians
pub fn rotated_rect(center: Vec2, w: f32, h: f32, rot: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (sin, cos) = rot.sin_cos();
    let spin = |dx: f32, dy: f32| {
        Vec2::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    };
    let tl = spin(-w / 2.0, -h / 2.0);
    let tr = spin(w / 2.0, -h / 2.0);
    let bl = spin(-w / 2.0, h / 2.0);
    let br = spin(w / 2.0, h / 2.0);
    [
        Vertex::new(tl.x, tl.y, color),
        Vertex::new(bl.x, bl.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(tr.x, tr.y, color),
        Vertex::new(bl.x, bl.y, color),
        Vertex::new(br.x, br.y, color),
    ]
}

/// Plus-shaped star glyph: a vertical and a horizontal bar crossing at the
/// center, rounded to whole pixels so small stars stay crisp
pub fn plus_star(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let cx = center.x.round();
    let cy = center.y.round();
    let half = (size / 2.0).floor().max(1.0);
    let quarter = (size / 4.0).floor();

    let mut out = Vec::with_capacity(12);
    out.extend_from_slice(&rect(cx - quarter, cy - half, half, size, color));
    out.extend_from_slice(&rect(cx - half, cy - quarter, size, half, color));
    out
}

/// 5x7 bitmap glyphs; each byte is one row, low five bits used
fn glyph(c: char) -> [u8; 7] {
    match c {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'I' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x1F],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        _ => [0; 7],
    }
}

/// Glyph cell layout: 5 columns plus 1 of spacing, 7 rows
const GLYPH_COLS: f32 = 5.0;
const GLYPH_ROWS: f32 = 7.0;
const GLYPH_ADVANCE: f32 = GLYPH_COLS + 1.0;

/// Rendered width of a string at cell size `px`
pub fn text_width(text: &str, px: f32) -> f32 {
    let chars = text.chars().count() as f32;
    if chars == 0.0 {
        return 0.0;
    }
    (chars * GLYPH_ADVANCE - 1.0) * px
}

/// Blocky pixel text centered on `center`; one filled rect per set bit
pub fn pixel_text(text: &str, center: Vec2, px: f32, color: [f32; 4]) -> Vec<Vertex> {
    let width = text_width(text, px);
    let mut x = center.x - width / 2.0;
    let top = center.y - GLYPH_ROWS * px / 2.0;

    let mut out = Vec::new();
    for c in text.chars() {
        let rows = glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5u8 {
                if bits & (0x10 >> col) != 0 {
                    out.extend_from_slice(&rect(
                        x + f32::from(col) * px,
                        top + row as f32 * px,
                        px,
                        px,
                        color,
                    ));
                }
            }
        }
        x += GLYPH_ADVANCE * px;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let verts = rect(10.0, 20.0, 30.0, 40.0, [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_rotated_rect_quarter_turn() {
        let verts = rotated_rect(
            Vec2::new(0.0, 0.0),
            10.0,
            4.0,
            std::f32::consts::FRAC_PI_2,
            [1.0; 4],
        );
        // Width and height swap under a 90° rotation
        let max_x = verts
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        let max_y = verts
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((max_x - 2.0).abs() < 1e-4);
        assert!((max_y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_plus_star_is_two_bars() {
        let verts = plus_star(Vec2::new(100.0, 100.0), 3.0, [1.0; 4]);
        assert_eq!(verts.len(), 12);
    }

    #[test]
    fn test_pixel_text_centered() {
        let verts = pixel_text("GAME OVER", Vec2::new(240.0, 400.0), 7.0, [1.0; 4]);
        assert!(!verts.is_empty());
        let min_x = verts
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MAX, f32::min);
        let max_x = verts
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        let mid = (min_x + max_x) / 2.0;
        // Glyph coverage is symmetric enough to center within one cell
        assert!((mid - 240.0).abs() < 7.0);
        assert!(max_x - min_x <= text_width("GAME OVER", 7.0));
    }

    #[test]
    fn test_unknown_glyphs_render_nothing() {
        let verts = pixel_text("???", Vec2::ZERO, 2.0, [1.0; 4]);
        assert!(verts.is_empty());
    }

    #[test]
    fn test_digits_have_coverage() {
        for d in "0123456789".chars() {
            assert!(glyph(d).iter().any(|row| *row != 0));
        }
    }
}
