//! Axis-aligned collision checks between the bird and the pipe stream.

use super::state::{Bird, Pipe};
use crate::consts::*;

/// True when the bird's horizontal extent overlaps the pipe body
pub fn horizontal_overlap(bird_x: f32, pipe: &Pipe) -> bool {
    bird_x + BIRD_HALF_WIDTH > pipe.x && bird_x - BIRD_HALF_WIDTH < pipe.trailing_edge()
}

/// True when the bird's vertical extent fits strictly inside the gap
pub fn within_gap(bird_y: f32, pipe: &Pipe) -> bool {
    bird_y - BIRD_HALF_HEIGHT >= pipe.gap_top && bird_y + BIRD_HALF_HEIGHT <= pipe.gap_bottom()
}

/// Lethal overlap: horizontally inside the pipe but outside its gap
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    horizontal_overlap(bird.pos.x, pipe) && !within_gap(bird.pos.y, pipe)
}

/// Lethal vertical bounds: above the surface or into the ground band
pub fn bird_out_of_bounds(bird: &Bird, height: f32) -> bool {
    bird.pos.y < 0.0 || bird.pos.y > height - GROUND_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn bird_at(x: f32, y: f32) -> Bird {
        let mut bird = Bird::spawn(800.0, 600.0);
        bird.pos = Vec2::new(x, y);
        bird
    }

    #[test]
    fn safe_inside_gap() {
        // gap spans [50, 200]; bird extent [85, 115] fits
        let pipe = Pipe::new(190.0, 50.0);
        let bird = bird_at(200.0, 100.0);
        assert!(horizontal_overlap(bird.pos.x, &pipe));
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn lethal_breaching_top() {
        let pipe = Pipe::new(190.0, 50.0);
        let bird = bird_at(200.0, 40.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn lethal_breaching_bottom() {
        let pipe = Pipe::new(190.0, 50.0);
        let bird = bird_at(200.0, 210.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn no_hit_without_horizontal_overlap() {
        // Bird well left of the pipe, even at a lethal height
        let pipe = Pipe::new(500.0, 50.0);
        let bird = bird_at(200.0, 10.0);
        assert!(!horizontal_overlap(bird.pos.x, &pipe));
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn overlap_edges_are_exclusive() {
        let pipe = Pipe::new(100.0, 50.0);
        // bird.x + 15 == pipe.x: touching, not overlapping
        assert!(!horizontal_overlap(85.0, &pipe));
        // bird.x - 15 == pipe right edge (150): touching, not overlapping
        assert!(!horizontal_overlap(165.0, &pipe));
        assert!(horizontal_overlap(100.0, &pipe));
    }

    #[test]
    fn vertical_bounds() {
        assert!(bird_out_of_bounds(&bird_at(0.0, -1.0), 600.0));
        assert!(bird_out_of_bounds(&bird_at(0.0, 581.0), 600.0));
        assert!(!bird_out_of_bounds(&bird_at(0.0, 300.0), 600.0));
    }
}
