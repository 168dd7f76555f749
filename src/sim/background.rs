//! Parallax background layers.
//!
//! Each layer is a jagged skyline sampled at fixed horizontal intervals
//! across a strip twice the surface width. Layers scroll at distinct speeds
//! and wrap modulo their own strip width, so the pattern tiles seamlessly
//! when the strip is drawn twice side by side.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// One scrolling skyline layer
#[derive(Debug, Clone)]
pub struct BackgroundLayer {
    /// Skyline heights above the bottom edge, one per `SKYLINE_STEP`
    pub heights: Vec<f32>,
    /// Horizontal scroll offset, kept in (-strip_width, 0]
    pub offset: f32,
    /// Scroll speed per frame
    pub speed: f32,
    /// Fill alpha for depth
    pub alpha: f32,
}

impl BackgroundLayer {
    fn generate(rng: &mut Pcg32, width: f32, speed: f32, alpha: f32) -> Self {
        let strip_width = width * 2.0;
        let samples = (strip_width / SKYLINE_STEP).ceil() as usize;
        let heights = (0..samples)
            .map(|_| rng.random_range(SKYLINE_MIN_HEIGHT..SKYLINE_MAX_HEIGHT))
            .collect();
        Self {
            heights,
            offset: 0.0,
            speed,
            alpha,
        }
    }

    /// Full width of the precomputed strip
    pub fn strip_width(&self) -> f32 {
        self.heights.len() as f32 * SKYLINE_STEP
    }

    /// Scroll one frame, wrapping modulo the strip's own width
    pub fn advance(&mut self) {
        self.offset = (self.offset - self.speed) % self.strip_width();
    }
}

/// Build the three layers back to front; regenerated on every (re)size
pub fn generate_layers(rng: &mut Pcg32, width: f32, _height: f32) -> Vec<BackgroundLayer> {
    LAYER_SPEEDS
        .iter()
        .zip(LAYER_ALPHAS)
        .map(|(&speed, alpha)| BackgroundLayer::generate(rng, width, speed, alpha))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn layers() -> Vec<BackgroundLayer> {
        let mut rng = Pcg32::seed_from_u64(9);
        generate_layers(&mut rng, 800.0, 600.0)
    }

    #[test]
    fn three_layers_with_distinct_speeds() {
        let layers = layers();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].speed, 0.5);
        assert_eq!(layers[1].speed, 1.0);
        assert_eq!(layers[2].speed, 1.5);
    }

    #[test]
    fn strip_covers_twice_the_surface() {
        for layer in layers() {
            assert!(layer.strip_width() >= 1600.0);
            for &h in &layer.heights {
                assert!((SKYLINE_MIN_HEIGHT..SKYLINE_MAX_HEIGHT).contains(&h));
            }
        }
    }

    #[test]
    fn offset_wraps_modulo_strip_width() {
        let mut layer = layers().remove(2);
        let strip = layer.strip_width();
        for _ in 0..((strip / layer.speed) as usize + 10) {
            layer.advance();
            assert!(layer.offset <= 0.0);
            assert!(layer.offset > -strip);
        }
    }

    #[test]
    fn faster_layers_scroll_farther() {
        let mut layers = layers();
        for _ in 0..100 {
            for layer in &mut layers {
                layer.advance();
            }
        }
        assert!(layers[0].offset > layers[1].offset);
        assert!(layers[1].offset > layers[2].offset);
    }
}
