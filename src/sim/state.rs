//! Game state and core simulation types
//!
//! Everything the per-frame tick mutates lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::background::{self, BackgroundLayer};
use super::particles::ParticlePool;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Pre-start, start screen visible
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, overlay shown
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, Copy)]
pub struct Bird {
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub velocity: f32,
    /// Tilt derived from velocity, clamped to ±45°
    pub rotation: f32,
    /// Wing animation phase, bounces between 0 and 1
    pub wing_frame: f32,
    /// +1 or -1, flips at the wing frame bounds
    pub wing_direction: f32,
}

impl Bird {
    /// Spawn at the resting point for a surface of the given size
    pub fn spawn(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(width * BIRD_X_FRACTION, height * 0.5),
            velocity: 0.0,
            rotation: 0.0,
            wing_frame: 0.0,
            wing_direction: 1.0,
        }
    }

    /// One frame of free fall: integrate velocity, derive tilt, advance wings
    pub fn fall(&mut self) {
        self.velocity += GRAVITY;
        self.integrate();
    }

    /// Discrete flap: the impulse replaces any accumulated fall velocity
    pub fn flap(&mut self) {
        self.velocity = FLAP_IMPULSE;
        self.integrate();
    }

    fn integrate(&mut self) {
        self.pos.y += self.velocity;
        self.rotation = (self.velocity * ROTATION_FACTOR).clamp(-MAX_ROTATION, MAX_ROTATION);

        self.wing_frame += WING_RATE * self.wing_direction;
        if self.wing_frame > 1.0 || self.wing_frame < 0.0 {
            self.wing_direction = -self.wing_direction;
        }
    }

    /// The point flap particles trail from
    pub fn trailing_edge(&self) -> Vec2 {
        Vec2::new(self.pos.x - 20.0, self.pos.y)
    }
}

/// A paired top/bottom barrier with a fixed gap
#[derive(Debug, Clone, Copy)]
pub struct Pipe {
    /// Left edge of the pipe body
    pub x: f32,
    /// Height of the top barrier = top of the gap
    pub gap_top: f32,
    /// Set once the bird has been scored past this pipe
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    /// Top of the bottom barrier
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + PIPE_GAP
    }

    /// Right edge of the pipe body
    pub fn trailing_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }
}

/// One-shot simulation events, drained by the frontend each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flapped,
    Scored,
    Crashed,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// All randomness (gap heights, bursts, skylines) flows through here
    pub rng: Pcg32,
    /// Logical surface dimensions
    pub width: f32,
    pub height: f32,
    /// Frame counter
    pub frame: u64,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Insertion order = spawn order = left-to-right order
    pub pipes: Vec<Pipe>,
    pub particles: ParticlePool,
    pub background: Vec<BackgroundLayer>,
    pub score: u32,
    /// Events emitted since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run for a surface of the given size
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let background = background::generate_layers(&mut rng, width, height);
        Self {
            seed,
            rng,
            width,
            height,
            frame: 0,
            phase: GamePhase::Idle,
            bird: Bird::spawn(width, height),
            pipes: Vec::new(),
            particles: ParticlePool::new(),
            background,
            score: 0,
            events: Vec::new(),
        }
    }

    /// Draw a gap-top height within the playable band
    pub fn roll_gap_top(&mut self) -> f32 {
        let max = self.height - PIPE_GAP - PIPE_BOTTOM_MARGIN;
        self.rng.random_range(PIPE_MIN_HEIGHT..max)
    }

    /// Rescale in-flight entities to new surface dimensions and rebuild
    /// the background layers
    pub fn resize(&mut self, width: f32, height: f32) {
        let sx = width / self.width;
        let sy = height / self.height;

        self.bird.pos.x *= sx;
        self.bird.pos.y *= sy;
        for pipe in &mut self.pipes {
            pipe.x *= sx;
            pipe.gap_top *= sy;
        }

        self.width = width;
        self.height = height;
        self.background = background::generate_layers(&mut self.rng, width, height);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain events emitted since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
