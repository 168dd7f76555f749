//! Skyflap - a Flappy Bird style arcade game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, pipes, collisions, particles)
//! - `app`: Loop owner (input queue, frame scheduling, restart/resize)
//! - `highscores`: Persisted best score
//! - `render`: Canvas2D rendering (wasm only)
//! - `audio`: Optional Web Audio crash sound (wasm only)

pub mod app;
pub mod audio;
pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod sim;

pub use app::{FakeScheduler, FrameHandle, FrameScheduler, InputEvent, Session};
pub use highscores::BestScore;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.4;
    /// Vertical velocity set by a flap (negative = up)
    pub const FLAP_IMPULSE: f32 = -8.0;
    /// Rotation angle per unit of velocity, clamped to ±45°
    pub const ROTATION_FACTOR: f32 = 0.1;
    /// Maximum bird tilt (radians)
    pub const MAX_ROTATION: f32 = std::f32::consts::FRAC_PI_4;
    /// Wing animation advance per frame
    pub const WING_RATE: f32 = 0.2;

    /// Bird collision half-extents
    pub const BIRD_HALF_WIDTH: f32 = 15.0;
    pub const BIRD_HALF_HEIGHT: f32 = 15.0;
    /// Bird rests this fraction of the width from the left edge
    pub const BIRD_X_FRACTION: f32 = 0.25;
    /// Lethal band at the bottom of the surface
    pub const GROUND_MARGIN: f32 = 20.0;

    /// Pipe body width
    pub const PIPE_WIDTH: f32 = 50.0;
    /// Vertical clear space between top and bottom pipe
    pub const PIPE_GAP: f32 = 150.0;
    /// Horizontal scroll speed per frame
    pub const PIPE_SPEED: f32 = 2.0;
    /// Spawn a new pipe once the rightmost is this far from the right edge
    pub const PIPE_SPACING: f32 = 200.0;
    /// Minimum gap-top height, and margin kept below the gap
    pub const PIPE_MIN_HEIGHT: f32 = 50.0;
    pub const PIPE_BOTTOM_MARGIN: f32 = 50.0;
    /// Pipes are retired once fully off-screen left
    pub const PIPE_RETIRE_X: f32 = -60.0;

    /// Particle pool cap (FIFO eviction beyond this)
    pub const MAX_PARTICLES: usize = 50;
    /// Life lost per frame (life runs 1.0 -> 0.0)
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Per-axis velocity bound for burst particles
    pub const PARTICLE_SPREAD: f32 = 4.0;
    /// Burst sizes
    pub const FLAP_BURST: usize = 5;
    pub const CRASH_BURST: usize = 30;

    /// Parallax layer scroll speeds, back to front
    pub const LAYER_SPEEDS: [f32; 3] = [0.5, 1.0, 1.5];
    /// Parallax layer fill alphas, back to front
    pub const LAYER_ALPHAS: [f32; 3] = [0.2, 0.3, 0.4];
    /// Horizontal step between skyline samples
    pub const SKYLINE_STEP: f32 = 50.0;
    /// Skyline height range above the bottom edge
    pub const SKYLINE_MIN_HEIGHT: f32 = 200.0;
    pub const SKYLINE_MAX_HEIGHT: f32 = 300.0;

    /// Bounded input queue size; overflow events are dropped
    pub const INPUT_QUEUE_CAP: usize = 32;
}
