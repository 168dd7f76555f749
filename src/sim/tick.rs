//! Per-frame simulation step.
//!
//! One `tick` per display frame while the run is active: bird kinematics,
//! pipe stream, background scroll, particle pool. Input arrives as a
//! `TickInput` built from the frame's drained event queue, which keeps the
//! simulation deterministic regardless of real event timing.

use super::collision;
use super::state::{GameEvent, GamePhase, GameState, Pipe};
use crate::consts::*;

/// Hue ranges for burst particles (HSL degrees)
const FLAP_HUES: std::ops::Range<f32> = 180.0..240.0;
const CRASH_HUES: std::ops::Range<f32> = 0.0..60.0;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump impulse requested this frame
    pub flap: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.frame += 1;

    if input.flap {
        state.bird.flap();
        let origin = state.bird.trailing_edge();
        state
            .particles
            .spawn_burst(&mut state.rng, origin, FLAP_BURST, FLAP_HUES);
        state.emit(GameEvent::Flapped);
    } else {
        state.bird.fall();
    }

    if collision::bird_out_of_bounds(&state.bird, state.height) {
        crash(state);
    } else {
        update_pipes(state);
    }

    for layer in &mut state.background {
        layer.advance();
    }
    state.particles.update();
}

/// Spawn, advance, collide, score, and retire pipes for one frame
fn update_pipes(state: &mut GameState) {
    let spawn_threshold = state.width - PIPE_SPACING;
    if state.pipes.last().is_none_or(|p| p.x < spawn_threshold) {
        let gap_top = state.roll_gap_top();
        let x = state.width;
        state.pipes.push(Pipe::new(x, gap_top));
    }

    let bird = state.bird;
    let mut crashed = false;
    let mut scored = 0u32;
    for pipe in &mut state.pipes {
        pipe.x -= PIPE_SPEED;

        if !crashed && collision::bird_hits_pipe(&bird, pipe) {
            crashed = true;
        }

        // Score exactly once, the first frame the trailing edge clears the bird
        if !pipe.passed && pipe.trailing_edge() < bird.pos.x {
            pipe.passed = true;
            scored += 1;
        }
    }
    state.pipes.retain(|p| p.x >= PIPE_RETIRE_X);

    for _ in 0..scored {
        state.score += 1;
        state.emit(GameEvent::Scored);
    }
    if crashed {
        crash(state);
    }
}

/// Lethal condition reached: burst at the bird and enter the terminal phase
fn crash(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let origin = state.bird.pos;
    state
        .particles
        .spawn_burst(&mut state.rng, origin, CRASH_BURST, CRASH_HUES);
    state.emit(GameEvent::Crashed);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// While running, velocity rises by exactly the gravity constant per
        /// frame unless a flap overrides it to the fixed impulse.
        #[test]
        fn velocity_follows_gravity_or_impulse(flaps in prop::collection::vec(any::<bool>(), 1..120)) {
            let mut state = GameState::new(800.0, 600.0, 777);
            state.phase = GamePhase::Running;

            for &flap in &flaps {
                let before = state.bird.velocity;
                tick(&mut state, &TickInput { flap });
                if state.phase != GamePhase::Running {
                    break;
                }
                if flap {
                    prop_assert_eq!(state.bird.velocity, crate::consts::FLAP_IMPULSE);
                } else {
                    prop_assert!((state.bird.velocity - (before + crate::consts::GRAVITY)).abs() < 1e-5);
                }
            }
        }

        /// The particle pool never exceeds its cap after an update, whatever
        /// mix of flaps and crashes a run produces.
        #[test]
        fn particle_pool_respects_cap(flaps in prop::collection::vec(any::<bool>(), 1..300)) {
            let mut state = GameState::new(800.0, 600.0, 31337);
            state.phase = GamePhase::Running;

            for &flap in &flaps {
                tick(&mut state, &TickInput { flap });
                prop_assert!(state.particles.len() <= crate::consts::MAX_PARTICLES);
            }
        }
    }
}
